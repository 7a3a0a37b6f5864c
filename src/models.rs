// src/models.rs

pub mod auth;
pub mod rbac;
pub mod warehouse;
