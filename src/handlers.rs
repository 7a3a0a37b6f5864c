// src/handlers.rs

pub mod auth;
pub mod product;
pub mod qr;
pub mod role;
pub mod warehouse;
pub mod zone;
