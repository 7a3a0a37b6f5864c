// src/services.rs

pub mod auth;
pub mod password;
pub mod product_service;
pub mod qr;
pub mod role_service;
pub mod token;
pub mod warehouse_service;
pub mod zone_service;
