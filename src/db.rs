// src/db.rs

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod warehouse_repo;
pub use warehouse_repo::WarehouseRepository;
pub mod zone_repo;
pub use zone_repo::ZoneRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod permission_repo;
pub use permission_repo::PermissionRepository;
