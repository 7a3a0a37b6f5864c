// src/authz.rs
//
// Modelo de autorização por armazém: autenticação via Bearer token seguida
// da resolução de permissão (grupo da rota + ação + cargos concedidos).

pub mod action;
pub use action::{Action, PermissionGroup};
pub mod context;
pub use context::AuthContext;
pub mod engine;
pub use engine::{AuthorizationEngine, PermissionStore, bearer_token};
