// src/authz/context.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::UserRole};

/// Identidade de uma requisição ao longo do pipeline de autorização.
///
/// `caller_id` é sempre quem apresentou o token. `acting_as_id` começa igual ao
/// chamador e passa a ser o dono do armazém depois que a resolução de permissão
/// aprova a ação; os serviços de domínio só enxergam `acting_as_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    caller_id: Uuid,
    caller_role: UserRole,
    acting_as_id: Uuid,
}

impl AuthContext {
    pub fn authenticated(caller_id: Uuid, caller_role: UserRole) -> Self {
        Self { caller_id, caller_role, acting_as_id: caller_id }
    }

    pub fn act_as(self, owner_id: Uuid) -> Self {
        Self { acting_as_id: owner_id, ..self }
    }

    pub fn caller_id(&self) -> Uuid {
        self.caller_id
    }

    pub fn caller_role(&self) -> UserRole {
        self.caller_role
    }

    pub fn acting_as_id(&self) -> Uuid {
        self.acting_as_id
    }
}

// Extrator para obter o contexto diretamente nos handlers
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or(AppError::InvalidToken)
    }
}
