// src/authz/engine.rs

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    authz::{Action, AuthContext, PermissionGroup},
    common::error::AppError,
    services::token::TokenManager,
};

/// Consultas de que a resolução de permissões precisa.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Existe um cargo concedido a `user_id` em `warehouse_id` que carrega `action`?
    async fn has_permission(&self, warehouse_id: i64, user_id: Uuid, action: Action) -> Result<bool, AppError>;

    async fn warehouse_owner(&self, warehouse_id: i64) -> Result<Option<Uuid>, AppError>;
}

/// Extrai o token de um cabeçalho `Authorization: Bearer <token>`.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let token = header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(AppError::InvalidToken)?;

    if token.is_empty() {
        return Err(AppError::InvalidToken);
    }
    Ok(token)
}

// Unauthenticated -> authenticate() -> AuthContext
//                 -> authorize()    -> AuthContext agindo como o dono
// Falhas: InvalidToken (401) na primeira etapa, InvalidActionForGroup/AccessDenied (403) na segunda.
#[derive(Clone)]
pub struct AuthorizationEngine {
    tokens: TokenManager,
    store: Arc<dyn PermissionStore>,
}

impl AuthorizationEngine {
    pub fn new(tokens: TokenManager, store: Arc<dyn PermissionStore>) -> Self {
        Self { tokens, store }
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Etapa A: valida o token de acesso e cria o contexto do chamador.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<AuthContext, AppError> {
        let token = bearer_token(authorization)?;
        let claims = self.tokens.decode_access(token)?;
        Ok(AuthContext::authenticated(claims.sub, claims.role))
    }

    /// Etapa B: verifica a ação no armazém e troca a identidade efetiva pela do dono.
    pub async fn authorize(
        &self,
        ctx: AuthContext,
        warehouse_id: i64,
        group: PermissionGroup,
        raw_action: &str,
    ) -> Result<AuthContext, AppError> {
        let action = group.validate_action(raw_action)?;

        let allowed = self
            .store
            .has_permission(warehouse_id, ctx.caller_id(), action)
            .await?;

        if !allowed {
            tracing::warn!(
                user_id = %ctx.caller_id(),
                warehouse_id,
                %action,
                "permissão negada"
            );
            return Err(AppError::AccessDenied);
        }

        // Armazém removido entre as duas consultas: mesmo tratamento de "sem permissão"
        let owner_id = self
            .store
            .warehouse_owner(warehouse_id)
            .await?
            .ok_or(AppError::AccessDenied)?;

        tracing::debug!(
            user_id = %ctx.caller_id(),
            %owner_id,
            warehouse_id,
            %action,
            "acesso delegado concedido"
        );

        Ok(ctx.act_as(owner_id))
    }
}
