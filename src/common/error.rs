// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro único: os serviços devolvem variantes tipadas e a
// camada HTTP só traduz para o status.
#[derive(Debug, Error)]
pub enum AppError {
    // --- 400: entrada inválida ---
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    // --- 401: autenticação ---
    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    // --- 403: autorização ---
    #[error("Ação '{action}' inválida para o grupo '{group}'")]
    InvalidActionForGroup { group: &'static str, action: String },

    #[error("Acesso negado")]
    AccessDenied,

    #[error("Papel '{0}' necessário")]
    RoleRequired(&'static str),

    // --- 400: conflitos ---
    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Telefone já existe")]
    PhoneAlreadyExists,

    #[error("Username já existe")]
    UsernameAlreadyExists,

    #[error("Armazém '{0}' já existe")]
    WarehouseAlreadyExists(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // --- 404: não encontrado (igual para "não existe" e "não é seu") ---
    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Armazém não encontrado")]
    WarehouseNotFound,

    #[error("Zona não encontrada")]
    ZoneNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Permissão {0} não encontrada")]
    PermissionNotFound(i64),

    #[error("Cargo não encontrado")]
    RoleNotFound,

    #[error("Arquivo não encontrado")]
    FileNotFound,

    // --- 500 ---
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::BadRequest(_)
            | AppError::EmailAlreadyExists
            | AppError::PhoneAlreadyExists
            | AppError::UsernameAlreadyExists
            | AppError::WarehouseAlreadyExists(_)
            | AppError::UniqueConstraintViolation(_) => StatusCode::BAD_REQUEST,

            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,

            AppError::InvalidActionForGroup { .. }
            | AppError::AccessDenied
            | AppError::RoleRequired(_) => StatusCode::FORBIDDEN,

            AppError::UserNotFound
            | AppError::WarehouseNotFound
            | AppError::ZoneNotFound
            | AppError::ProductNotFound
            | AppError::PermissionNotFound(_)
            | AppError::RoleNotFound
            | AppError::FileNotFound => StatusCode::NOT_FOUND,

            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Converte violações de unicidade do Postgres no conflito correspondente
    pub fn from_unique_violation(e: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                if let Some(constraint) = db_err.constraint() {
                    return match constraint {
                        "users_email_key" => AppError::EmailAlreadyExists,
                        "users_phone_number_key" => AppError::PhoneAlreadyExists,
                        "users_username_key" => AppError::UsernameAlreadyExists,
                        _ => AppError::UniqueConstraintViolation(constraint.to_string()),
                    };
                }
            }
        }
        e.into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        // Erros 500 são logados mas nunca vazam detalhes para o cliente
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {:?}", self);
            "Ocorreu um erro inesperado.".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::WarehouseAlreadyExists("W1".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AccessDenied.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::InvalidActionForGroup { group: "zone", action: "product_manage".into() }.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::WarehouseNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::PermissionNotFound(9).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let (status, body) =
            body_json(AppError::InternalServerError(anyhow::anyhow!("senha do banco: hunter2"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Ocorreu um erro inesperado.");
    }

    #[tokio::test]
    async fn client_errors_carry_an_error_string() {
        let (status, body) = body_json(AppError::AccessDenied).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Acesso negado");
    }
}
