// src/models/auth.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// Papel global do usuário (não confundir com os cargos por armazém)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Owner,
    Employer,
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Owner => "owner",
            UserRole::Employer => "employer",
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    /// Apenas donos e funcionários podem se cadastrar pela API pública.
    pub fn is_self_registrable(&self) -> bool {
        matches!(self, UserRole::Owner | UserRole::Employer)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(UserRole::Owner),
            "employer" => Ok(UserRole::Employer),
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            other => Err(format!("papel desconhecido: {other}")),
        }
    }
}

// Usado pelo `#[sqlx(try_from = "String")]` do User
impl TryFrom<String> for UserRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    #[sqlx(try_from = "String")]
    pub role: UserRole,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(length(min = 3, max = 64, message = "O username deve ter entre 3 e 64 caracteres."))]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub surname: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 5, max = 20, message = "O telefone fornecido é inválido."))]
    pub phone_number: String,
    #[validate(length(min = 6, max = 64, message = "A senha deve ter entre 6 e 64 caracteres."))]
    pub password: String,
    pub role: UserRole,
}

// Login por e-mail
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginByEmailPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// Login por telefone
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginByPhonePayload {
    #[validate(length(min = 5, max = 20, message = "O telefone fornecido é inválido."))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// Resposta de autenticação com o token de acesso.
// O refresh token vai apenas no cookie httpOnly.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

// ---
// Claims dos tokens. Cada tipo de token tem o seu builder explícito.
// ---

// Token de acesso: identifica o usuário e carrega o papel global
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: Uuid,
    pub role: UserRole,
    pub iat: usize,
    pub exp: usize,
}

impl AccessClaims {
    pub fn for_user(user_id: Uuid, role: UserRole, ttl: chrono::Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role,
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        }
    }
}

// Token de refresh: apenas o sujeito
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
}

impl RefreshClaims {
    pub fn for_user(user_id: Uuid, ttl: chrono::Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        }
    }
}
