// src/models/rbac.rs

use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// O que sai do banco (Tabela Permissions)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Permission {
    #[schema(example = 4)]
    pub id: i64,

    #[schema(example = "product_manage")]
    pub name: String,
}

// O que sai do banco (Tabela Roles)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Role {
    pub id: i64,

    #[schema(ignore)]
    #[serde(skip_serializing)]
    pub owner_id: Uuid,

    #[schema(example = "picker")]
    pub name: String,
}

// O Payload para conceder um cargo a um funcionário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GrantRolePayload {
    #[schema(example = "picker")]
    #[validate(length(min = 1, max = 64, message = "O nome do cargo é obrigatório."))]
    pub name: String,

    #[schema(example = "bob")]
    #[validate(length(min = 1, message = "O username do funcionário é obrigatório."))]
    pub username: String,

    #[schema(example = json!([4]))]
    #[serde(default)]
    pub permissions: Vec<i64>,
}

// O Payload para revogar um cargo
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RevokeRolePayload {
    #[validate(length(min = 1, max = 64, message = "O nome do cargo é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O username do funcionário é obrigatório."))]
    pub username: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EmployeeLookupPayload {
    #[validate(length(min = 1, message = "O username é obrigatório."))]
    pub username: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionsResponse {
    pub permissions: Vec<Permission>,
}

// Resultado da concessão: o cargo e o conjunto de permissões que ele carrega agora
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleGrantResponse {
    pub role: Role,
    pub warehouse_id: i64,
    pub username: String,
    pub permissions: Vec<Permission>,
}
