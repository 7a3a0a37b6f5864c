// src/models/warehouse.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Warehouse (O Armazém)
// ---
// Um dono por armazém; o nome é único por dono.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub address: String,
    #[schema(ignore)]
    #[serde(skip_serializing)]
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WarehousePayload {
    #[validate(length(min = 1, max = 128, message = "O nome do armazém é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

// ---
// 2. Zone (A Zona dentro do armazém)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    pub warehouse_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ZonePayload {
    #[validate(length(min = 1, max = 128, message = "O nome da zona é obrigatório."))]
    pub name: String,
    #[validate(range(min = 0, message = "A capacidade não pode ser negativa."))]
    #[serde(default)]
    pub capacity: i32,
}

// ---
// 3. Product (O Produto, sempre dentro de uma zona)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub count: i64,
    pub description: String,
    // Vazio entre o INSERT e a gravação do QR Code
    pub qr_path: String,
    pub zone_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 256, message = "O título do produto é obrigatório."))]
    pub title: String,
    #[validate(range(min = 0, message = "A quantidade não pode ser negativa."))]
    pub count: i64,
    #[serde(default)]
    pub description: String,
    // Só na atualização: zona de destino para mover o produto (None mantém a atual)
    pub zone_id: Option<i64>,
}

// Funcionário com algum cargo no armazém
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Employer {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

// ---
// 4. Parâmetros de caminho
// ---
// As rotas delegadas também trazem `{action}`; campos extras são ignorados,
// então os mesmos handlers servem donos e funcionários.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct WarehousePath {
    pub warehouse_id: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct ZonePath {
    pub warehouse_id: i64,
    pub zone_id: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct ProductPath {
    pub warehouse_id: i64,
    pub product_id: Uuid,
}
