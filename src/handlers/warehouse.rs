// src/handlers/warehouse.rs
//
// Os handlers sempre usam `acting_as_id`: nas rotas do dono é ele mesmo, nas
// rotas delegadas é o dono resolvido pela autorização.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::{
    authz::AuthContext,
    common::error::AppError,
    config::AppState,
    models::{
        auth::MessageResponse,
        warehouse::{Employer, Warehouse, WarehousePath, WarehousePayload},
    },
};

#[utoipa::path(
    post,
    path = "/api/v1/owner/warehouse",
    tag = "Warehouses",
    request_body = WarehousePayload,
    responses(
        (status = 200, description = "Armazém criado", body = Warehouse),
        (status = 400, description = "Nome já usado por este dono")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_warehouse(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<WarehousePayload>,
) -> Result<Json<Warehouse>, AppError> {
    payload.validate()?;

    let warehouse = app_state
        .warehouse_service
        .create(ctx.acting_as_id(), &payload)
        .await?;
    Ok(Json(warehouse))
}

#[utoipa::path(
    get,
    path = "/api/v1/owner/warehouse",
    tag = "Warehouses",
    responses((status = 200, description = "Armazéns do dono", body = [Warehouse])),
    security(("api_jwt" = []))
)]
pub async fn list_warehouses(
    State(app_state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<Warehouse>>, AppError> {
    let warehouses = app_state.warehouse_service.list(ctx.acting_as_id()).await?;
    Ok(Json(warehouses))
}

#[utoipa::path(
    get,
    path = "/api/v1/owner/warehouse/{warehouse_id}",
    tag = "Warehouses",
    params(WarehousePath),
    responses(
        (status = 200, description = "Armazém", body = Warehouse),
        (status = 404, description = "Não existe ou não é seu")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_warehouse(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<WarehousePath>,
) -> Result<Json<Warehouse>, AppError> {
    let warehouse = app_state
        .warehouse_service
        .get(ctx.acting_as_id(), path.warehouse_id)
        .await?;
    Ok(Json(warehouse))
}

#[utoipa::path(
    put,
    path = "/api/v1/owner/warehouse/{warehouse_id}",
    tag = "Warehouses",
    params(WarehousePath),
    request_body = WarehousePayload,
    responses(
        (status = 200, description = "Armazém atualizado", body = Warehouse),
        (status = 404, description = "Não existe ou não é seu")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_warehouse(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<WarehousePath>,
    Json(payload): Json<WarehousePayload>,
) -> Result<Json<Warehouse>, AppError> {
    payload.validate()?;

    let warehouse = app_state
        .warehouse_service
        .update(ctx.acting_as_id(), path.warehouse_id, &payload)
        .await?;
    Ok(Json(warehouse))
}

#[utoipa::path(
    delete,
    path = "/api/v1/owner/warehouse/{warehouse_id}",
    tag = "Warehouses",
    params(WarehousePath),
    responses(
        (status = 200, description = "Armazém removido", body = MessageResponse),
        (status = 404, description = "Não existe ou não é seu")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_warehouse(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<WarehousePath>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state
        .warehouse_service
        .delete(ctx.acting_as_id(), path.warehouse_id)
        .await?;
    Ok(Json(MessageResponse::new("Armazém removido")))
}

#[utoipa::path(
    get,
    path = "/api/v1/owner/warehouse/{warehouse_id}/employers",
    tag = "Warehouses",
    params(WarehousePath),
    responses((status = 200, description = "Funcionários com algum cargo no armazém", body = [Employer])),
    security(("api_jwt" = []))
)]
pub async fn list_employers(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<WarehousePath>,
) -> Result<Json<Vec<Employer>>, AppError> {
    let employers = app_state
        .warehouse_service
        .employers(ctx.acting_as_id(), path.warehouse_id)
        .await?;
    Ok(Json(employers))
}

// Visão do funcionário (sem delegação): onde ele trabalha
#[utoipa::path(
    get,
    path = "/api/v1/employer/warehouses",
    tag = "Warehouses",
    responses((status = 200, description = "Armazéns em que o funcionário tem cargo", body = [Warehouse])),
    security(("api_jwt" = []))
)]
pub async fn my_workplaces(
    State(app_state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<Warehouse>>, AppError> {
    let warehouses = app_state
        .warehouse_service
        .employer_warehouses(ctx.caller_id())
        .await?;
    Ok(Json(warehouses))
}
