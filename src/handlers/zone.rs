// src/handlers/zone.rs

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
        warehouse::{WarehousePath, Zone, ZonePath, ZonePayload},
    },
};

#[utoipa::path(
    post,
    path = "/api/v1/owner/warehouse/{warehouse_id}/zone",
    tag = "Zones",
    params(WarehousePath),
    request_body = ZonePayload,
    responses(
        (status = 200, description = "Zona criada", body = Zone),
        (status = 404, description = "Armazém não existe ou não é seu")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_zone(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<WarehousePath>,
    Json(payload): Json<ZonePayload>,
) -> Result<Json<Zone>, AppError> {
    payload.validate()?;

    let zone = app_state
        .zone_service
        .create(ctx.acting_as_id(), path.warehouse_id, &payload)
        .await?;
    Ok(Json(zone))
}

#[utoipa::path(
    get,
    path = "/api/v1/owner/warehouse/{warehouse_id}/zone",
    tag = "Zones",
    params(WarehousePath),
    responses((status = 200, description = "Zonas do armazém", body = [Zone])),
    security(("api_jwt" = []))
)]
pub async fn list_zones(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<WarehousePath>,
) -> Result<Json<Vec<Zone>>, AppError> {
    let zones = app_state
        .zone_service
        .list(ctx.acting_as_id(), path.warehouse_id)
        .await?;
    Ok(Json(zones))
}

#[utoipa::path(
    get,
    path = "/api/v1/owner/warehouse/{warehouse_id}/zone/{zone_id}",
    tag = "Zones",
    params(ZonePath),
    responses(
        (status = 200, description = "Zona", body = Zone),
        (status = 404, description = "Zona não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_zone(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<ZonePath>,
) -> Result<Json<Zone>, AppError> {
    let zone = app_state
        .zone_service
        .get(ctx.acting_as_id(), path.warehouse_id, path.zone_id)
        .await?;
    Ok(Json(zone))
}

#[utoipa::path(
    put,
    path = "/api/v1/owner/warehouse/{warehouse_id}/zone/{zone_id}",
    tag = "Zones",
    params(ZonePath),
    request_body = ZonePayload,
    responses(
        (status = 200, description = "Zona atualizada", body = Zone),
        (status = 404, description = "Zona não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_zone(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<ZonePath>,
    Json(payload): Json<ZonePayload>,
) -> Result<Json<Zone>, AppError> {
    payload.validate()?;

    let zone = app_state
        .zone_service
        .update(ctx.acting_as_id(), path.warehouse_id, path.zone_id, &payload)
        .await?;
    Ok(Json(zone))
}

#[utoipa::path(
    delete,
    path = "/api/v1/owner/warehouse/{warehouse_id}/zone/{zone_id}",
    tag = "Zones",
    params(ZonePath),
    responses(
        (status = 200, description = "Zona removida", body = MessageResponse),
        (status = 404, description = "Zona não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_zone(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<ZonePath>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state
        .zone_service
        .delete(ctx.acting_as_id(), path.warehouse_id, path.zone_id)
        .await?;
    Ok(Json(MessageResponse::new("Zona removida")))
}
