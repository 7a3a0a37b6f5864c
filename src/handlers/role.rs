// src/handlers/role.rs

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
        rbac::{EmployeeLookupPayload, GrantRolePayload, PermissionsResponse, RevokeRolePayload, RoleGrantResponse},
        warehouse::WarehousePath,
    },
};

#[utoipa::path(
    post,
    path = "/api/v1/owner/role/{warehouse_id}",
    tag = "Roles",
    params(WarehousePath),
    request_body = GrantRolePayload,
    responses(
        (status = 200, description = "Cargo concedido (idempotente)", body = RoleGrantResponse),
        (status = 404, description = "Armazém, funcionário ou permissão não encontrados")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<WarehousePath>,
    Json(payload): Json<GrantRolePayload>,
) -> Result<Json<RoleGrantResponse>, AppError> {
    payload.validate()?;

    let grant = app_state
        .role_service
        .create_role(ctx.acting_as_id(), path.warehouse_id, &payload)
        .await?;
    Ok(Json(grant))
}

#[utoipa::path(
    delete,
    path = "/api/v1/owner/role/{warehouse_id}",
    tag = "Roles",
    params(WarehousePath),
    request_body = RevokeRolePayload,
    responses(
        (status = 200, description = "Concessão removida", body = MessageResponse),
        (status = 404, description = "Armazém, funcionário ou concessão não encontrados")
    ),
    security(("api_jwt" = []))
)]
pub async fn revoke_role(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<WarehousePath>,
    Json(payload): Json<RevokeRolePayload>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    app_state
        .role_service
        .revoke_role(ctx.acting_as_id(), path.warehouse_id, &payload)
        .await?;
    Ok(Json(MessageResponse::new("Cargo revogado")))
}

#[utoipa::path(
    post,
    path = "/api/v1/owner/role/permission/{warehouse_id}",
    tag = "Roles",
    params(WarehousePath),
    request_body = EmployeeLookupPayload,
    responses((status = 200, description = "Permissões do funcionário no armazém", body = PermissionsResponse)),
    security(("api_jwt" = []))
)]
pub async fn employee_permissions(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<WarehousePath>,
    Json(payload): Json<EmployeeLookupPayload>,
) -> Result<Json<PermissionsResponse>, AppError> {
    payload.validate()?;

    let permissions = app_state
        .role_service
        .employee_permissions(ctx.acting_as_id(), path.warehouse_id, &payload.username)
        .await?;
    Ok(Json(PermissionsResponse { permissions }))
}

// Grupo self_perm: responde com as permissões de quem chamou, não do dono
#[utoipa::path(
    get,
    path = "/api/v1/employer/warehouse/{warehouse_id}/{action}/permissions",
    tag = "Roles",
    params(
        ("warehouse_id" = i64, Path, description = "ID do armazém"),
        ("action" = String, Path, description = "get_my_permissions")
    ),
    responses(
        (status = 200, description = "Permissões do chamador no armazém", body = PermissionsResponse),
        (status = 403, description = "Sem permissão")
    ),
    security(("api_jwt" = []))
)]
pub async fn my_permissions(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<WarehousePath>,
) -> Result<Json<PermissionsResponse>, AppError> {
    let permissions = app_state
        .role_service
        .my_permissions(ctx.caller_id(), path.warehouse_id)
        .await?;
    Ok(Json(PermissionsResponse { permissions }))
}

#[utoipa::path(
    get,
    path = "/api/v1/permissions",
    tag = "Roles",
    responses((status = 200, description = "Todos os tipos de permissão", body = PermissionsResponse)),
    security(("api_jwt" = []))
)]
pub async fn list_permissions(State(app_state): State<AppState>) -> Result<Json<PermissionsResponse>, AppError> {
    let permissions = app_state.role_service.list_permissions().await?;
    Ok(Json(PermissionsResponse { permissions }))
}
