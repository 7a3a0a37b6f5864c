// src/handlers/product.rs

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
        warehouse::{Product, ProductPath, ProductPayload, WarehousePath, ZonePath},
    },
};

// A zona vem do caminho; `zone_id` no corpo é ignorado aqui
#[utoipa::path(
    post,
    path = "/api/v1/owner/warehouse/{warehouse_id}/zone/{zone_id}/product",
    tag = "Products",
    params(ZonePath),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto criado com QR Code", body = Product),
        (status = 404, description = "Armazém ou zona não encontrados")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<ZonePath>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .create(ctx.acting_as_id(), path.warehouse_id, path.zone_id, &payload)
        .await?;
    Ok(Json(product))
}

#[utoipa::path(
    get,
    path = "/api/v1/owner/warehouse/{warehouse_id}/zone/{zone_id}/product",
    tag = "Products",
    params(ZonePath),
    responses((status = 200, description = "Produtos da zona", body = [Product])),
    security(("api_jwt" = []))
)]
pub async fn list_zone_products(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<ZonePath>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state
        .product_service
        .list_by_zone(ctx.acting_as_id(), path.warehouse_id, path.zone_id)
        .await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/v1/owner/warehouse/{warehouse_id}/product",
    tag = "Products",
    params(WarehousePath),
    responses((status = 200, description = "Produtos de todas as zonas do armazém", body = [Product])),
    security(("api_jwt" = []))
)]
pub async fn list_warehouse_products(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<WarehousePath>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state
        .product_service
        .list_by_warehouse(ctx.acting_as_id(), path.warehouse_id)
        .await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/v1/owner/warehouse/{warehouse_id}/product/{product_id}",
    tag = "Products",
    params(ProductPath),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<ProductPath>,
) -> Result<Json<Product>, AppError> {
    let product = app_state
        .product_service
        .get(ctx.acting_as_id(), path.warehouse_id, path.product_id)
        .await?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/api/v1/owner/warehouse/{warehouse_id}/product/{product_id}",
    tag = "Products",
    params(ProductPath),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto ou zona de destino não encontrados")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<ProductPath>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>, AppError> {
    payload.validate()?;

    let product = app_state
        .product_service
        .update(ctx.acting_as_id(), path.warehouse_id, path.product_id, &payload)
        .await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/v1/owner/warehouse/{warehouse_id}/product/{product_id}",
    tag = "Products",
    params(ProductPath),
    responses(
        (status = 200, description = "Produto removido", body = MessageResponse),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    ctx: AuthContext,
    Path(path): Path<ProductPath>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state
        .product_service
        .delete(ctx.acting_as_id(), path.warehouse_id, path.product_id)
        .await?;
    Ok(Json(MessageResponse::new("Produto removido")))
}
