// src/routes.rs

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use utoipa::OpenApi;

use crate::{
    authz::{AuthorizationEngine, PermissionGroup},
    config::AppState,
    docs::ApiDoc,
    handlers::{auth, product, qr, role, warehouse, zone},
    middleware::{
        auth::{auth_guard, require_role},
        permission::{PermissionGate, warehouse_guard},
    },
    models::auth::UserRole,
};

// Anexa a Etapa B com o grupo fixo das rotas de `routes`
fn delegated(engine: &AuthorizationEngine, group: PermissionGroup, routes: Router<AppState>) -> Router<AppState> {
    routes.route_layer(from_fn_with_state(
        PermissionGate::new(engine.clone(), group),
        warehouse_guard,
    ))
}

pub fn router(state: AppState) -> Router {
    let engine = state.auth_engine.clone();

    // --- Públicas ---
    let auth_routes = Router::new()
        .route("/sign-up", post(auth::sign_up))
        .route("/sign-in-email", post(auth::sign_in_email))
        .route("/sign-in-phone", post(auth::sign_in_phone))
        .route("/refresh", get(auth::refresh).post(auth::refresh))
        .route("/logout", post(auth::logout));

    // --- Qualquer usuário autenticado ---
    let user_routes = Router::new()
        .route("/users/me", get(auth::me))
        .route("/permissions", get(role::list_permissions))
        .route_layer(from_fn_with_state(engine.clone(), auth_guard));

    // --- Dono: age sobre os próprios armazéns ---
    let owner_routes = Router::new()
        .route("/warehouse", post(warehouse::create_warehouse).get(warehouse::list_warehouses))
        .route(
            "/warehouse/{warehouse_id}",
            get(warehouse::get_warehouse)
                .put(warehouse::update_warehouse)
                .delete(warehouse::delete_warehouse),
        )
        .route("/warehouse/{warehouse_id}/employers", get(warehouse::list_employers))
        .route("/warehouse/{warehouse_id}/zone", post(zone::create_zone).get(zone::list_zones))
        .route(
            "/warehouse/{warehouse_id}/zone/{zone_id}",
            get(zone::get_zone).put(zone::update_zone).delete(zone::delete_zone),
        )
        .route(
            "/warehouse/{warehouse_id}/zone/{zone_id}/product",
            post(product::create_product).get(product::list_zone_products),
        )
        .route("/warehouse/{warehouse_id}/product", get(product::list_warehouse_products))
        .route(
            "/warehouse/{warehouse_id}/product/{product_id}",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route("/role/{warehouse_id}", post(role::create_role).delete(role::revoke_role))
        .route("/role/permission/{warehouse_id}", post(role::employee_permissions))
        .route_layer(from_fn_with_state(UserRole::Owner, require_role))
        .route_layer(from_fn_with_state(engine.clone(), auth_guard));

    // --- Funcionário: toda rota delegada carrega {warehouse_id}/{action} ---
    let warehouse_group = Router::new()
        .route(
            "/warehouse/{warehouse_id}/{action}",
            get(warehouse::get_warehouse).put(warehouse::update_warehouse),
        )
        .route("/warehouse/{warehouse_id}/{action}/employers", get(warehouse::list_employers));

    let zone_group = Router::new()
        .route("/warehouse/{warehouse_id}/{action}/zone", post(zone::create_zone).get(zone::list_zones))
        .route(
            "/warehouse/{warehouse_id}/{action}/zone/{zone_id}",
            get(zone::get_zone).put(zone::update_zone).delete(zone::delete_zone),
        );

    let product_group = Router::new()
        .route(
            "/warehouse/{warehouse_id}/{action}/zone/{zone_id}/product",
            post(product::create_product).get(product::list_zone_products),
        )
        .route("/warehouse/{warehouse_id}/{action}/product", get(product::list_warehouse_products))
        .route(
            "/warehouse/{warehouse_id}/{action}/product/{product_id}",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        );

    let role_group = Router::new()
        .route("/warehouse/{warehouse_id}/{action}/role", post(role::create_role).delete(role::revoke_role))
        .route("/warehouse/{warehouse_id}/{action}/role/permission", post(role::employee_permissions));

    let self_group = Router::new().route("/warehouse/{warehouse_id}/{action}/permissions", get(role::my_permissions));

    let employer_routes = Router::new()
        .route("/warehouses", get(warehouse::my_workplaces))
        .merge(delegated(&engine, PermissionGroup::Warehouse, warehouse_group))
        .merge(delegated(&engine, PermissionGroup::Zone, zone_group))
        .merge(delegated(&engine, PermissionGroup::Product, product_group))
        .merge(delegated(&engine, PermissionGroup::Role, role_group))
        .merge(delegated(&engine, PermissionGroup::SelfPerm, self_group))
        .route_layer(from_fn_with_state(UserRole::Employer, require_role))
        .route_layer(from_fn_with_state(engine, auth_guard));

    let api = Router::new()
        .nest("/auth", auth_routes)
        .merge(user_routes)
        .nest("/owner", owner_routes)
        .nest("/employer", employer_routes)
        .route("/qr_storage/{file}", get(qr::serve_qr));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/v1", api)
        .with_state(state)
}
