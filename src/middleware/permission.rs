// src/middleware/permission.rs

use std::collections::HashMap;

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    authz::{AuthContext, AuthorizationEngine, PermissionGroup},
    common::error::AppError,
};

// O grupo é fixado quando a rota é registrada; a requisição só escolhe a ação.
#[derive(Clone)]
pub struct PermissionGate {
    engine: AuthorizationEngine,
    group: PermissionGroup,
}

impl PermissionGate {
    pub fn new(engine: AuthorizationEngine, group: PermissionGroup) -> Self {
        Self { engine, group }
    }
}

/// Etapa B. Lê `{warehouse_id}` e `{action}` do caminho, autoriza e troca o
/// contexto pelo do dono do armazém. Registrar com `route_layer` para que os
/// parâmetros do caminho já estejam disponíveis.
pub async fn warehouse_guard(
    State(gate): State<PermissionGate>,
    ctx: AuthContext,
    Path(params): Path<HashMap<String, String>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let warehouse_id = params
        .get("warehouse_id")
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or_else(|| AppError::BadRequest("warehouse_id inválido".to_string()))?;

    let action = params.get("action").map(String::as_str).unwrap_or_default();

    let authorized = gate.engine.authorize(ctx, warehouse_id, gate.group, action).await?;

    request.extensions_mut().insert(authorized);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode, header::AUTHORIZATION},
        middleware::from_fn_with_state,
        routing::get,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::{
        authz::{
            Action,
            engine::tests::{InMemoryStore, test_tokens},
        },
        middleware::auth::auth_guard,
        models::auth::UserRole,
    };

    // Devolve "<quem chamou>:<em nome de quem>"
    async fn scope(ctx: AuthContext) -> String {
        format!("{}:{}", ctx.caller_id(), ctx.acting_as_id())
    }

    fn app(store: InMemoryStore) -> (Router, AuthorizationEngine) {
        let engine = AuthorizationEngine::new(test_tokens(), Arc::new(store));

        let zone = Router::new()
            .route("/warehouse/{warehouse_id}/{action}/zone", get(scope))
            .route_layer(from_fn_with_state(
                PermissionGate::new(engine.clone(), PermissionGroup::Zone),
                warehouse_guard,
            ));
        let product = Router::new()
            .route("/warehouse/{warehouse_id}/{action}/product", get(scope))
            .route_layer(from_fn_with_state(
                PermissionGate::new(engine.clone(), PermissionGroup::Product),
                warehouse_guard,
            ));

        let router = Router::new()
            .merge(zone)
            .merge(product)
            .layer(from_fn_with_state(engine.clone(), auth_guard));
        (router, engine)
    }

    async fn get_as(router: Router, engine: &AuthorizationEngine, user_id: Uuid, uri: &str) -> (StatusCode, String) {
        let pair = engine.tokens().issue_pair(user_id, UserRole::Employer).unwrap();
        let request = HttpRequest::builder()
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {}", pair.access_token))
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn granted_employee_runs_as_the_owner() {
        let owner = Uuid::new_v4();
        let employee = Uuid::new_v4();
        let (router, engine) = app(
            InMemoryStore::default()
                .with_warehouse(7, owner)
                .with_grant(7, employee, Action::ProductManage),
        );

        let (status, body) = get_as(router, &engine, employee, "/warehouse/7/product_manage/product").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, format!("{employee}:{owner}"));
    }

    #[tokio::test]
    async fn action_from_another_group_is_403() {
        let employee = Uuid::new_v4();
        let (router, engine) = app(
            InMemoryStore::default()
                .with_warehouse(7, Uuid::new_v4())
                .with_grant(7, employee, Action::ProductManage),
        );

        let (status, body) = get_as(router, &engine, employee, "/warehouse/7/product_manage/zone").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body.contains("zone"));
    }

    #[tokio::test]
    async fn missing_grant_and_missing_warehouse_look_the_same() {
        let employee = Uuid::new_v4();
        let (router, engine) = app(InMemoryStore::default().with_warehouse(7, Uuid::new_v4()));

        let (no_grant, body_a) = get_as(router.clone(), &engine, employee, "/warehouse/7/zone_manage/zone").await;
        let (no_house, body_b) = get_as(router, &engine, employee, "/warehouse/404/zone_manage/zone").await;

        assert_eq!(no_grant, StatusCode::FORBIDDEN);
        assert_eq!(no_house, StatusCode::FORBIDDEN);
        assert_eq!(body_a, body_b);
    }

    #[tokio::test]
    async fn non_numeric_warehouse_id_is_400() {
        let (router, engine) = app(InMemoryStore::default());
        let (status, _) = get_as(router, &engine, Uuid::new_v4(), "/warehouse/abc/zone_manage/zone").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn no_token_never_reaches_permission_resolution() {
        let (router, _) = app(InMemoryStore::default());

        let response = router
            .oneshot(HttpRequest::builder().uri("/warehouse/7/zone_manage/zone").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
