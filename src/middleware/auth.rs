// src/middleware/auth.rs

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{
    authz::{AuthContext, AuthorizationEngine},
    common::error::AppError,
    models::auth::UserRole,
};

// Etapa A: Bearer token -> AuthContext nos extensions da requisição
pub async fn auth_guard(
    State(engine): State<AuthorizationEngine>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let ctx = engine.authenticate(header)?;

    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}

// Guarda do papel global. Uso: `from_fn_with_state(UserRole::Owner, require_role)`.
// Precisa rodar depois do `auth_guard`.
pub async fn require_role(
    State(required): State<UserRole>,
    ctx: AuthContext,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if ctx.caller_role() != required {
        tracing::debug!(user_id = %ctx.caller_id(), role = %ctx.caller_role(), %required, "papel global recusado");
        return Err(AppError::RoleRequired(required.as_str()));
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::authz::engine::tests::{InMemoryStore, test_tokens};

    async fn whoami(ctx: AuthContext) -> String {
        ctx.caller_id().to_string()
    }

    fn app(engine: AuthorizationEngine) -> Router {
        let owner_only = Router::new()
            .route("/owner", get(whoami))
            .layer(from_fn_with_state(UserRole::Owner, require_role));

        Router::new()
            .route("/me", get(whoami))
            .merge(owner_only)
            .layer(from_fn_with_state(engine, auth_guard))
    }

    fn engine() -> AuthorizationEngine {
        AuthorizationEngine::new(test_tokens(), Arc::new(InMemoryStore::default()))
    }

    async fn call(app: Router, uri: &str, authorization: Option<String>) -> (StatusCode, String) {
        let mut builder = HttpRequest::builder().uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler_with_its_subject() {
        let engine = engine();
        let user_id = Uuid::new_v4();
        let pair = engine.tokens().issue_pair(user_id, UserRole::Employer).unwrap();

        let (status, body) = call(app(engine), "/me", Some(format!("Bearer {}", pair.access_token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user_id.to_string());
    }

    #[tokio::test]
    async fn missing_or_malformed_token_is_401() {
        let engine = engine();
        let pair = engine.tokens().issue_pair(Uuid::new_v4(), UserRole::Owner).unwrap();

        for header in [None, Some("Token abc".to_string()), Some("Bearer ".to_string()), Some(pair.refresh_token)] {
            let (status, body) = call(app(engine.clone()), "/me", header).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("error"));
        }
    }

    #[tokio::test]
    async fn global_role_guard_rejects_other_roles() {
        let engine = engine();
        let employer = engine.tokens().issue_pair(Uuid::new_v4(), UserRole::Employer).unwrap();
        let owner = engine.tokens().issue_pair(Uuid::new_v4(), UserRole::Owner).unwrap();

        let (status, _) = call(app(engine.clone()), "/owner", Some(format!("Bearer {}", employer.access_token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = call(app(engine), "/owner", Some(format!("Bearer {}", owner.access_token))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
