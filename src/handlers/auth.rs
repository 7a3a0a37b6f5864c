// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use crate::{
    authz::AuthContext,
    common::error::AppError,
    config::{AppState, Settings},
    models::auth::{
        AuthResponse, LoginByEmailPayload, LoginByPhonePayload, MessageResponse, RegisterUserPayload, User,
    },
    services::token::TokenPair,
};

pub const REFRESH_COOKIE: &str = "refresh-token";

// Cookie httpOnly com o refresh token; o access token vai no corpo
fn refresh_cookie(settings: &Settings, refresh_token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, refresh_token))
        .http_only(true)
        .secure(settings.secure_cookies)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::hours(settings.refresh_token_ttl_hours))
        .build()
}

fn session(app_state: &AppState, jar: CookieJar, pair: TokenPair) -> (CookieJar, Json<AuthResponse>) {
    let jar = jar.add(refresh_cookie(&app_state.settings, pair.refresh_token));
    (jar, Json(AuthResponse { access_token: pair.access_token }))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-up",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "Dados inválidos ou já cadastrados")
    )
)]
pub async fn sign_up(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<(StatusCode, Json<User>), AppError> {
    payload.validate()?;

    let user = app_state.auth_service.register(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in-email",
    tag = "Auth",
    request_body = LoginByEmailPayload,
    responses(
        (status = 200, description = "Autenticado; refresh token no cookie", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn sign_in_email(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginByEmailPayload>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    payload.validate()?;

    let pair = app_state
        .auth_service
        .login_by_email(&payload.email, &payload.password)
        .await?;
    Ok(session(&app_state, jar, pair))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/sign-in-phone",
    tag = "Auth",
    request_body = LoginByPhonePayload,
    responses(
        (status = 200, description = "Autenticado; refresh token no cookie", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn sign_in_phone(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginByPhonePayload>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    payload.validate()?;

    let pair = app_state
        .auth_service
        .login_by_phone(&payload.phone_number, &payload.password)
        .await?;
    Ok(session(&app_state, jar, pair))
}

// Aceita GET e POST; os dois tokens são renovados
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Auth",
    responses(
        (status = 200, description = "Novo par de tokens", body = AuthResponse),
        (status = 401, description = "Cookie ausente ou inválido")
    )
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .ok_or(AppError::InvalidToken)?;

    let pair = app_state.auth_service.refresh(&token).await?;
    Ok(session(&app_state, jar, pair))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Cookie removido", body = MessageResponse))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(Cookie::build(REFRESH_COOKIE).path("/"));
    (jar, Json(MessageResponse::new("Sessão encerrada")))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Perfil do usuário autenticado", body = User),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn me(State(app_state): State<AppState>, ctx: AuthContext) -> Result<Json<User>, AppError> {
    let user = app_state.auth_service.profile(ctx.caller_id()).await?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_settings;

    #[test]
    fn refresh_cookie_is_http_only_and_scoped_to_root() {
        let settings = test_settings();
        let cookie = refresh_cookie(&settings, "abc".into());

        assert_eq!(cookie.name(), REFRESH_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(settings.refresh_token_ttl_hours)));
    }

    #[tokio::test]
    async fn logout_expires_the_refresh_cookie() {
        let jar = CookieJar::new().add(Cookie::build((REFRESH_COOKIE, "abc")).path("/"));
        let (jar, Json(body)) = logout(jar).await;

        assert!(jar.get(REFRESH_COOKIE).is_none());
        assert_eq!(body.message, "Sessão encerrada");
    }
}
