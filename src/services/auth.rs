// src/services/auth.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{UserRepository, user_repo::NewUser},
    models::auth::{RegisterUserPayload, User},
    services::{
        password::PasswordHasher,
        token::{TokenManager, TokenPair},
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    hasher: PasswordHasher,
    tokens: TokenManager,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, hasher: PasswordHasher, tokens: TokenManager) -> Self {
        Self { user_repo, hasher, tokens }
    }

    pub async fn register(&self, payload: &RegisterUserPayload) -> Result<User, AppError> {
        // 1. Só donos e funcionários se cadastram sozinhos
        if !payload.role.is_self_registrable() {
            return Err(AppError::BadRequest(format!(
                "o papel '{}' não pode ser escolhido no cadastro",
                payload.role
            )));
        }

        // 2. Hashing fora do banco
        let password_hash = self.hasher.hash(&payload.password).await?;

        // 3. Duplicidades viram conflitos tipados no repositório
        let user = self
            .user_repo
            .create_user(NewUser {
                username: &payload.username,
                first_name: &payload.first_name,
                last_name: &payload.last_name,
                surname: &payload.surname,
                email: &payload.email,
                phone_number: &payload.phone_number,
                password_hash: &password_hash,
                role: payload.role,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "usuário cadastrado");
        Ok(user)
    }

    pub async fn login_by_email(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self.user_repo.find_by_email(email).await?;
        self.login(user, password).await
    }

    pub async fn login_by_phone(&self, phone_number: &str, password: &str) -> Result<TokenPair, AppError> {
        let user = self.user_repo.find_by_phone(phone_number).await?;
        self.login(user, password).await
    }

    // Usuário inexistente e senha errada dão o mesmo erro
    async fn login(&self, user: Option<User>, password: &str) -> Result<TokenPair, AppError> {
        let user = user.ok_or(AppError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "senha incorreta");
            return Err(AppError::InvalidCredentials);
        }

        self.tokens.issue_pair(user.id, user.role)
    }

    /// Troca um refresh token válido por um novo par. O papel é relido do banco.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.tokens.decode_refresh(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        self.tokens.issue_pair(user.id, user.role)
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::{
        authz::engine::tests::test_tokens,
        models::auth::UserRole,
        services::token::{extract_subject, verify},
    };

    const ACCESS_SECRET: &str = "access-secret-for-tests";

    fn service(pool: PgPool) -> AuthService {
        AuthService::new(UserRepository::new(pool), PasswordHasher::new("pepper".into(), 4), test_tokens())
    }

    fn payload(username: &str, role: UserRole) -> RegisterUserPayload {
        RegisterUserPayload {
            username: username.into(),
            first_name: "Ana".into(),
            last_name: String::new(),
            surname: String::new(),
            email: format!("{username}@example.com"),
            phone_number: format!("+55{}", username.len() * 1111111),
            password: "s3cret-pass".into(),
            role,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn login_yields_token_for_the_registered_user(pool: PgPool) {
        let auth = service(pool);
        let user = auth.register(&payload("alice", UserRole::Owner)).await.unwrap();

        let pair = auth.login_by_email("alice@example.com", "s3cret-pass").await.unwrap();
        assert!(verify(&pair.access_token, ACCESS_SECRET));
        assert_eq!(extract_subject(&pair.access_token, ACCESS_SECRET).unwrap(), user.id);

        let by_phone = auth.login_by_phone(&user.phone_number, "s3cret-pass").await.unwrap();
        assert_eq!(extract_subject(&by_phone.access_token, ACCESS_SECRET).unwrap(), user.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn wrong_password_and_unknown_user_fail_alike(pool: PgPool) {
        let auth = service(pool);
        auth.register(&payload("bruno", UserRole::Employer)).await.unwrap();

        let wrong = auth.login_by_email("bruno@example.com", "nope").await;
        let unknown = auth.login_by_email("ghost@example.com", "s3cret-pass").await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
        assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn duplicate_email_is_a_conflict(pool: PgPool) {
        let auth = service(pool);
        auth.register(&payload("carla", UserRole::Owner)).await.unwrap();

        let mut again = payload("carla2", UserRole::Owner);
        again.email = "carla@example.com".into();
        let result = auth.register(&again).await;
        assert!(matches!(result, Err(AppError::EmailAlreadyExists)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn admin_role_cannot_self_register(pool: PgPool) {
        let auth = service(pool);
        let result = auth.register(&payload("root", UserRole::Admin)).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn refresh_rotates_the_pair_and_rejects_access_tokens(pool: PgPool) {
        let auth = service(pool);
        let user = auth.register(&payload("diego", UserRole::Owner)).await.unwrap();
        let pair = auth.login_by_email("diego@example.com", "s3cret-pass").await.unwrap();

        let rotated = auth.refresh(&pair.refresh_token).await.unwrap();
        assert_eq!(extract_subject(&rotated.access_token, ACCESS_SECRET).unwrap(), user.id);

        let misuse = auth.refresh(&pair.access_token).await;
        assert!(matches!(misuse, Err(AppError::InvalidToken)));
    }
}
