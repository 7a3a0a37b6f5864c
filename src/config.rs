// src/config.rs

use std::{env, path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use anyhow::{Context, bail};
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    authz::AuthorizationEngine,
    db::{PermissionRepository, ProductRepository, UserRepository, WarehouseRepository, ZoneRepository},
    services::{
        auth::AuthService, password::PasswordHasher, product_service::ProductService, qr::QrGenerator,
        role_service::RoleService, token::TokenManager, warehouse_service::WarehouseService,
        zone_service::ZoneService,
    },
};

// Configuração carregada uma única vez na inicialização; imutável depois disso.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub server_addr: String,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub access_token_ttl_hours: i64,
    pub refresh_token_ttl_hours: i64,
    pub password_salt: String,
    pub bcrypt_cost: u32,
    pub qr_url_frontend: String,
    pub qr_storage_path: PathBuf,
    pub secure_cookies: bool,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let settings = Self {
            database_url: required("DATABASE_URL")?,
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8089".to_string()),
            access_token_secret: required("ACCESS_TOKEN_SECRET")?,
            refresh_token_secret: required("REFRESH_TOKEN_SECRET")?,
            access_token_ttl_hours: parsed_or("ACCESS_TOKEN_EXPIRY_HOURS", 1)?,
            refresh_token_ttl_hours: parsed_or("REFRESH_TOKEN_EXPIRY_HOURS", 24 * 7)?,
            password_salt: env::var("PASSWORD_SALT").unwrap_or_default(),
            bcrypt_cost: parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            qr_url_frontend: env::var("QR_URL_FRONTEND")
                .unwrap_or_else(|_| "http://localhost:3000/product/".to_string()),
            qr_storage_path: env::var("QR_STORAGE_PATH")
                .unwrap_or_else(|_| "qr_storage".to_string())
                .into(),
            secure_cookies: parsed_or("SECURE_COOKIES", false)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        // Um segredo de refresh vazado não pode forjar tokens de acesso, e vice-versa
        if self.access_token_secret == self.refresh_token_secret {
            bail!("ACCESS_TOKEN_SECRET e REFRESH_TOKEN_SECRET devem ser diferentes");
        }
        if self.access_token_ttl_hours <= 0 || self.refresh_token_ttl_hours <= 0 {
            bail!("a validade dos tokens deve ser positiva");
        }
        Ok(())
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} deve ser definida"))
}

fn parsed_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} inválida ({raw}): {e}")),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub settings: Arc<Settings>,
    pub auth_engine: AuthorizationEngine,
    pub auth_service: AuthService,
    pub warehouse_service: WarehouseService,
    pub zone_service: ZoneService,
    pub product_service: ProductService,
    pub role_service: RoleService,
}

impl AppState {
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, settings))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, settings: Settings) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let warehouse_repo = WarehouseRepository::new(db_pool.clone());
        let zone_repo = ZoneRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let permission_repo = PermissionRepository::new(db_pool.clone());

        let tokens = TokenManager::new(
            &settings.access_token_secret,
            &settings.refresh_token_secret,
            chrono::Duration::hours(settings.access_token_ttl_hours),
            chrono::Duration::hours(settings.refresh_token_ttl_hours),
        );
        let hasher = PasswordHasher::new(settings.password_salt.clone(), settings.bcrypt_cost);
        let qr = QrGenerator::new(settings.qr_url_frontend.clone(), settings.qr_storage_path.clone());

        let auth_engine = AuthorizationEngine::new(tokens.clone(), Arc::new(permission_repo.clone()));
        let auth_service = AuthService::new(user_repo.clone(), hasher, tokens);
        let warehouse_service = WarehouseService::new(warehouse_repo.clone());
        let zone_service = ZoneService::new(zone_repo, warehouse_repo.clone());
        let product_service = ProductService::new(product_repo, qr, db_pool.clone());
        let role_service = RoleService::new(permission_repo, user_repo, warehouse_repo, db_pool.clone());

        Self {
            db_pool,
            settings: Arc::new(settings),
            auth_engine,
            auth_service,
            warehouse_service,
            zone_service,
            product_service,
            role_service,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> Settings {
    Settings {
        database_url: "postgres://localhost/wareflow_test".into(),
        server_addr: "127.0.0.1:0".into(),
        access_token_secret: "access-secret-for-tests".into(),
        refresh_token_secret: "refresh-secret-for-tests".into(),
        access_token_ttl_hours: 1,
        refresh_token_ttl_hours: 24,
        password_salt: "pepper".into(),
        bcrypt_cost: 4,
        qr_url_frontend: "http://localhost:3000/product/".into(),
        qr_storage_path: std::env::temp_dir().join("wareflow-qr-tests"),
        secure_cookies: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_secrets_are_rejected() {
        let mut settings = test_settings();
        settings.refresh_token_secret = settings.access_token_secret.clone();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn non_positive_expiry_is_rejected() {
        let mut settings = test_settings();
        settings.access_token_ttl_hours = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_are_valid() {
        assert!(test_settings().validate().is_ok());
    }
}
