// src/db/warehouse_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::warehouse::{Employer, Warehouse},
};

#[derive(Clone)]
pub struct WarehouseRepository {
    pool: PgPool,
}

impl WarehouseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn owner_has_warehouse_with_name(&self, owner_id: Uuid, name: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM warehouses WHERE owner_id = $1 AND name = $2)",
        )
        .bind(owner_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn create(&self, owner_id: Uuid, name: &str, address: &str) -> Result<Warehouse, AppError> {
        sqlx::query_as::<_, Warehouse>(
            r#"
            INSERT INTO warehouses (name, address, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, address, owner_id, created_at
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from_unique_violation(e) {
            // A constraint fecha a corrida entre a pré-checagem e o INSERT
            AppError::UniqueConstraintViolation(_) => AppError::WarehouseAlreadyExists(name.to_string()),
            other => other,
        })
    }

    pub async fn find_all_by_owner(&self, owner_id: Uuid) -> Result<Vec<Warehouse>, AppError> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, address, owner_id, created_at FROM warehouses WHERE owner_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(warehouses)
    }

    // Aceita executor: também é usado dentro da transação de concessão de cargo
    pub async fn find_owned<'e, E>(&self, executor: E, owner_id: Uuid, id: i64) -> Result<Option<Warehouse>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, address, owner_id, created_at FROM warehouses WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await?;
        Ok(warehouse)
    }

    pub async fn update(&self, owner_id: Uuid, id: i64, name: &str, address: &str) -> Result<Option<Warehouse>, AppError> {
        sqlx::query_as::<_, Warehouse>(
            r#"
            UPDATE warehouses SET name = $1, address = $2
            WHERE id = $3 AND owner_id = $4
            RETURNING id, name, address, owner_id, created_at
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match AppError::from_unique_violation(e) {
            AppError::UniqueConstraintViolation(_) => AppError::WarehouseAlreadyExists(name.to_string()),
            other => other,
        })
    }

    // Retorna o número de linhas removidas (0 = não existe ou não é seu)
    pub async fn delete(&self, owner_id: Uuid, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM warehouses WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // Usuários com algum cargo no armazém (sem duplicatas)
    pub async fn find_employers(&self, warehouse_id: i64) -> Result<Vec<Employer>, AppError> {
        let employers = sqlx::query_as::<_, Employer>(
            r#"
            SELECT DISTINCT u.id, u.username, u.first_name, u.last_name, u.email
            FROM users u
            JOIN warehouse_user_roles wur ON wur.user_id = u.id
            WHERE wur.warehouse_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(warehouse_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(employers)
    }

    // Armazéns em que o funcionário possui algum cargo
    pub async fn find_for_employer(&self, employer_id: Uuid) -> Result<Vec<Warehouse>, AppError> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            r#"
            SELECT DISTINCT w.id, w.name, w.address, w.owner_id, w.created_at
            FROM warehouses w
            JOIN warehouse_user_roles wur ON wur.warehouse_id = w.id
            WHERE wur.user_id = $1
            ORDER BY w.id
            "#,
        )
        .bind(employer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(warehouses)
    }
}
