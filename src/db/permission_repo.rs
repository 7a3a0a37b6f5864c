// src/db/permission_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    authz::{Action, PermissionStore},
    common::error::AppError,
    models::rbac::{Permission, Role},
};

// Permissões, cargos e concessões por armazém.
#[derive(Clone)]
pub struct PermissionRepository {
    pool: PgPool,
}

impl PermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all_permissions(&self) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>("SELECT id, name FROM permissions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(permissions)
    }

    // Cria o cargo ou devolve o existente com o mesmo nome (do mesmo dono).
    // O DO UPDATE no-op garante que o RETURNING traga a linha nos dois casos.
    pub async fn upsert_role<'e, E>(&self, executor: E, owner_id: Uuid, name: &str) -> Result<Role, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let role = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (owner_id, name)
            VALUES ($1, $2)
            ON CONFLICT (owner_id, name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, owner_id, name
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .fetch_one(executor)
        .await?;
        Ok(role)
    }

    // true = linha nova; false = a concessão já existia
    pub async fn grant_role<'e, E>(
        &self,
        executor: E,
        warehouse_id: i64,
        user_id: Uuid,
        role_id: i64,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO warehouse_user_roles (warehouse_id, user_id, role_id)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(warehouse_id)
        .bind(user_id)
        .bind(role_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn find_permissions_by_ids<'e, E>(&self, executor: E, ids: &[i64]) -> Result<Vec<Permission>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT id, name FROM permissions WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(executor)
        .await?;
        Ok(permissions)
    }

    pub async fn attach_permissions<'e, E>(&self, executor: E, role_id: i64, permission_ids: &[i64]) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO role_permissions (role_id, permission_id)
            SELECT $1, permission_id FROM UNNEST($2::BIGINT[]) AS t(permission_id)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(role_id)
        .bind(permission_ids)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn find_role_permissions<'e, E>(&self, executor: E, role_id: i64) -> Result<Vec<Permission>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let permissions = sqlx::query_as::<_, Permission>(
            r#"
            SELECT p.id, p.name
            FROM permissions p
            JOIN role_permissions rp ON rp.permission_id = p.id
            WHERE rp.role_id = $1
            ORDER BY p.id
            "#,
        )
        .bind(role_id)
        .fetch_all(executor)
        .await?;
        Ok(permissions)
    }

    // Remove a concessão do cargo `role_name` (do dono do armazém) ao usuário
    pub async fn revoke_role(
        &self,
        owner_id: Uuid,
        warehouse_id: i64,
        user_id: Uuid,
        role_name: &str,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM warehouse_user_roles wur
            USING roles r, warehouses w
            WHERE wur.role_id = r.id
              AND wur.warehouse_id = w.id
              AND w.id = $1
              AND w.owner_id = $2
              AND r.owner_id = $2
              AND r.name = $3
              AND wur.user_id = $4
            "#,
        )
        .bind(warehouse_id)
        .bind(owner_id)
        .bind(role_name)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    // Permissões efetivas do usuário no armazém, somando todos os cargos
    pub async fn find_user_permissions(&self, warehouse_id: i64, user_id: Uuid) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(
            r#"
            SELECT DISTINCT p.id, p.name
            FROM permissions p
            JOIN role_permissions rp ON rp.permission_id = p.id
            JOIN warehouse_user_roles wur ON wur.role_id = rp.role_id
            WHERE wur.warehouse_id = $1 AND wur.user_id = $2
            ORDER BY p.id
            "#,
        )
        .bind(warehouse_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(permissions)
    }
}

#[async_trait]
impl PermissionStore for PermissionRepository {
    async fn has_permission(&self, warehouse_id: i64, user_id: Uuid, action: Action) -> Result<bool, AppError> {
        let allowed: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM warehouse_user_roles wur
                JOIN role_permissions rp ON rp.role_id = wur.role_id
                JOIN permissions p ON p.id = rp.permission_id
                WHERE wur.warehouse_id = $1 AND wur.user_id = $2 AND p.name = $3
            )
            "#,
        )
        .bind(warehouse_id)
        .bind(user_id)
        .bind(action.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(allowed)
    }

    async fn warehouse_owner(&self, warehouse_id: i64) -> Result<Option<Uuid>, AppError> {
        let owner = sqlx::query_scalar::<_, Uuid>("SELECT owner_id FROM warehouses WHERE id = $1")
            .bind(warehouse_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }
}
