// src/db/zone_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::warehouse::Zone};

// Toda consulta passa pelo armazém para filtrar pelo dono
#[derive(Clone)]
pub struct ZoneRepository {
    pool: PgPool,
}

impl ZoneRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere a zona somente se o armazém pertence ao dono. `None` = armazém não encontrado.
    pub async fn create(
        &self,
        owner_id: Uuid,
        warehouse_id: i64,
        name: &str,
        capacity: i32,
    ) -> Result<Option<Zone>, AppError> {
        let zone = sqlx::query_as::<_, Zone>(
            r#"
            INSERT INTO zones (name, capacity, warehouse_id)
            SELECT $1, $2, w.id
            FROM warehouses w
            WHERE w.id = $3 AND w.owner_id = $4
            RETURNING id, name, capacity, warehouse_id
            "#,
        )
        .bind(name)
        .bind(capacity)
        .bind(warehouse_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(zone)
    }

    pub async fn find_all(&self, owner_id: Uuid, warehouse_id: i64) -> Result<Vec<Zone>, AppError> {
        let zones = sqlx::query_as::<_, Zone>(
            r#"
            SELECT z.id, z.name, z.capacity, z.warehouse_id
            FROM zones z
            JOIN warehouses w ON w.id = z.warehouse_id
            WHERE w.id = $1 AND w.owner_id = $2
            ORDER BY z.id
            "#,
        )
        .bind(warehouse_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(zones)
    }

    pub async fn find(&self, owner_id: Uuid, warehouse_id: i64, zone_id: i64) -> Result<Option<Zone>, AppError> {
        let zone = sqlx::query_as::<_, Zone>(
            r#"
            SELECT z.id, z.name, z.capacity, z.warehouse_id
            FROM zones z
            JOIN warehouses w ON w.id = z.warehouse_id
            WHERE z.id = $1 AND w.id = $2 AND w.owner_id = $3
            "#,
        )
        .bind(zone_id)
        .bind(warehouse_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(zone)
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        warehouse_id: i64,
        zone_id: i64,
        name: &str,
        capacity: i32,
    ) -> Result<Option<Zone>, AppError> {
        let zone = sqlx::query_as::<_, Zone>(
            r#"
            UPDATE zones z SET name = $1, capacity = $2
            FROM warehouses w
            WHERE z.id = $3 AND z.warehouse_id = w.id AND w.id = $4 AND w.owner_id = $5
            RETURNING z.id, z.name, z.capacity, z.warehouse_id
            "#,
        )
        .bind(name)
        .bind(capacity)
        .bind(zone_id)
        .bind(warehouse_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(zone)
    }

    pub async fn delete(&self, owner_id: Uuid, warehouse_id: i64, zone_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM zones z
            USING warehouses w
            WHERE z.id = $1 AND z.warehouse_id = w.id AND w.id = $2 AND w.owner_id = $3
            "#,
        )
        .bind(zone_id)
        .bind(warehouse_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
