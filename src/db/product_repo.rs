// src/db/product_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::warehouse::Product};

const PRODUCT_COLUMNS: &str = "p.id, p.title, p.count, p.description, p.qr_path, p.zone_id";

pub struct ProductFields<'a> {
    pub title: &'a str,
    pub count: i64,
    pub description: &'a str,
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn warehouse_is_owned<'e, E>(&self, executor: E, owner_id: Uuid, warehouse_id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM warehouses WHERE id = $1 AND owner_id = $2)")
                .bind(warehouse_id)
                .bind(owner_id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    pub async fn zone_in_warehouse<'e, E>(&self, executor: E, warehouse_id: i64, zone_id: i64) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM zones WHERE id = $1 AND warehouse_id = $2)")
                .bind(zone_id)
                .bind(warehouse_id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    // Fase 1 da criação: a linha nasce com qr_path vazio
    pub async fn insert<'e, E>(&self, executor: E, zone_id: i64, fields: &ProductFields<'_>) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (title, count, description, qr_path, zone_id)
            VALUES ($1, $2, $3, '', $4)
            RETURNING id, title, count, description, qr_path, zone_id
            "#,
        )
        .bind(fields.title)
        .bind(fields.count)
        .bind(fields.description)
        .bind(zone_id)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    // Fase 2: grava o caminho do QR Code na mesma linha
    pub async fn set_qr_path<'e, E>(&self, executor: E, product_id: Uuid, qr_path: &str) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET qr_path = $1
            WHERE id = $2
            RETURNING id, title, count, description, qr_path, zone_id
            "#,
        )
        .bind(qr_path)
        .bind(product_id)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    pub async fn find_in_warehouse(
        &self,
        owner_id: Uuid,
        warehouse_id: i64,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products p
            JOIN zones z ON z.id = p.zone_id
            JOIN warehouses w ON w.id = z.warehouse_id
            WHERE p.id = $1 AND w.id = $2 AND w.owner_id = $3
            "#
        ))
        .bind(product_id)
        .bind(warehouse_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn find_all_in_zone(&self, owner_id: Uuid, warehouse_id: i64, zone_id: i64) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products p
            JOIN zones z ON z.id = p.zone_id
            JOIN warehouses w ON w.id = z.warehouse_id
            WHERE z.id = $1 AND w.id = $2 AND w.owner_id = $3
            ORDER BY p.title
            "#
        ))
        .bind(zone_id)
        .bind(warehouse_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find_all_in_warehouse(&self, owner_id: Uuid, warehouse_id: i64) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products p
            JOIN zones z ON z.id = p.zone_id
            JOIN warehouses w ON w.id = z.warehouse_id
            WHERE w.id = $1 AND w.owner_id = $2
            ORDER BY p.title
            "#
        ))
        .bind(warehouse_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // Atualiza campos editáveis; a zona de destino precisa estar no mesmo armazém
    pub async fn update(
        &self,
        owner_id: Uuid,
        warehouse_id: i64,
        product_id: Uuid,
        zone_id: i64,
        fields: &ProductFields<'_>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products p
            SET title = $1, count = $2, description = $3, zone_id = $4
            FROM zones z
            JOIN warehouses w ON w.id = z.warehouse_id
            WHERE p.id = $5
              AND p.zone_id = z.id
              AND w.id = $6
              AND w.owner_id = $7
              AND EXISTS (SELECT 1 FROM zones dz WHERE dz.id = $4 AND dz.warehouse_id = $6)
            RETURNING p.id, p.title, p.count, p.description, p.qr_path, p.zone_id
            "#,
        )
        .bind(fields.title)
        .bind(fields.count)
        .bind(fields.description)
        .bind(zone_id)
        .bind(product_id)
        .bind(warehouse_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn delete(&self, owner_id: Uuid, warehouse_id: i64, product_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products p
            USING zones z, warehouses w
            WHERE p.id = $1 AND p.zone_id = z.id AND z.warehouse_id = w.id
              AND w.id = $2 AND w.owner_id = $3
            "#,
        )
        .bind(product_id)
        .bind(warehouse_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
