// src/services/product_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProductRepository, product_repo::ProductFields},
    models::warehouse::{Product, ProductPayload},
    services::qr::QrGenerator,
};

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
    qr: QrGenerator,
    pool: PgPool,
}

impl ProductService {
    pub fn new(repo: ProductRepository, qr: QrGenerator, pool: PgPool) -> Self {
        Self { repo, qr, pool }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        warehouse_id: i64,
        zone_id: i64,
        payload: &ProductPayload,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. O armazém é do dono e a zona pertence a esse armazém
        if !self.repo.warehouse_is_owned(&mut *tx, owner_id, warehouse_id).await? {
            return Err(AppError::WarehouseNotFound);
        }
        if !self.repo.zone_in_warehouse(&mut *tx, warehouse_id, zone_id).await? {
            return Err(AppError::ZoneNotFound);
        }

        // 2. Insere com qr_path vazio para obter o id
        let product = self.repo.insert(&mut *tx, zone_id, &fields(payload)).await?;

        // 3. Gera o QR Code com o id. Se falhar, o `tx` é descartado e o INSERT desfeito.
        let qr_path = self.qr.generate_for_product(product.id).await?;

        // 4. Grava o caminho na mesma linha e confirma
        let product = self.repo.set_qr_path(&mut *tx, product.id, &qr_path).await?;
        tx.commit().await?;

        tracing::info!(product_id = %product.id, zone_id, warehouse_id, "produto criado");
        Ok(product)
    }

    pub async fn get(&self, owner_id: Uuid, warehouse_id: i64, product_id: Uuid) -> Result<Product, AppError> {
        self.repo
            .find_in_warehouse(owner_id, warehouse_id, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn list_by_zone(&self, owner_id: Uuid, warehouse_id: i64, zone_id: i64) -> Result<Vec<Product>, AppError> {
        self.ensure_zone(owner_id, warehouse_id, zone_id).await?;
        self.repo.find_all_in_zone(owner_id, warehouse_id, zone_id).await
    }

    pub async fn list_by_warehouse(&self, owner_id: Uuid, warehouse_id: i64) -> Result<Vec<Product>, AppError> {
        if !self.repo.warehouse_is_owned(&self.pool, owner_id, warehouse_id).await? {
            return Err(AppError::WarehouseNotFound);
        }
        self.repo.find_all_in_warehouse(owner_id, warehouse_id).await
    }

    /// Atualiza o produto. Sem `zone_id` no payload, o produto fica na zona atual.
    pub async fn update(
        &self,
        owner_id: Uuid,
        warehouse_id: i64,
        product_id: Uuid,
        payload: &ProductPayload,
    ) -> Result<Product, AppError> {
        let current = self.get(owner_id, warehouse_id, product_id).await?;

        let zone_id = match payload.zone_id {
            Some(zone_id) if zone_id != current.zone_id => {
                self.ensure_zone(owner_id, warehouse_id, zone_id).await?;
                zone_id
            }
            _ => current.zone_id,
        };

        self.repo
            .update(owner_id, warehouse_id, product_id, zone_id, &fields(payload))
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn delete(&self, owner_id: Uuid, warehouse_id: i64, product_id: Uuid) -> Result<(), AppError> {
        if self.repo.delete(owner_id, warehouse_id, product_id).await? == 0 {
            return Err(AppError::ProductNotFound);
        }
        tracing::info!(%product_id, warehouse_id, "produto removido");
        Ok(())
    }

    async fn ensure_zone(&self, owner_id: Uuid, warehouse_id: i64, zone_id: i64) -> Result<(), AppError> {
        if !self.repo.warehouse_is_owned(&self.pool, owner_id, warehouse_id).await? {
            return Err(AppError::WarehouseNotFound);
        }
        if !self.repo.zone_in_warehouse(&self.pool, warehouse_id, zone_id).await? {
            return Err(AppError::ZoneNotFound);
        }
        Ok(())
    }
}

fn fields(payload: &ProductPayload) -> ProductFields<'_> {
    ProductFields {
        title: &payload.title,
        count: payload.count,
        description: &payload.description,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{
        db::{WarehouseRepository, ZoneRepository},
        test_support::{count, insert_user},
    };

    struct Fixture {
        products: ProductService,
        owner: Uuid,
        warehouse_id: i64,
        zone_id: i64,
        _qr_dir: tempfile::TempDir,
    }

    async fn fixture(pool: &PgPool) -> Fixture {
        let owner = insert_user(pool, "owner_a", "owner").await;
        let warehouse = WarehouseRepository::new(pool.clone()).create(owner, "W1", "").await.unwrap();
        let zone = ZoneRepository::new(pool.clone())
            .create(owner, warehouse.id, "Z1", 10)
            .await
            .unwrap()
            .unwrap();

        let qr_dir = tempfile::tempdir().unwrap();
        let qr = QrGenerator::new("http://front/product/".into(), qr_dir.path().to_path_buf());
        Fixture {
            products: ProductService::new(ProductRepository::new(pool.clone()), qr, pool.clone()),
            owner,
            warehouse_id: warehouse.id,
            zone_id: zone.id,
            _qr_dir: qr_dir,
        }
    }

    fn payload(title: &str, count: i64) -> ProductPayload {
        ProductPayload { title: title.into(), count, description: "caixa".into(), zone_id: None }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn created_product_has_its_qr_code_on_disk(pool: PgPool) {
        let f = fixture(&pool).await;
        let product = f
            .products
            .create(f.owner, f.warehouse_id, f.zone_id, &payload("P1", 10))
            .await
            .unwrap();

        assert_eq!(product.count, 10);
        assert!(!product.qr_path.is_empty());
        assert!(product.qr_path.ends_with(&format!("{}.png", product.id)));
        assert!(Path::new(&product.qr_path).exists());

        let stored = f.products.get(f.owner, f.warehouse_id, product.id).await.unwrap();
        assert_eq!(stored.qr_path, product.qr_path);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn zone_from_another_warehouse_is_rejected(pool: PgPool) {
        let f = fixture(&pool).await;
        let other = WarehouseRepository::new(pool.clone()).create(f.owner, "W2", "").await.unwrap();

        let result = f
            .products
            .create(f.owner, other.id, f.zone_id, &payload("P1", 1))
            .await;
        assert!(matches!(result, Err(AppError::ZoneNotFound)));
        assert_eq!(count(&pool, "products").await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn products_are_invisible_to_other_owners(pool: PgPool) {
        let f = fixture(&pool).await;
        let intruder = insert_user(&pool, "owner_b", "owner").await;
        let product = f
            .products
            .create(f.owner, f.warehouse_id, f.zone_id, &payload("P1", 3))
            .await
            .unwrap();

        assert!(matches!(
            f.products.get(intruder, f.warehouse_id, product.id).await,
            Err(AppError::ProductNotFound)
        ));
        assert!(matches!(
            f.products.create(intruder, f.warehouse_id, f.zone_id, &payload("P2", 1)).await,
            Err(AppError::WarehouseNotFound)
        ));
        assert!(matches!(
            f.products.delete(intruder, f.warehouse_id, product.id).await,
            Err(AppError::ProductNotFound)
        ));

        let listed = f.products.list_by_zone(f.owner, f.warehouse_id, f.zone_id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn update_keeps_zone_unless_one_is_given(pool: PgPool) {
        let f = fixture(&pool).await;
        let product = f
            .products
            .create(f.owner, f.warehouse_id, f.zone_id, &payload("P1", 3))
            .await
            .unwrap();

        let updated = f
            .products
            .update(f.owner, f.warehouse_id, product.id, &payload("P1 novo", 7))
            .await
            .unwrap();
        assert_eq!((updated.title.as_str(), updated.count, updated.zone_id), ("P1 novo", 7, f.zone_id));
        assert_eq!(updated.qr_path, product.qr_path);

        let mut moved = payload("P1 novo", 7);
        moved.zone_id = Some(9_999);
        assert!(matches!(
            f.products.update(f.owner, f.warehouse_id, product.id, &moved).await,
            Err(AppError::ZoneNotFound)
        ));
    }
}
