// src/services/zone_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{WarehouseRepository, ZoneRepository},
    models::warehouse::{Zone, ZonePayload},
};

#[derive(Clone)]
pub struct ZoneService {
    zone_repo: ZoneRepository,
    warehouse_repo: WarehouseRepository,
}

impl ZoneService {
    pub fn new(zone_repo: ZoneRepository, warehouse_repo: WarehouseRepository) -> Self {
        Self { zone_repo, warehouse_repo }
    }

    /// Cria a zona. Armazém de outro dono e armazém inexistente dão o mesmo `WarehouseNotFound`.
    pub async fn create(&self, owner_id: Uuid, warehouse_id: i64, payload: &ZonePayload) -> Result<Zone, AppError> {
        let zone = self
            .zone_repo
            .create(owner_id, warehouse_id, &payload.name, payload.capacity)
            .await?
            .ok_or(AppError::WarehouseNotFound)?;

        tracing::info!(zone_id = zone.id, warehouse_id, "zona criada");
        Ok(zone)
    }

    pub async fn list(&self, owner_id: Uuid, warehouse_id: i64) -> Result<Vec<Zone>, AppError> {
        self.ensure_warehouse(owner_id, warehouse_id).await?;
        self.zone_repo.find_all(owner_id, warehouse_id).await
    }

    pub async fn get(&self, owner_id: Uuid, warehouse_id: i64, zone_id: i64) -> Result<Zone, AppError> {
        self.zone_repo
            .find(owner_id, warehouse_id, zone_id)
            .await?
            .ok_or(AppError::ZoneNotFound)
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        warehouse_id: i64,
        zone_id: i64,
        payload: &ZonePayload,
    ) -> Result<Zone, AppError> {
        self.zone_repo
            .update(owner_id, warehouse_id, zone_id, &payload.name, payload.capacity)
            .await?
            .ok_or(AppError::ZoneNotFound)
    }

    pub async fn delete(&self, owner_id: Uuid, warehouse_id: i64, zone_id: i64) -> Result<(), AppError> {
        if self.zone_repo.delete(owner_id, warehouse_id, zone_id).await? == 0 {
            return Err(AppError::ZoneNotFound);
        }
        Ok(())
    }

    async fn ensure_warehouse(&self, owner_id: Uuid, warehouse_id: i64) -> Result<(), AppError> {
        self.warehouse_repo
            .find_owned(self.warehouse_repo.pool(), owner_id, warehouse_id)
            .await?
            .map(|_| ())
            .ok_or(AppError::WarehouseNotFound)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::test_support::{count, insert_user};

    fn service(pool: &PgPool) -> (ZoneService, WarehouseRepository) {
        let warehouses = WarehouseRepository::new(pool.clone());
        (ZoneService::new(ZoneRepository::new(pool.clone()), warehouses.clone()), warehouses)
    }

    fn zone(name: &str) -> ZonePayload {
        ZonePayload { name: name.into(), capacity: 100 }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn zone_under_foreign_or_missing_warehouse_is_warehouse_not_found(pool: PgPool) {
        let owner = insert_user(&pool, "owner_a", "owner").await;
        let intruder = insert_user(&pool, "owner_b", "owner").await;
        let (zones, warehouses) = service(&pool);
        let warehouse = warehouses.create(owner, "W1", "").await.unwrap();

        for (caller, warehouse_id) in [(intruder, warehouse.id), (owner, 9_999), (intruder, 9_999)] {
            let result = zones.create(caller, warehouse_id, &zone("Z1")).await;
            assert!(matches!(result, Err(AppError::WarehouseNotFound)));
            assert!(matches!(zones.list(caller, warehouse_id).await, Err(AppError::WarehouseNotFound)));
        }
        assert_eq!(count(&pool, "zones").await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn crud_is_scoped_to_the_owner(pool: PgPool) {
        let owner = insert_user(&pool, "owner_a", "owner").await;
        let intruder = insert_user(&pool, "owner_b", "owner").await;
        let (zones, warehouses) = service(&pool);
        let warehouse = warehouses.create(owner, "W1", "").await.unwrap();

        let created = zones.create(owner, warehouse.id, &zone("Z1")).await.unwrap();
        assert_eq!(created.warehouse_id, warehouse.id);

        let renamed = zones
            .update(owner, warehouse.id, created.id, &ZonePayload { name: "Z1b".into(), capacity: 5 })
            .await
            .unwrap();
        assert_eq!((renamed.name.as_str(), renamed.capacity), ("Z1b", 5));

        assert!(matches!(
            zones.get(intruder, warehouse.id, created.id).await,
            Err(AppError::ZoneNotFound)
        ));
        assert!(matches!(
            zones.delete(intruder, warehouse.id, created.id).await,
            Err(AppError::ZoneNotFound)
        ));

        zones.delete(owner, warehouse.id, created.id).await.unwrap();
        assert!(zones.list(owner, warehouse.id).await.unwrap().is_empty());
    }
}
