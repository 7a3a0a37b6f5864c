// src/services/warehouse_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WarehouseRepository,
    models::warehouse::{Employer, Warehouse, WarehousePayload},
};

// Todas as operações recebem o id do dono efetivo (já resolvido pela autorização)
#[derive(Clone)]
pub struct WarehouseService {
    repo: WarehouseRepository,
}

impl WarehouseService {
    pub fn new(repo: WarehouseRepository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, owner_id: Uuid, payload: &WarehousePayload) -> Result<Warehouse, AppError> {
        if self.repo.owner_has_warehouse_with_name(owner_id, &payload.name).await? {
            return Err(AppError::WarehouseAlreadyExists(payload.name.clone()));
        }

        let warehouse = self.repo.create(owner_id, &payload.name, &payload.address).await?;
        tracing::info!(warehouse_id = warehouse.id, %owner_id, "armazém criado");
        Ok(warehouse)
    }

    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Warehouse>, AppError> {
        self.repo.find_all_by_owner(owner_id).await
    }

    pub async fn get(&self, owner_id: Uuid, warehouse_id: i64) -> Result<Warehouse, AppError> {
        self.repo
            .find_owned(self.repo.pool(), owner_id, warehouse_id)
            .await?
            .ok_or(AppError::WarehouseNotFound)
    }

    pub async fn update(
        &self,
        owner_id: Uuid,
        warehouse_id: i64,
        payload: &WarehousePayload,
    ) -> Result<Warehouse, AppError> {
        self.repo
            .update(owner_id, warehouse_id, &payload.name, &payload.address)
            .await?
            .ok_or(AppError::WarehouseNotFound)
    }

    pub async fn delete(&self, owner_id: Uuid, warehouse_id: i64) -> Result<(), AppError> {
        match self.repo.delete(owner_id, warehouse_id).await? {
            0 => Err(AppError::WarehouseNotFound),
            _ => {
                tracing::info!(warehouse_id, %owner_id, "armazém removido");
                Ok(())
            }
        }
    }

    pub async fn employers(&self, owner_id: Uuid, warehouse_id: i64) -> Result<Vec<Employer>, AppError> {
        self.get(owner_id, warehouse_id).await?;
        self.repo.find_employers(warehouse_id).await
    }

    // Visão do funcionário: armazéns em que ele tem algum cargo
    pub async fn employer_warehouses(&self, employer_id: Uuid) -> Result<Vec<Warehouse>, AppError> {
        self.repo.find_for_employer(employer_id).await
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;
    use crate::test_support::insert_user;

    fn payload(name: &str) -> WarehousePayload {
        WarehousePayload { name: name.into(), address: "Rua A, 1".into() }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn duplicate_name_per_owner_is_a_conflict(pool: PgPool) {
        let owner = insert_user(&pool, "owner_a", "owner").await;
        let other = insert_user(&pool, "owner_b", "owner").await;
        let service = WarehouseService::new(WarehouseRepository::new(pool));

        service.create(owner, &payload("W1")).await.unwrap();
        let again = service.create(owner, &payload("W1")).await;
        assert!(matches!(again, Err(AppError::WarehouseAlreadyExists(_))));

        // O mesmo nome é livre para outro dono
        service.create(other, &payload("W1")).await.unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    #[cfg_attr(not(feature = "db-tests"), ignore = "requer DATABASE_URL apontando para um PostgreSQL")]
    async fn foreign_warehouse_looks_absent(pool: PgPool) {
        let owner = insert_user(&pool, "owner_a", "owner").await;
        let intruder = insert_user(&pool, "owner_b", "owner").await;
        let service = WarehouseService::new(WarehouseRepository::new(pool));
        let warehouse = service.create(owner, &payload("W1")).await.unwrap();

        assert!(matches!(service.get(intruder, warehouse.id).await, Err(AppError::WarehouseNotFound)));
        assert!(matches!(
            service.update(intruder, warehouse.id, &payload("mine")).await,
            Err(AppError::WarehouseNotFound)
        ));
        assert!(matches!(service.delete(intruder, warehouse.id).await, Err(AppError::WarehouseNotFound)));
        assert!(matches!(service.delete(owner, 9_999).await, Err(AppError::WarehouseNotFound)));

        service.delete(owner, warehouse.id).await.unwrap();
    }
}
