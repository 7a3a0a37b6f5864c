// src/services/role_service.rs

use std::collections::BTreeSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PermissionRepository, UserRepository, WarehouseRepository},
    models::rbac::{GrantRolePayload, Permission, RevokeRolePayload, RoleGrantResponse},
};

#[derive(Clone)]
pub struct RoleService {
    permission_repo: PermissionRepository,
    user_repo: UserRepository,
    warehouse_repo: WarehouseRepository,
    pool: PgPool,
}

impl RoleService {
    pub fn new(
        permission_repo: PermissionRepository,
        user_repo: UserRepository,
        warehouse_repo: WarehouseRepository,
        pool: PgPool,
    ) -> Self {
        Self { permission_repo, user_repo, warehouse_repo, pool }
    }

    /// Concede ao funcionário o cargo `payload.name` no armazém, anexando as permissões pedidas.
    /// Tudo numa transação: qualquer erro desfaz o que já foi escrito.
    pub async fn create_role(
        &self,
        owner_id: Uuid,
        warehouse_id: i64,
        payload: &GrantRolePayload,
    ) -> Result<RoleGrantResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. O armazém existe e é do dono
        self.warehouse_repo
            .find_owned(&mut *tx, owner_id, warehouse_id)
            .await?
            .ok_or(AppError::WarehouseNotFound)?;

        // 2. O funcionário existe
        let employee = self
            .user_repo
            .find_by_username(&mut *tx, &payload.username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        // 3. Cargo reaproveitado pelo nome
        let role = self.permission_repo.upsert_role(&mut *tx, owner_id, &payload.name).await?;

        // 4. Concessão (no máximo uma por trio)
        let granted = self
            .permission_repo
            .grant_role(&mut *tx, warehouse_id, employee.id, role.id)
            .await?;

        // 5. Toda permissão pedida precisa existir
        let requested: Vec<i64> = payload.permissions.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        let found = self.permission_repo.find_permissions_by_ids(&mut *tx, &requested).await?;
        if let Some(missing) = requested.iter().find(|id| !found.iter().any(|p| p.id == **id)) {
            return Err(AppError::PermissionNotFound(*missing));
        }

        let attached = self.permission_repo.attach_permissions(&mut *tx, role.id, &requested).await?;
        let permissions = self.permission_repo.find_role_permissions(&mut *tx, role.id).await?;

        tx.commit().await?;

        tracing::info!(
            warehouse_id,
            role = %role.name,
            employee = %employee.username,
            new_grant = granted,
            attached,
            "cargo concedido"
        );

        Ok(RoleGrantResponse {
            role,
            warehouse_id,
            username: employee.username,
            permissions,
        })
    }

    pub async fn revoke_role(&self, owner_id: Uuid, warehouse_id: i64, payload: &RevokeRolePayload) -> Result<(), AppError> {
        self.warehouse_repo
            .find_owned(self.warehouse_repo.pool(), owner_id, warehouse_id)
            .await?
            .ok_or(AppError::WarehouseNotFound)?;

        let employee = self
            .user_repo
            .find_by_username(self.warehouse_repo.pool(), &payload.username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let removed = self
            .permission_repo
            .revoke_role(owner_id, warehouse_id, employee.id, &payload.name)
            .await?;
        if removed == 0 {
            return Err(AppError::RoleNotFound);
        }

        tracing::info!(warehouse_id, role = %payload.name, employee = %employee.username, "cargo revogado");
        Ok(())
    }

    pub async fn list_permissions(&self) -> Result<Vec<Permission>, AppError> {
        self.permission_repo.list_all_permissions().await
    }

    // Visão do dono sobre as permissões de um funcionário no armazém
    pub async fn employee_permissions(
        &self,
        owner_id: Uuid,
        warehouse_id: i64,
        username: &str,
    ) -> Result<Vec<Permission>, AppError> {
        self.warehouse_repo
            .find_owned(self.warehouse_repo.pool(), owner_id, warehouse_id)
            .await?
            .ok_or(AppError::WarehouseNotFound)?;

        let employee = self
            .user_repo
            .find_by_username(self.warehouse_repo.pool(), username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        self.permission_repo.find_user_permissions(warehouse_id, employee.id).await
    }

    // Usa o id de quem chamou, não o do dono
    pub async fn my_permissions(&self, caller_id: Uuid, warehouse_id: i64) -> Result<Vec<Permission>, AppError> {
        self.permission_repo.find_user_permissions(warehouse_id, caller_id).await
    }
}
