// src/authz/action.rs

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::common::error::AppError;

/// Ações verificadas contra as permissões concedidas. O texto de cada ação é o
/// `name` da linha correspondente na tabela `permissions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    GetMyPermissions,
    WarehouseManage,
    ZoneManage,
    ProductManage,
    RoleManage,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::GetMyPermissions,
        Action::WarehouseManage,
        Action::ZoneManage,
        Action::ProductManage,
        Action::RoleManage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetMyPermissions => "get_my_permissions",
            Action::WarehouseManage => "warehouse_manage",
            Action::ZoneManage => "zone_manage",
            Action::ProductManage => "product_manage",
            Action::RoleManage => "role_manage",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL.into_iter().find(|a| a.as_str() == s).ok_or(())
    }
}

/// Grupo fixo associado a uma rota no momento do registro (nunca vem da requisição).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionGroup {
    SelfPerm,
    Warehouse,
    Zone,
    Product,
    Role,
}

impl PermissionGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionGroup::SelfPerm => "self_perm",
            PermissionGroup::Warehouse => "warehouse",
            PermissionGroup::Zone => "zone",
            PermissionGroup::Product => "product",
            PermissionGroup::Role => "role",
        }
    }

    /// Conjunto de ações legais no grupo. Hoje cada grupo aceita exatamente uma.
    pub fn allowed_actions(&self) -> &'static [Action] {
        match self {
            PermissionGroup::SelfPerm => &[Action::GetMyPermissions],
            PermissionGroup::Warehouse => &[Action::WarehouseManage],
            PermissionGroup::Zone => &[Action::ZoneManage],
            PermissionGroup::Product => &[Action::ProductManage],
            PermissionGroup::Role => &[Action::RoleManage],
        }
    }

    /// Converte o texto vindo da rota em uma `Action` legal para este grupo.
    pub fn validate_action(&self, raw: &str) -> Result<Action, AppError> {
        raw.parse::<Action>()
            .ok()
            .filter(|action| self.allowed_actions().contains(action))
            .ok_or_else(|| AppError::InvalidActionForGroup {
                group: self.as_str(),
                action: raw.to_string(),
            })
    }
}

impl fmt::Display for PermissionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
