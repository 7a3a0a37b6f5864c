// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::sign_up,
        handlers::auth::sign_in_email,
        handlers::auth::sign_in_phone,
        handlers::auth::refresh,
        handlers::auth::logout,

        // --- Users ---
        handlers::auth::me,

        // --- Warehouses ---
        handlers::warehouse::create_warehouse,
        handlers::warehouse::list_warehouses,
        handlers::warehouse::get_warehouse,
        handlers::warehouse::update_warehouse,
        handlers::warehouse::delete_warehouse,
        handlers::warehouse::list_employers,
        handlers::warehouse::my_workplaces,

        // --- Zones ---
        handlers::zone::create_zone,
        handlers::zone::list_zones,
        handlers::zone::get_zone,
        handlers::zone::update_zone,
        handlers::zone::delete_zone,

        // --- Products ---
        handlers::product::create_product,
        handlers::product::list_zone_products,
        handlers::product::list_warehouse_products,
        handlers::product::get_product,
        handlers::product::update_product,
        handlers::product::delete_product,
        handlers::qr::serve_qr,

        // --- Roles ---
        handlers::role::create_role,
        handlers::role::revoke_role,
        handlers::role::employee_permissions,
        handlers::role::my_permissions,
        handlers::role::list_permissions,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginByEmailPayload,
            models::auth::LoginByPhonePayload,
            models::auth::AuthResponse,
            models::auth::MessageResponse,

            // --- Warehouse ---
            models::warehouse::Warehouse,
            models::warehouse::WarehousePayload,
            models::warehouse::Zone,
            models::warehouse::ZonePayload,
            models::warehouse::Product,
            models::warehouse::ProductPayload,
            models::warehouse::Employer,

            // --- RBAC ---
            models::rbac::Permission,
            models::rbac::Role,
            models::rbac::GrantRolePayload,
            models::rbac::RevokeRolePayload,
            models::rbac::EmployeeLookupPayload,
            models::rbac::PermissionsResponse,
            models::rbac::RoleGrantResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Cadastro, login e renovação de sessão"),
        (name = "Users", description = "Dados do usuário autenticado"),
        (name = "Warehouses", description = "Armazéns do dono (rotas /owner) ou delegados (rotas /employer)"),
        (name = "Zones", description = "Zonas dentro de um armazém"),
        (name = "Products", description = "Produtos e QR Codes"),
        (name = "Roles", description = "Cargos e permissões por armazém")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
