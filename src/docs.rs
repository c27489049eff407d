// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Produtos ---
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::list_categories,
        handlers::products::low_stock,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Fornecedores ---
        handlers::suppliers::create_supplier,
        handlers::suppliers::list_suppliers,
        handlers::suppliers::get_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,

        // --- Vendas ---
        handlers::sales::submit_sale,
        handlers::sales::get_sale,
        handlers::sales::list_sales,

        // --- Fiado ---
        handlers::credit::list_deferred,
        handlers::credit::settle,
        handlers::credit::annotate,

        // --- Usuários ---
        handlers::users::create_user,
        handlers::users::list_users,
        handlers::users::update_role,
        handlers::users::delete_user,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_sales_chart,
        handlers::dashboard::get_top_products,
    ),
    components(
        schemas(
            // --- Auth / Usuários ---
            models::user::User,
            models::user::Role,
            models::user::LoginPayload,
            models::user::CreateUserPayload,
            models::user::UpdateRolePayload,
            models::user::AuthResponse,

            // --- Produtos ---
            models::product::Product,
            models::product::SaleUnit,
            models::product::ProductPayload,
            models::product::LowStockProduct,

            // --- Fornecedores ---
            models::supplier::Supplier,
            models::supplier::SupplierPayload,

            // --- Vendas ---
            models::sale::Sale,
            models::sale::SaleItem,
            models::sale::SaleDetail,
            models::sale::PaymentMethod,
            models::sale::PaymentStatus,
            models::sale::CreateSalePayload,
            models::sale::SaleItemPayload,
            models::sale::SaleReceipt,
            models::sale::SaleReportRow,

            // --- Fiado ---
            models::credit::DeferredSale,
            models::credit::DeferredSummary,
            models::credit::DeferredList,
            models::credit::SettleResult,
            models::credit::AnnotatePayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::SalesChartEntry,
            models::dashboard::TopProductEntry,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Autenticação"),
        (name = "Produtos", description = "Catálogo e estoque"),
        (name = "Fornecedores", description = "Cadastro de fornecedores"),
        (name = "Vendas", description = "Registro e consulta de vendas"),
        (name = "Fiado", description = "Vendas com pagamento combinado"),
        (name = "Usuários", description = "Administração de operadores"),
        (name = "Dashboard", description = "Resumos e gráficos"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_jwt",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
