pub mod auth;
pub use auth::AuthService;
pub mod product_service;
pub use product_service::ProductService;
pub mod sale_service;
pub use sale_service::SaleService;
pub mod credit_service;
pub use credit_service::CreditService;
pub mod supplier_service;
pub use supplier_service::SupplierService;
pub mod user_service;
pub use user_service::UserService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
