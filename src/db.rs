pub mod user_repo;
pub use user_repo::UserRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod credit_repo;
pub use credit_repo::CreditRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
