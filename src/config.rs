// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        CreditRepository, DashboardRepository, ProductRepository, SaleRepository,
        SupplierRepository, UserRepository,
    },
    services::{
        AuthService, CreditService, DashboardService, ProductService, SaleService,
        SupplierService, UserService,
    },
};

// O estado compartilhado, acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub product_service: ProductService,
    pub sale_service: SaleService,
    pub credit_service: CreditService,
    pub supplier_service: SupplierService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o grafo de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());
        let credit_repo = CreditRepository::new(db_pool.clone());
        let supplier_repo = SupplierRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret);
        let user_service = UserService::new(user_repo, db_pool.clone());
        let product_service = ProductService::new(product_repo.clone());
        let sale_service = SaleService::new(sale_repo, product_repo, db_pool.clone());
        let credit_service = CreditService::new(credit_repo, db_pool.clone());
        let supplier_service = SupplierService::new(supplier_repo);
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            auth_service,
            user_service,
            product_service,
            sale_service,
            credit_service,
            supplier_service,
            dashboard_service,
        })
    }
}
