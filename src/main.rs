// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é adequado aqui: se a configuração falhar, a aplicação
    // não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Garante o gerente inicial em banco recém-criado
    app_state
        .user_service
        .ensure_default_manager()
        .await
        .expect("Falha ao garantir o gerente inicial.");

    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Rotas do usuário autenticado
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Catálogo: leitura para qualquer operador, escrita só de gerente
    // (o guard de papel fica no handler, via RequireGerente)
    let product_routes = Router::new()
        .route(
            "/",
            post(handlers::products::create_product).get(handlers::products::list_products),
        )
        .route("/categories", get(handlers::products::list_categories))
        .route("/low-stock", get(handlers::products::low_stock))
        .route(
            "/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let supplier_routes = Router::new()
        .route(
            "/",
            post(handlers::suppliers::create_supplier).get(handlers::suppliers::list_suppliers),
        )
        .route(
            "/{id}",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Vendas: registro por qualquer operador, relatório de gerência
    let sale_routes = Router::new()
        .route(
            "/",
            post(handlers::sales::submit_sale).get(handlers::sales::list_sales),
        )
        .route("/{id}", get(handlers::sales::get_sale))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Fiado: listagem, quitação e observações
    let credit_routes = Router::new()
        .route("/", get(handlers::credit::list_deferred))
        .route("/{id}/settle", post(handlers::credit::settle))
        .route("/{id}/note", put(handlers::credit::annotate))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Administração de usuários (gerência)
    let admin_routes = Router::new()
        .route(
            "/users",
            post(handlers::users::create_user).get(handlers::users::list_users),
        )
        .route("/users/{id}/role", put(handlers::users::update_role))
        .route("/users/{id}", delete(handlers::users::delete_user))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/sales-chart", get(handlers::dashboard::get_sales_chart))
        .route("/top-products", get(handlers::dashboard::get_top_products))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/products", product_routes)
        .nest("/api/suppliers", supplier_routes)
        .nest("/api/sales", sale_routes)
        .nest("/api/credit", credit_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
