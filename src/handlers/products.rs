// src/handlers/products.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, RequireGerente},
    models::product::{LowStockProduct, Product, ProductPayload},
};

// Filtros da listagem do catálogo
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

// POST /api/products — cadastro (gerência)
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Produtos",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto cadastrado", body = Product),
        (status = 400, description = "Payload inválido"),
        (status = 409, description = "Código de barras já cadastrado"),
        (status = 403, description = "Somente gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state.product_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/products — listagem com busca (qualquer operador: a tela de
// venda precisa do catálogo)
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Produtos",
    params(
        ("search" = Option<String>, Query, description = "Nome (substring) ou código de barras exato"),
        ("category" = Option<String>, Query, description = "Filtra por categoria")
    ),
    responses(
        (status = 200, description = "Produtos ordenados por nome", body = Vec<Product>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .product_service
        .list(query.search.as_deref(), query.category.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/categories
#[utoipa::path(
    get,
    path = "/api/products/categories",
    tag = "Produtos",
    responses((status = 200, description = "Categorias distintas", body = Vec<String>)),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.product_service.categories().await?;
    Ok((StatusCode::OK, Json(categories)))
}

// GET /api/products/low-stock — alerta de estoque
#[utoipa::path(
    get,
    path = "/api/products/low-stock",
    tag = "Produtos",
    responses(
        (status = 200, description = "Produtos abaixo do estoque mínimo", body = Vec<LowStockProduct>)
    ),
    security(("api_jwt" = []))
)]
pub async fn low_stock(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.product_service.low_stock().await?;
    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = i32, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.product_service.get(id).await?;
    Ok((StatusCode::OK, Json(product)))
}

// PUT /api/products/{id} — edição (gerência)
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = i32, Path, description = "ID do produto")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado"),
        (status = 403, description = "Somente gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Path(id): Path<i32>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state.product_service.update(id, &payload).await?;
    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/products/{id} — recusado se houver vendas do produto
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Produtos",
    params(("id" = i32, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto excluído"),
        (status = 409, description = "Produto possui vendas registradas"),
        (status = 404, description = "Produto não encontrado"),
        (status = 403, description = "Somente gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.product_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
