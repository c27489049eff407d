// src/handlers/suppliers.rs

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
    middleware::auth::RequireGerente,
    models::supplier::{Supplier, SupplierPayload},
};

#[derive(Debug, Default, Deserialize)]
pub struct SupplierListQuery {
    pub search: Option<String>,
}

// POST /api/suppliers
#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Fornecedores",
    request_body = SupplierPayload,
    responses(
        (status = 201, description = "Fornecedor cadastrado", body = Supplier),
        (status = 409, description = "CNPJ já cadastrado"),
        (status = 403, description = "Somente gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let supplier = app_state.supplier_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

// GET /api/suppliers
#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Fornecedores",
    params(("search" = Option<String>, Query, description = "Nome (substring) ou CNPJ exato")),
    responses((status = 200, description = "Fornecedores ordenados por nome", body = Vec<Supplier>)),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Query(query): Query<SupplierListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let suppliers = app_state
        .supplier_service
        .list(query.search.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(suppliers)))
}

// GET /api/suppliers/{id}
#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = i32, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_supplier(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let supplier = app_state.supplier_service.get(id).await?;
    Ok((StatusCode::OK, Json(supplier)))
}

// PUT /api/suppliers/{id}
#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = i32, Path, description = "ID do fornecedor")),
    request_body = SupplierPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado"),
        (status = 409, description = "CNPJ já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Path(id): Path<i32>,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let supplier = app_state.supplier_service.update(id, &payload).await?;
    Ok((StatusCode::OK, Json(supplier)))
}

// DELETE /api/suppliers/{id} — produtos vinculados ficam sem fornecedor
#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "Fornecedores",
    params(("id" = i32, Path, description = "ID do fornecedor")),
    responses(
        (status = 204, description = "Fornecedor excluído"),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    app_state.supplier_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
