// src/handlers/credit.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::credit::{AnnotatePayload, DeferredFilter, DeferredList, SettleResult},
};

// GET /api/credit — listagem do fiado com filtros e agregados
#[utoipa::path(
    get,
    path = "/api/credit",
    tag = "Fiado",
    params(
        ("customer" = Option<String>, Query, description = "Nome exato do cliente (prevalece sobre 'initial')"),
        ("initial" = Option<String>, Query, description = "Inicial do nome do cliente")
    ),
    responses(
        (status = 200, description = "Vendas fiado, vencidas marcadas, com agregados", body = DeferredList),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_deferred(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(filter): Query<DeferredFilter>,
) -> Result<impl IntoResponse, AppError> {
    let list = app_state.credit_service.list_deferred(filter).await?;
    Ok((StatusCode::OK, Json(list)))
}

// POST /api/credit/{id}/settle — quitação (idempotente)
#[utoipa::path(
    post,
    path = "/api/credit/{id}/settle",
    tag = "Fiado",
    params(("id" = String, Path, description = "Identificador da venda fiado")),
    responses(
        (status = 200, description = "Resultado da quitação; `settled=false` quando já quitada ou inexistente", body = SettleResult)
    ),
    security(("api_jwt" = []))
)]
pub async fn settle(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = app_state.credit_service.settle(&id).await?;
    Ok((StatusCode::OK, Json(result)))
}

// PUT /api/credit/{id}/note — observação livre
#[utoipa::path(
    put,
    path = "/api/credit/{id}/note",
    tag = "Fiado",
    params(("id" = String, Path, description = "Identificador da venda fiado")),
    request_body = AnnotatePayload,
    responses(
        (status = 204, description = "Observação registrada"),
        (status = 404, description = "Venda fiado não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn annotate(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<AnnotatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    app_state.credit_service.annotate(&id, &payload.note).await?;
    Ok(StatusCode::NO_CONTENT)
}
