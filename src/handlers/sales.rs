// src/handlers/sales.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, RequireGerente},
    models::{
        dashboard::ReportRange,
        sale::{CreateSalePayload, SaleDetail, SaleReceipt, SaleReportRow},
    },
};

// POST /api/sales — registra a venda (qualquer operador autenticado)
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Vendas",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada, estoque baixado", body = SaleReceipt),
        (status = 400, description = "Payload inválido (itens vazios, vencimento ausente/passado, preço divergente)"),
        (status = 404, description = "Produto inexistente"),
        (status = 409, description = "Estoque insuficiente ou conflito de identificador"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn submit_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    // A validação (campos + consistência) mora no service: é o núcleo que
    // garante as invariantes, independente de quem chama.
    let receipt = app_state.sale_service.submit_sale(payload, user.id).await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

// GET /api/sales/{id} — venda com seus itens
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Vendas",
    params(("id" = String, Path, description = "Identificador da venda")),
    responses(
        (status = 200, description = "Detalhe da venda", body = SaleDetail),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.sale_service.get_sale(&id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// GET /api/sales — relatório (gerência), intervalo opcional
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Vendas",
    params(
        ("startDate" = Option<String>, Query, description = "Data inicial (YYYY-MM-DD)"),
        ("endDate" = Option<String>, Query, description = "Data final (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Vendas com operador, mais recentes primeiro", body = Vec<SaleReportRow>),
        (status = 403, description = "Somente gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
    Query(range): Query<ReportRange>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .sale_service
        .list_report(range.start_date, range.end_date)
        .await?;

    Ok((StatusCode::OK, Json(rows)))
}
