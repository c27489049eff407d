// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, RequireGerente},
    models::dashboard::{DashboardSummary, SalesChartEntry, TopProductEntry},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo do dia: vendas, fiado em aberto, alerta de estoque", body = DashboardSummary),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.get_summary().await?;
    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/sales-chart
#[utoipa::path(
    get,
    path = "/api/dashboard/sales-chart",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Total vendido por dia (últimos 30 dias)", body = Vec<SalesChartEntry>),
        (status = 403, description = "Somente gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sales_chart(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
) -> Result<impl IntoResponse, AppError> {
    let chart = app_state.dashboard_service.get_sales_chart().await?;
    Ok((StatusCode::OK, Json(chart)))
}

// GET /api/dashboard/top-products
#[utoipa::path(
    get,
    path = "/api/dashboard/top-products",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Produtos mais vendidos por faturamento", body = Vec<TopProductEntry>),
        (status = 403, description = "Somente gerentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_top_products(
    State(app_state): State<AppState>,
    _guard: RequireGerente,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.dashboard_service.get_top_products().await?;
    Ok((StatusCode::OK, Json(products)))
}
