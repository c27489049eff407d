// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Resumo do dia (os cards do topo)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub sales_today: Decimal,    // Total vendido hoje
    pub sales_count_today: i64,  // Quantidade de vendas hoje
    pub credit_pending: Decimal, // Fiado em aberto (soma das pendentes)
    pub low_stock_count: i64,    // Produtos abaixo do estoque mínimo
}

// 2. Gráfico de vendas (últimos 30 dias)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesChartEntry {
    pub date: Option<String>, // O SQL retorna a data como string (YYYY-MM-DD)
    pub total: Option<Decimal>,
}

// 3. Produtos mais vendidos por faturamento
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProductEntry {
    pub product_name: String,
    pub total_quantity: Option<Decimal>,
    pub total_revenue: Option<Decimal>,
}

// Intervalo opcional do relatório de vendas
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRange {
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
}
