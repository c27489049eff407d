// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardSummary, SalesChartEntry, TopProductEntry},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Resumo geral, dentro de uma transação (snapshot consistente)
    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        let mut tx = self.pool.begin().await?;

        // A. Vendas de hoje (total e quantidade)
        let (sales_today, sales_count_today) = sqlx::query_as::<_, (Decimal, i64)>(
            r#"
            SELECT COALESCE(SUM(total), 0), COUNT(*)
            FROM sales
            WHERE created_at::date = CURRENT_DATE
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // B. Fiado em aberto
        let credit_pending = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(total), 0)
            FROM sales
            WHERE payment_method = 'deferred' AND payment_status = 'pending'
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // C. Alerta de estoque
        let low_stock_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE quantity < min_stock",
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            sales_today,
            sales_count_today,
            credit_pending,
            low_stock_count,
        })
    }

    // 2. Gráfico de linha (últimos 30 dias)
    pub async fn get_sales_last_30_days(&self) -> Result<Vec<SalesChartEntry>, AppError> {
        let data = sqlx::query_as::<_, SalesChartEntry>(
            r#"
            SELECT created_at::date::text AS date, SUM(total) AS total
            FROM sales
            WHERE created_at >= CURRENT_DATE - INTERVAL '30 days'
            GROUP BY created_at::date
            ORDER BY created_at::date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(data)
    }

    // 3. Produtos mais vendidos por faturamento
    pub async fn get_top_products(&self) -> Result<Vec<TopProductEntry>, AppError> {
        let data = sqlx::query_as::<_, TopProductEntry>(
            r#"
            SELECT
                p.name AS product_name,
                SUM(si.quantity) AS total_quantity,
                SUM(si.quantity * si.unit_price) AS total_revenue
            FROM sale_items si
            JOIN products p ON si.product_id = p.id
            GROUP BY p.name
            ORDER BY total_revenue DESC NULLS LAST
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(data)
    }
}
