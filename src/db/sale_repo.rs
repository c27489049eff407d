// src/db/sale_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::sale::{Sale, SaleItem, SaleReportRow},
};

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Escritas transacionais: venda + itens sempre dentro da mesma transação
    // controlada pelo service.
    // ---

    pub async fn insert_sale<'e, E>(&self, executor: E, sale: &Sale) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO sales (
                id, created_at, customer_tax_id, customer_name, total,
                payment_method, payment_status, due_date, note, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&sale.id)
        .bind(sale.created_at)
        .bind(&sale.customer_tax_id)
        .bind(&sale.customer_name)
        .bind(sale.total)
        .bind(sale.payment_method)
        .bind(sale.payment_status)
        .bind(sale.due_date)
        .bind(&sale.note)
        .bind(sale.user_id)
        .execute(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                // Colisão do id gerado: retryable
                if db_err.is_unique_violation() {
                    return AppError::SaleIdConflict;
                }
            }
            e.into()
        })?;

        Ok(())
    }

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        sale_id: &str,
        product_id: i32,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO sale_items (sale_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .execute(executor)
        .await?;

        Ok(())
    }

    // ---
    // Leituras
    // ---

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sale)
    }

    pub async fn get_items(&self, sale_id: &str) -> Result<Vec<SaleItem>, AppError> {
        let items = sqlx::query_as::<_, SaleItem>(
            "SELECT * FROM sale_items WHERE sale_id = $1 ORDER BY id ASC",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Relatório de vendas com o operador, intervalo de datas opcional,
    /// mais recentes primeiro.
    pub async fn list_report(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<SaleReportRow>, AppError> {
        let rows = sqlx::query_as::<_, SaleReportRow>(
            r#"
            SELECT s.id, s.created_at, s.total, s.payment_method,
                   s.payment_status, u.username AS operator
            FROM sales s
            JOIN users u ON s.user_id = u.id
            WHERE ($1::date IS NULL OR s.created_at::date >= $1)
              AND ($2::date IS NULL OR s.created_at::date <= $2)
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
