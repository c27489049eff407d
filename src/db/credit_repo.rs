// src/db/credit_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{
        credit::DeferredSummary,
        sale::{Sale, SaleItem},
    },
};

// Repositório do fiado: listagem, agregados, quitação e observações
// sobre as vendas com pagamento combinado.
#[derive(Clone)]
pub struct CreditRepository {
    pool: PgPool,
}

impl CreditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Vendas fiado com os filtros já normalizados pelo service.
    /// Ordenação: pendentes antes de quitadas, depois vencimento mais
    /// próximo, depois nome do cliente.
    pub async fn list_deferred<'e, E>(
        &self,
        executor: E,
        customer: Option<&str>,
        initial: Option<&str>,
    ) -> Result<Vec<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT * FROM sales
            WHERE payment_method = 'deferred'
              AND ($1::text IS NULL OR customer_name = $1)
              AND ($2::text IS NULL OR customer_name ILIKE $2 || '%')
            ORDER BY
                CASE payment_status WHEN 'pending' THEN 0 ELSE 1 END,
                due_date ASC NULLS LAST,
                customer_name ASC
            "#,
        )
        .bind(customer)
        .bind(initial)
        .fetch_all(executor)
        .await?;
        Ok(sales)
    }

    /// Itens de um conjunto de vendas em uma só consulta.
    pub async fn items_for_sales<'e, E>(
        &self,
        executor: E,
        sale_ids: &[String],
    ) -> Result<Vec<SaleItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, SaleItem>(
            "SELECT * FROM sale_items WHERE sale_id = ANY($1) ORDER BY sale_id, id",
        )
        .bind(sale_ids)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn summary<'e, E>(
        &self,
        executor: E,
        customer: Option<&str>,
        initial: Option<&str>,
    ) -> Result<DeferredSummary, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let summary = sqlx::query_as::<_, DeferredSummary>(
            r#"
            SELECT
                COUNT(*) AS total_count,
                COUNT(*) FILTER (WHERE payment_status = 'pending') AS pending_count,
                COALESCE(SUM(total) FILTER (WHERE payment_status = 'pending'), 0) AS pending_total
            FROM sales
            WHERE payment_method = 'deferred'
              AND ($1::text IS NULL OR customer_name = $1)
              AND ($2::text IS NULL OR customer_name ILIKE $2 || '%')
            "#,
        )
        .bind(customer)
        .bind(initial)
        .fetch_one(executor)
        .await?;
        Ok(summary)
    }

    /// Quitação: UPDATE condicionado, `pending -> paid` uma única vez.
    /// Zero linhas afetadas é resultado negativo normal (já quitada ou
    /// inexistente), nunca erro — e nada de estoque muda aqui: a baixa
    /// acontece no registro da venda.
    pub async fn settle(&self, sale_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE sales
            SET payment_status = 'paid'
            WHERE id = $1
              AND payment_method = 'deferred'
              AND payment_status = 'pending'
            "#,
        )
        .bind(sale_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Observação livre em uma venda fiado; só exige que ela exista.
    pub async fn annotate(&self, sale_id: &str, note: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE sales SET note = $2 WHERE id = $1 AND payment_method = 'deferred'",
        )
        .bind(sale_id)
        .bind(note)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
