// src/services/credit_service.rs

use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::CreditRepository,
    models::{
        credit::{DeferredFilter, DeferredList, DeferredSale, SettleResult},
        sale::SaleItem,
    },
};

// Controle do fiado: lista as vendas com pagamento combinado, marca as
// vencidas e registra quitações.
#[derive(Clone)]
pub struct CreditService {
    credit_repo: CreditRepository,
    pool: PgPool,
}

impl CreditService {
    pub fn new(credit_repo: CreditRepository, pool: PgPool) -> Self {
        Self { credit_repo, pool }
    }

    /// Listagem com itens e agregados em um snapshot só (uma transação de
    /// leitura), cada venda anotada como vencida ou não.
    pub async fn list_deferred(&self, filter: DeferredFilter) -> Result<DeferredList, AppError> {
        let (customer, initial) = filter.normalized();
        let today = Utc::now().date_naive();

        let mut tx = self.pool.begin().await?;

        let sales = self
            .credit_repo
            .list_deferred(&mut *tx, customer.as_deref(), initial.as_deref())
            .await?;

        let sale_ids: Vec<String> = sales.iter().map(|s| s.id.clone()).collect();
        let items = self.credit_repo.items_for_sales(&mut *tx, &sale_ids).await?;

        let summary = self
            .credit_repo
            .summary(&mut *tx, customer.as_deref(), initial.as_deref())
            .await?;

        tx.commit().await?;

        // Agrupa os itens por venda preservando a ordem da listagem
        let mut items_by_sale: HashMap<String, Vec<SaleItem>> = HashMap::new();
        for item in items {
            items_by_sale.entry(item.sale_id.clone()).or_default().push(item);
        }

        let sales = sales
            .into_iter()
            .map(|sale| {
                let overdue = sale.is_overdue(today);
                let items = items_by_sale.remove(&sale.id).unwrap_or_default();
                DeferredSale { sale, overdue, items }
            })
            .collect();

        Ok(DeferredList { sales, summary })
    }

    /// Quitação é idempotente: a segunda chamada (ou um id desconhecido)
    /// responde `settled = false`, sem erro e sem tocar no estoque.
    pub async fn settle(&self, sale_id: &str) -> Result<SettleResult, AppError> {
        let settled = self.credit_repo.settle(sale_id).await?;

        let message = if settled {
            tracing::info!(sale_id = %sale_id, "Fiado quitado");
            "Pagamento registrado.".to_string()
        } else {
            "Venda não encontrada ou já quitada.".to_string()
        };

        Ok(SettleResult { settled, message })
    }

    pub async fn annotate(&self, sale_id: &str, note: &str) -> Result<(), AppError> {
        let rows = self.credit_repo.annotate(sale_id, note).await?;
        if rows == 0 {
            return Err(AppError::SaleNotFound(sale_id.to_string()));
        }
        Ok(())
    }
}
