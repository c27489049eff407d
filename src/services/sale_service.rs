// src/services/sale_service.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{ProductRepository, SaleRepository},
    models::sale::{
        generate_sale_id, CreateSalePayload, Sale, SaleDetail, SaleReceipt, SaleReportRow,
    },
};

// Processador de vendas: valida, calcula o total, persiste venda + itens
// e dá baixa no estoque — tudo ou nada.
#[derive(Clone)]
pub struct SaleService {
    sale_repo: SaleRepository,
    product_repo: ProductRepository,
    pool: PgPool,
}

impl SaleService {
    pub fn new(sale_repo: SaleRepository, product_repo: ProductRepository, pool: PgPool) -> Self {
        Self { sale_repo, product_repo, pool }
    }

    /// Registra uma venda como unidade atômica.
    ///
    /// Dentro de uma única transação: confere cada produto contra o catálogo
    /// (existência e preço), insere a venda e seus itens e decrementa o
    /// estoque com update relativo condicionado. Qualquer falha desfaz tudo;
    /// nunca fica venda sem item nem baixa de estoque sem venda.
    ///
    /// A baixa de estoque acontece no registro para qualquer método de
    /// pagamento — no fiado a mercadoria também sai na hora, só o pagamento
    /// fica pendente.
    pub async fn submit_sale(
        &self,
        payload: CreateSalePayload,
        user_id: Uuid,
    ) -> Result<SaleReceipt, AppError> {
        // 1. Validação de campos e de consistência, antes de qualquer escrita
        payload.validate()?;

        let now = Utc::now();
        let today = now.date_naive();
        payload.validate_consistency(today).map_err(|e| {
            let mut errors = validator::ValidationErrors::new();
            errors.add("dueDate", e);
            AppError::ValidationError(errors)
        })?;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // 2. Confere cada item contra o catálogo. O preço gravado é o do
        // catálogo no momento da venda; preço divergente derruba a venda
        // inteira (cliente adulterado não escolhe quanto paga).
        let mut total = Decimal::ZERO;
        for item in &payload.items {
            let catalog_price = self
                .product_repo
                .get_price(&mut *tx, item.product_id)
                .await?
                .ok_or(AppError::ProductNotFound(item.product_id))?;

            if catalog_price != item.unit_price {
                return Err(AppError::PriceMismatch { product_id: item.product_id });
            }

            total += item.quantity * catalog_price;
        }
        let total = total.round_dp(2);

        // 3. Monta e insere a venda
        let sale = Sale {
            id: generate_sale_id(now),
            created_at: now,
            customer_tax_id: payload.customer_tax_id.clone(),
            customer_name: payload.customer_name.clone(),
            total,
            payment_method: payload.payment_method,
            payment_status: payload.payment_method.initial_status(),
            // Vencimento só faz sentido no fiado
            due_date: payload
                .due_date
                .filter(|_| payload.payment_method.is_deferred()),
            note: payload.note.clone(),
            user_id,
        };

        self.sale_repo.insert_sale(&mut *tx, &sale).await?;

        // 4. Itens + baixa de estoque, na mesma transação
        for item in &payload.items {
            self.sale_repo
                .insert_item(&mut *tx, &sale.id, item.product_id, item.quantity, item.unit_price)
                .await?;

            let decremented = self
                .product_repo
                .decrement_stock(&mut *tx, item.product_id, item.quantity)
                .await?;

            if !decremented {
                // Rollback implícito: a transação é descartada no retorno
                return Err(AppError::InsufficientStock { product_id: item.product_id });
            }
        }

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(sale_id = %sale.id, total = %sale.total, "Venda registrada");

        Ok(SaleReceipt { success: true, sale_id: sale.id })
    }

    pub async fn get_sale(&self, sale_id: &str) -> Result<SaleDetail, AppError> {
        let sale = self
            .sale_repo
            .get_by_id(sale_id)
            .await?
            .ok_or_else(|| AppError::SaleNotFound(sale_id.to_string()))?;

        let items = self.sale_repo.get_items(sale_id).await?;

        Ok(SaleDetail { sale, items })
    }

    pub async fn list_report(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<SaleReportRow>, AppError> {
        self.sale_repo.list_report(start_date, end_date).await
    }
}
