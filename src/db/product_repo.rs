// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::product::{LowStockProduct, Product, ProductPayload},
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras (usam a pool principal)
    // ---

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    /// Busca do catálogo: nome por substring ou código de barras exato,
    /// com filtro opcional de categoria.
    pub async fn list(
        &self,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR barcode = $1)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY name ASC
            "#,
        )
        .bind(search)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn categories(&self) -> Result<Vec<String>, AppError> {
        let categories =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM products ORDER BY category ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    pub async fn low_stock(&self) -> Result<Vec<LowStockProduct>, AppError> {
        let rows = sqlx::query_as::<_, LowStockProduct>(
            r#"
            SELECT id, name, quantity, min_stock
            FROM products
            WHERE quantity < min_stock
            ORDER BY quantity ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---
    // Escritas
    // ---

    pub async fn create(&self, payload: &ProductPayload) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                name, description, category, price, quantity,
                min_stock, barcode, sale_unit, supplier_id, expiry_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.category)
        .bind(payload.price)
        .bind(payload.quantity)
        .bind(payload.min_stock)
        .bind(&payload.barcode)
        .bind(payload.sale_unit)
        .bind(payload.supplier_id)
        .bind(payload.expiry_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::translate_write_error(e, payload))
    }

    /// Edição de catálogo substitui o registro inteiro, inclusive a
    /// quantidade (ajuste manual de estoque).
    pub async fn update(&self, id: i32, payload: &ProductPayload) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = $2, description = $3, category = $4, price = $5,
                quantity = $6, min_stock = $7, barcode = $8, sale_unit = $9,
                supplier_id = $10, expiry_date = $11, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.category)
        .bind(payload.price)
        .bind(payload.quantity)
        .bind(payload.min_stock)
        .bind(&payload.barcode)
        .bind(payload.sale_unit)
        .bind(payload.supplier_id)
        .bind(payload.expiry_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::translate_write_error(e, payload))?
        .ok_or(AppError::ProductNotFound(id))
    }

    /// Produtos referenciados por itens de venda não podem ser excluídos
    /// (FK RESTRICT); o histórico de vendas prevalece.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ProductReferencedBySales(id);
                    }
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProductNotFound(id));
        }
        Ok(())
    }

    // ---
    // Funções transacionais da venda
    // ---

    /// Preço de catálogo dentro da transação da venda.
    pub async fn get_price<'e, E>(&self, executor: E, id: i32) -> Result<Option<Decimal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let price = sqlx::query_scalar::<_, Decimal>("SELECT price FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(price)
    }

    /// Baixa de estoque relativa e condicionada, avaliada atomicamente pelo
    /// banco. `quantity = quantity - $n` nunca perde atualização concorrente,
    /// e o guard `quantity >= $n` mantém o estoque não-negativo: zero linhas
    /// afetadas significa estoque insuficiente (ou produto removido).
    pub async fn decrement_stock<'e, E>(
        &self,
        executor: E,
        id: i32,
        quantity: Decimal,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity - $2, updated_at = now()
            WHERE id = $1 AND quantity >= $2
            "#,
        )
        .bind(id)
        .bind(quantity)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    fn translate_write_error(e: sqlx::Error, payload: &ProductPayload) -> AppError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::BarcodeAlreadyExists;
            }
            if db_err.is_foreign_key_violation() {
                return AppError::SupplierNotFound(payload.supplier_id.unwrap_or_default());
            }
        }
        e.into()
    }
}
