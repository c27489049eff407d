// src/db/supplier_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::supplier::{Supplier, SupplierPayload},
};

#[derive(Clone)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Supplier>, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(supplier)
    }

    /// Busca por nome (substring) ou CNPJ exato.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT * FROM suppliers
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR cnpj = $1)
            ORDER BY name ASC
            "#,
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    pub async fn create(&self, payload: &SupplierPayload) -> Result<Supplier, AppError> {
        sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, cnpj, contact, address)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.cnpj)
        .bind(&payload.contact)
        .bind(&payload.address)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::translate_unique)
    }

    pub async fn update(&self, id: i32, payload: &SupplierPayload) -> Result<Supplier, AppError> {
        sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = $2, cnpj = $3, contact = $4, address = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.cnpj)
        .bind(&payload.contact)
        .bind(&payload.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::translate_unique)?
        .ok_or(AppError::SupplierNotFound(id))
    }

    /// Excluir fornecedor apenas anula a referência nos produtos
    /// (ON DELETE SET NULL), nunca falha por vínculo.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::SupplierNotFound(id));
        }
        Ok(())
    }

    fn translate_unique(e: sqlx::Error) -> AppError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::CnpjAlreadyExists;
            }
        }
        e.into()
    }
}
