// src/services/product_service.rs

use crate::{
    common::error::AppError,
    db::ProductRepository,
    models::product::{LowStockProduct, Product, ProductPayload},
};

#[derive(Clone)]
pub struct ProductService {
    product_repo: ProductRepository,
}

impl ProductService {
    pub fn new(product_repo: ProductRepository) -> Self {
        Self { product_repo }
    }

    pub async fn create(&self, payload: &ProductPayload) -> Result<Product, AppError> {
        let product = self.product_repo.create(payload).await?;
        tracing::info!(id = product.id, name = %product.name, "Produto cadastrado");
        Ok(product)
    }

    pub async fn update(&self, id: i32, payload: &ProductPayload) -> Result<Product, AppError> {
        self.product_repo.update(id, payload).await
    }

    pub async fn get(&self, id: i32) -> Result<Product, AppError> {
        self.product_repo
            .get_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound(id))
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, AppError> {
        self.product_repo.list(search, category).await
    }

    pub async fn categories(&self) -> Result<Vec<String>, AppError> {
        self.product_repo.categories().await
    }

    pub async fn low_stock(&self) -> Result<Vec<LowStockProduct>, AppError> {
        self.product_repo.low_stock().await
    }

    /// Exclusão é recusada enquanto houver itens de venda apontando para o
    /// produto; o histórico não fica órfão.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.product_repo.delete(id).await?;
        tracing::info!(id = id, "Produto excluído");
        Ok(())
    }
}
