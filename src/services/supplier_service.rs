// src/services/supplier_service.rs

use crate::{
    common::error::AppError,
    db::SupplierRepository,
    models::supplier::{Supplier, SupplierPayload},
};

#[derive(Clone)]
pub struct SupplierService {
    supplier_repo: SupplierRepository,
}

impl SupplierService {
    pub fn new(supplier_repo: SupplierRepository) -> Self {
        Self { supplier_repo }
    }

    pub async fn create(&self, payload: &SupplierPayload) -> Result<Supplier, AppError> {
        self.supplier_repo.create(payload).await
    }

    pub async fn update(&self, id: i32, payload: &SupplierPayload) -> Result<Supplier, AppError> {
        self.supplier_repo.update(id, payload).await
    }

    pub async fn get(&self, id: i32) -> Result<Supplier, AppError> {
        self.supplier_repo
            .get_by_id(id)
            .await?
            .ok_or(AppError::SupplierNotFound(id))
    }

    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Supplier>, AppError> {
        self.supplier_repo.list(search).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.supplier_repo.delete(id).await
    }
}
