// src/models/supplier.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i32,

    #[schema(example = "Frigorífico Central")]
    pub name: String,

    #[schema(example = "12.345.678/0001-99")]
    pub cnpj: String,

    #[schema(example = "(11) 98765-4321")]
    pub contact: String,

    pub address: Option<String>,
}

// Cadastro e edição compartilham o formato
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 14, max = 18, message = "CNPJ inválido."))]
    pub cnpj: String,

    #[validate(length(min = 1, message = "O contato é obrigatório."))]
    pub contact: String,

    pub address: Option<String>,
}
