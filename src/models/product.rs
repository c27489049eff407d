// src/models/product.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// Como o produto é vendido: por unidade (linguiça, hambúrguer) ou por
// peso em quilos (picanha, costela). Quantidades por peso são fracionárias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_unit", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SaleUnit {
    Unit,
    Weight,
}

impl Default for SaleUnit {
    fn default() -> Self {
        SaleUnit::Unit
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,

    #[schema(example = "Picanha Bovina")]
    pub name: String,

    pub description: Option<String>,

    #[schema(example = "Carnes Nobres")]
    pub category: String,

    #[schema(example = "99.90")]
    pub price: Decimal,

    // Quantidade em estoque. Invariante: nunca fica negativa após uma
    // venda confirmada (garantido pelo decremento condicionado + CHECK).
    #[schema(example = "50.0")]
    pub quantity: Decimal,

    #[schema(example = "10.0")]
    pub min_stock: Decimal,

    pub barcode: Option<String>,

    pub sale_unit: SaleUnit,

    // Referência fraca: excluir o fornecedor apenas anula este campo.
    pub supplier_id: Option<i32>,

    #[schema(value_type = Option<String>, format = Date)]
    pub expiry_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// Validação customizada para campos Decimal
// ---
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// Cadastro/edição usam o mesmo formato (a edição substitui o registro,
// como na tela de edição do catálogo).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)] // Se o JSON não tiver esse campo, assume 0
    pub quantity: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub min_stock: Decimal,

    pub barcode: Option<String>,

    #[serde(default)]
    pub sale_unit: SaleUnit,

    pub supplier_id: Option<i32>,

    #[schema(value_type = Option<String>, format = Date)]
    pub expiry_date: Option<NaiveDate>,
}

// Linha do alerta de estoque baixo (quantidade abaixo do mínimo)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LowStockProduct {
    pub id: i32,
    pub name: String,
    pub quantity: Decimal,
    pub min_stock: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn payload_base() -> ProductPayload {
        ProductPayload {
            name: "Linguiça Toscana".into(),
            description: None,
            category: "Embutidos".into(),
            price: dec("28.90"),
            quantity: dec("100"),
            min_stock: dec("20"),
            barcode: Some("7891234567890".into()),
            sale_unit: SaleUnit::Unit,
            supplier_id: None,
            expiry_date: None,
        }
    }

    #[test]
    fn payload_valido_passa() {
        assert!(payload_base().validate().is_ok());
    }

    #[test]
    fn payload_rejeita_preco_negativo() {
        let mut payload = payload_base();
        payload.price = dec("-1.00");
        assert!(payload.validate().is_err());
    }

    #[test]
    fn payload_rejeita_nome_vazio() {
        let mut payload = payload_base();
        payload.name = "".into();
        assert!(payload.validate().is_err());
    }
}
