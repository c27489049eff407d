// src/models/credit.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::sale::{Sale, SaleItem};

// Filtro da listagem de fiado: nome exato do cliente OU inicial do nome.
// Mutuamente exclusivos; quando os dois vêm, o nome do cliente prevalece.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeferredFilter {
    pub customer: Option<String>,
    pub initial: Option<String>,
}

impl DeferredFilter {
    /// Normaliza o filtro: cliente tem precedência e a inicial é reduzida
    /// ao primeiro caractere.
    pub fn normalized(self) -> (Option<String>, Option<String>) {
        let customer = self
            .customer
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        if customer.is_some() {
            return (customer, None);
        }

        let initial = self
            .initial
            .and_then(|i| i.trim().chars().next().map(|c| c.to_string()));

        (None, initial)
    }
}

// Venda fiado anotada para a tela de cobrança
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeferredSale {
    #[serde(flatten)]
    pub sale: Sale,

    // Pendente e com vencimento anterior a hoje
    pub overdue: bool,

    pub items: Vec<SaleItem>,
}

// Agregados exibidos junto da listagem
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeferredSummary {
    pub total_count: i64,
    pub pending_count: i64,
    #[schema(example = "350.00")]
    pub pending_total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeferredList {
    pub sales: Vec<DeferredSale>,
    pub summary: DeferredSummary,
}

// Resultado da quitação: `settled = false` significa "já quitada ou
// inexistente" e não é um erro.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettleResult {
    pub settled: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatePayload {
    #[validate(length(max = 500, message = "A observação deve ter no máximo 500 caracteres."))]
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cliente_tem_precedencia_sobre_inicial() {
        let filter = DeferredFilter {
            customer: Some("Maria Souza".into()),
            initial: Some("J".into()),
        };
        let (customer, initial) = filter.normalized();
        assert_eq!(customer.as_deref(), Some("Maria Souza"));
        assert!(initial.is_none());
    }

    #[test]
    fn inicial_reduzida_ao_primeiro_caractere() {
        let filter = DeferredFilter {
            customer: None,
            initial: Some("Jo".into()),
        };
        let (customer, initial) = filter.normalized();
        assert!(customer.is_none());
        assert_eq!(initial.as_deref(), Some("J"));
    }

    #[test]
    fn filtro_vazio_lista_tudo() {
        let (customer, initial) = DeferredFilter::default().normalized();
        assert!(customer.is_none());
        assert!(initial.is_none());
    }

    #[test]
    fn cliente_em_branco_nao_conta_como_filtro() {
        let filter = DeferredFilter {
            customer: Some("   ".into()),
            initial: Some("M".into()),
        };
        let (customer, initial) = filter.normalized();
        assert!(customer.is_none());
        assert_eq!(initial.as_deref(), Some("M"));
    }
}
