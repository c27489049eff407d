// src/models/sale.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Pix,
    Deferred, // Fiado: pagamento combinado para depois
}

impl PaymentMethod {
    pub fn is_deferred(&self) -> bool {
        matches!(self, PaymentMethod::Deferred)
    }

    /// Status inicial do pagamento: fiado nasce pendente, o resto nasce pago.
    pub fn initial_status(&self) -> PaymentStatus {
        if self.is_deferred() {
            PaymentStatus::Pending
        } else {
            PaymentStatus::Paid
        }
    }
}

// Máquina de estados: `pending -> paid` via quitação, sem volta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    // Ex.: "V20250601143000-a3f29c"
    #[schema(example = "V20250601143000-a3f29c")]
    pub id: String,

    pub created_at: DateTime<Utc>,

    pub customer_tax_id: Option<String>,
    pub customer_name: Option<String>,

    // Fato histórico: sempre igual à soma dos itens no momento da criação.
    #[schema(example = "249.75")]
    pub total: Decimal,

    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    pub note: Option<String>,

    // Operador que registrou a venda
    pub user_id: Uuid,
}

impl Sale {
    /// Fiado vencido: ainda pendente e com vencimento estritamente anterior a hoje.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.payment_status == PaymentStatus::Pending
            && self.due_date.map(|due| due < today).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: i32,
    pub sale_id: String,
    pub product_id: i32,

    #[schema(example = "2.5")]
    pub quantity: Decimal,

    // Preço capturado na venda; mudanças posteriores de catálogo não
    // alteram vendas já registradas.
    #[schema(example = "99.90")]
    pub unit_price: Decimal,
}

// Venda com seus itens (detalhe para consulta)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

// Linha do relatório de vendas (join com o operador)
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleReportRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub operator: String,
}

// ---
// Validação customizada
// ---
fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() || val.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: registrar venda
// ---
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemPayload {
    pub product_id: i32,

    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    // Cruzado com o preço de catálogo no processamento; divergência rejeita
    // a venda inteira.
    #[validate(custom(function = "validate_positive"))]
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub customer_tax_id: Option<String>,
    pub customer_name: Option<String>,

    pub payment_method: PaymentMethod,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,

    pub note: Option<String>,

    #[validate(length(min = 1, message = "A venda deve ter pelo menos um item."), nested)]
    pub items: Vec<SaleItemPayload>,
}

impl CreateSalePayload {
    /// Regras que dependem de mais de um campo: fiado exige vencimento,
    /// e o vencimento não pode estar no passado.
    pub fn validate_consistency(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.payment_method.is_deferred() {
            match self.due_date {
                None => {
                    let mut err = ValidationError::new("DueDateRequired");
                    err.message = Some("Venda fiado exige data de vencimento.".into());
                    return Err(err);
                }
                Some(due) if due < today => {
                    let mut err = ValidationError::new("DueDateInPast");
                    err.message =
                        Some("A data de vencimento não pode estar no passado.".into());
                    return Err(err);
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Total da venda: Σ(quantidade × preço unitário), arredondado para
    /// centavos. Decimal de ponta a ponta, sem drift de ponto flutuante.
    pub fn compute_total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.quantity * item.unit_price)
            .sum::<Decimal>()
            .round_dp(2)
    }
}

// Resposta do registro de venda
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleReceipt {
    pub success: bool,
    #[schema(example = "V20250601143000-a3f29c")]
    pub sale_id: String,
}

/// Gera o identificador da venda: "V" + timestamp + sufixo aleatório.
///
/// O timestamp sozinho colide em submissões no mesmo segundo; o sufixo
/// (6 hex de um UUID v4) torna a colisão improvável por construção. Se
/// ainda assim colidir, o INSERT devolve conflito e o caller pode repetir.
pub fn generate_sale_id(now: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(6).collect();
    format!("V{}-{}", now.format("%Y%m%d%H%M%S"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn payload(method: PaymentMethod, due_date: Option<NaiveDate>) -> CreateSalePayload {
        CreateSalePayload {
            customer_tax_id: None,
            customer_name: Some("Cliente Teste".into()),
            payment_method: method,
            due_date,
            note: None,
            items: vec![SaleItemPayload {
                product_id: 1,
                quantity: dec("2.5"),
                unit_price: dec("99.90"),
            }],
        }
    }

    #[test]
    fn total_e_soma_exata_dos_itens() {
        let p = payload(PaymentMethod::Cash, None);
        assert_eq!(p.compute_total(), dec("249.75"));
    }

    #[test]
    fn total_soma_varios_itens_e_arredonda_para_centavos() {
        let mut p = payload(PaymentMethod::Cash, None);
        p.items.push(SaleItemPayload {
            product_id: 2,
            quantity: dec("0.333"),
            unit_price: dec("19.90"),
        });
        // 249.75 + 6.62667 -> 256.38
        assert_eq!(p.compute_total(), dec("256.38"));
    }

    #[test]
    fn status_inicial_deriva_do_metodo() {
        assert_eq!(PaymentMethod::Cash.initial_status(), PaymentStatus::Paid);
        assert_eq!(PaymentMethod::Card.initial_status(), PaymentStatus::Paid);
        assert_eq!(PaymentMethod::Pix.initial_status(), PaymentStatus::Paid);
        assert_eq!(
            PaymentMethod::Deferred.initial_status(),
            PaymentStatus::Pending
        );
    }

    #[test]
    fn fiado_sem_vencimento_e_rejeitado() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let p = payload(PaymentMethod::Deferred, None);
        assert!(p.validate_consistency(today).is_err());
    }

    #[test]
    fn fiado_com_vencimento_no_passado_e_rejeitado() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        let p = payload(PaymentMethod::Deferred, Some(past));
        assert!(p.validate_consistency(today).is_err());
    }

    #[test]
    fn fiado_com_vencimento_hoje_ou_futuro_passa() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let future = today + chrono::Duration::days(30);
        assert!(payload(PaymentMethod::Deferred, Some(today))
            .validate_consistency(today)
            .is_ok());
        assert!(payload(PaymentMethod::Deferred, Some(future))
            .validate_consistency(today)
            .is_ok());
    }

    #[test]
    fn venda_a_vista_ignora_vencimento() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(payload(PaymentMethod::Pix, Some(past))
            .validate_consistency(today)
            .is_ok());
    }

    #[test]
    fn venda_sem_itens_falha_na_validacao() {
        let mut p = payload(PaymentMethod::Cash, None);
        p.items.clear();
        assert!(p.validate().is_err());
    }

    #[test]
    fn item_com_quantidade_zero_falha_na_validacao() {
        let mut p = payload(PaymentMethod::Cash, None);
        p.items[0].quantity = Decimal::ZERO;
        assert!(p.validate().is_err());
    }

    #[test]
    fn id_de_venda_tem_formato_e_nao_repete() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap();
        let a = generate_sale_id(now);
        let b = generate_sale_id(now);

        assert!(a.starts_with("V20250601143000-"));
        assert_eq!(a.len(), "V20250601143000-".len() + 6);
        // Mesmo segundo, ids distintos
        assert_ne!(a, b);
    }

    #[test]
    fn fiado_vencido_somente_quando_pendente_e_antes_de_hoje() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let sale = Sale {
            id: "V1-abc".into(),
            created_at: Utc::now(),
            customer_tax_id: None,
            customer_name: Some("João".into()),
            total: dec("50.00"),
            payment_method: PaymentMethod::Deferred,
            payment_status: PaymentStatus::Pending,
            due_date: NaiveDate::from_ymd_opt(2025, 6, 9),
            note: None,
            user_id: Uuid::new_v4(),
        };
        assert!(sale.is_overdue(today));

        // Vencimento hoje ainda não está vencido
        let mut due_today = sale.clone();
        due_today.due_date = Some(today);
        assert!(!due_today.is_overdue(today));

        // Quitada nunca fica vencida
        let mut paid = sale.clone();
        paid.payment_status = PaymentStatus::Paid;
        assert!(!paid.is_overdue(today));
    }
}
