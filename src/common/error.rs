use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Política de propagação: erros corrigíveis pelo cliente têm variantes
// próprias (4xx); problemas de infraestrutura viram 500 genérico e o
// detalhe fica só no log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso restrito a gerentes")]
    GerenteOnly,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Username já está em uso")]
    UsernameAlreadyExists,

    #[error("E-mail já está em uso")]
    EmailAlreadyExists,

    #[error("Produto {0} não encontrado")]
    ProductNotFound(i32),

    #[error("Código de barras já cadastrado")]
    BarcodeAlreadyExists,

    #[error("Produto {0} possui vendas registradas e não pode ser excluído")]
    ProductReferencedBySales(i32),

    #[error("Fornecedor {0} não encontrado")]
    SupplierNotFound(i32),

    #[error("CNPJ já cadastrado")]
    CnpjAlreadyExists,

    #[error("Venda {0} não encontrada")]
    SaleNotFound(String),

    #[error("Estoque insuficiente para o produto {product_id}")]
    InsufficientStock { product_id: i32 },

    #[error("Preço informado para o produto {product_id} diverge do catálogo")]
    PriceMismatch { product_id: i32 },

    // Colisão do id de venda: rara por construção, o cliente pode reenviar.
    #[error("Identificador de venda em conflito, tente novamente")]
    SaleIdConflict,

    #[error("A loja precisa de ao menos um gerente")]
    LastManager,

    #[error("Usuário possui vendas registradas e não pode ser excluído")]
    UserHasSales,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` captura o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Status HTTP associado a cada variante.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::PriceMismatch { .. } => {
                StatusCode::BAD_REQUEST
            }

            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,

            AppError::GerenteOnly => StatusCode::FORBIDDEN,

            AppError::UserNotFound
            | AppError::ProductNotFound(_)
            | AppError::SupplierNotFound(_)
            | AppError::SaleNotFound(_) => StatusCode::NOT_FOUND,

            AppError::UsernameAlreadyExists
            | AppError::EmailAlreadyExists
            | AppError::BarcodeAlreadyExists
            | AppError::ProductReferencedBySales(_)
            | AppError::CnpjAlreadyExists
            | AppError::InsufficientStock { .. }
            | AppError::SaleIdConflict
            | AppError::LastManager
            | AppError::UserHasSales => StatusCode::CONFLICT,

            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Validação retorna todos os detalhes, campo a campo.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "success": false,
                "error": "Um ou mais campos são inválidos.",
                "details": details,
            }));
            return (status, body).into_response();
        }

        let error_message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O `tracing` guarda a mensagem detalhada; o cliente recebe o genérico.
            tracing::error!("Erro interno do servidor: {:?}", self);
            "Ocorreu um erro inesperado.".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erros_de_negocio_viram_4xx() {
        assert_eq!(
            AppError::InsufficientStock { product_id: 7 }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::PriceMismatch { product_id: 7 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ProductNotFound(1).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::LastManager.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::SaleIdConflict.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn erros_de_infra_viram_500() {
        let err = AppError::InternalServerError(anyhow::anyhow!("detalhe interno"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn autenticacao_e_autorizacao() {
        assert_eq!(
            AppError::InvalidToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::GerenteOnly.status_code(), StatusCode::FORBIDDEN);
    }
}
