// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

/// Qual restrição de unicidade foi violada no armazenamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    DocumentNumber,
    ReferenceNumber,
    BrandName,
}

impl UniqueKey {
    pub fn code(&self) -> &'static str {
        match self {
            UniqueKey::DocumentNumber => "duplicate_document_number",
            UniqueKey::ReferenceNumber => "duplicate_reference_number",
            UniqueKey::BrandName => "duplicate_brand_name",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("CPF inválido")]
    InvalidDocument,

    #[error("Marca de relógio inválida ou inativa")]
    InvalidBrand,

    #[error("Tipos de reparo inválidos ou inativos")]
    InvalidRepairTypes,

    #[error("Registro duplicado: {0:?}")]
    DuplicateResource(UniqueKey),

    #[error("Recurso não encontrado: {0}")]
    NotFound(&'static str),

    #[error("Status inválido: {0}")]
    InvalidStatus(String),

    #[error("Identificador malformado: {0}")]
    MalformedIdentifier(String),

    #[error("Nenhum número de referência livre após {0} tentativas")]
    ReferenceSpaceExhausted(u32),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Código estável usado no corpo da resposta e como chave do catálogo i18n.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::InvalidDocument => "invalid_document",
            AppError::InvalidBrand => "invalid_brand",
            AppError::InvalidRepairTypes => "invalid_repair_types",
            AppError::DuplicateResource(key) => key.code(),
            AppError::NotFound(_) => "not_found",
            AppError::InvalidStatus(_) => "invalid_status",
            AppError::MalformedIdentifier(_) => "malformed_identifier",
            AppError::ReferenceSpaceExhausted(_) => "reference_space_exhausted",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidDocument
            | AppError::InvalidBrand
            | AppError::InvalidRepairTypes
            | AppError::InvalidStatus(_)
            | AppError::MalformedIdentifier(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateResource(_) => StatusCode::CONFLICT,
            AppError::ReferenceSpaceExhausted(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converte o erro de domínio na resposta HTTP, com a mensagem no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();
        let code = self.code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                collect_field_messages("", errors, &mut details);
                Some(json!(details))
            }
            AppError::InvalidStatus(value) | AppError::MalformedIdentifier(value) => {
                Some(json!({ "value": value }))
            }
            AppError::NotFound(resource) => Some(json!({ "resource": resource })),
            _ => None,
        };

        ApiError {
            status,
            code,
            message: store.translate(&locale.0, code),
            details,
        }
    }
}

// Campos aninhados (customer_data.cpf, ...) viram chaves com ponto.
fn collect_field_messages(
    prefix: &str,
    errors: &ValidationErrors,
    out: &mut HashMap<String, Vec<String>>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                out.insert(path, messages);
            }
            ValidationErrorsKind::Struct(inner) => collect_field_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_messages(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

/// Erro já traduzido, pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "code": self.code,
            "error": self.message,
        });
        if let Some(details) = self.details {
            body["details"] = details;
        }
        (self.status, Json(body)).into_response()
    }
}

/// Traduz violação de unicidade do Postgres para o erro de domínio correspondente.
pub fn map_unique_violation(e: sqlx::Error, key: UniqueKey) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            tracing::warn!("⚠️ Violação de unicidade ({:?}) detectada no banco.", key);
            return AppError::DuplicateResource(key);
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(AppError::InvalidDocument.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidStatus("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("repair_request").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::DuplicateResource(UniqueKey::BrandName).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn translated_message_follows_locale() {
        let store = I18nStore::new();
        let pt = AppError::InvalidDocument.to_api_error(&Locale("pt".into()), &store);
        let en = AppError::InvalidDocument.to_api_error(&Locale("en".into()), &store);
        assert_eq!(pt.code, "invalid_document");
        assert_ne!(pt.message, en.message);
    }

    #[test]
    fn nested_validation_errors_use_dotted_paths() {
        use crate::models::repair::RepairData;
        use validator::Validate;

        #[derive(Validate)]
        struct Wrapper {
            #[validate(nested)]
            repair_data: RepairData,
        }

        let errors = Wrapper {
            repair_data: RepairData {
                repair_type_ids: vec![],
                problem_description: "Parado".into(),
            },
        }
        .validate()
        .unwrap_err();

        let api = AppError::ValidationError(errors).to_api_error(&Locale::default(), &I18nStore::new());
        let details = api.details.unwrap();
        assert!(details.get("repair_data.repair_type_ids").is_some());
    }
}
