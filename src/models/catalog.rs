// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Marcas de relógio ---

// "Excluir" uma marca é só desativar: pedidos antigos continuam apontando para ela.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WatchBrand {
    pub id: Uuid,
    #[schema(example = "Rolex")]
    pub name: String,
    #[schema(example = true)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// --- Tipos de reparo ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RepairType {
    pub id: Uuid,
    #[schema(example = "Troca de Bateria")]
    pub name: String,
    #[schema(example = "Substituição da bateria e teste de vedação")]
    pub description: Option<String>,
    #[schema(example = "25.00")]
    pub estimated_price: Option<Decimal>,
    #[schema(example = true)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Dados do formulário público: só o que está ativo.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormData {
    pub watch_brands: Vec<WatchBrand>,
    pub repair_types: Vec<RepairType>,
}

// --- Payloads de administração ---

fn default_true() -> bool {
    true
}

pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct WatchBrandPayload {
    #[validate(length(min = 1, max = 100, message = "O nome deve ter entre 1 e 100 caracteres."))]
    #[schema(example = "Omega")]
    pub name: String,

    #[serde(default = "default_true")]
    #[schema(example = true)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RepairTypePayload {
    #[validate(length(min = 1, max = 100, message = "O nome deve ter entre 1 e 100 caracteres."))]
    #[schema(example = "Polimento")]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "80.00")]
    pub estimated_price: Option<Decimal>,

    #[serde(default = "default_true")]
    #[schema(example = true)]
    pub is_active: bool,
}
