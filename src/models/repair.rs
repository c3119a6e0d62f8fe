// src/models/repair.rs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;
use crate::models::catalog::validate_not_negative;
use crate::models::customer::CustomerData;

// --- ENUMS ---

// Mapeia o CREATE TYPE repair_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "repair_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepairStatus {
    Pending,
    InProgress,
    Completed,
    Delivered,
}

impl RepairStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairStatus::Pending => "PENDING",
            RepairStatus::InProgress => "IN_PROGRESS",
            RepairStatus::Completed => "COMPLETED",
            RepairStatus::Delivered => "DELIVERED",
        }
    }
}

impl FromStr for RepairStatus {
    type Err = AppError;

    // Aceita qualquer caixa: "in_progress" == "IN_PROGRESS"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(RepairStatus::Pending),
            "IN_PROGRESS" => Ok(RepairStatus::InProgress),
            "COMPLETED" => Ok(RepairStatus::Completed),
            "DELIVERED" => Ok(RepairStatus::Delivered),
            _ => Err(AppError::InvalidStatus(s.to_string())),
        }
    }
}

// Mapeia o CREATE TYPE watch_type do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "watch_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchType {
    Automatic,
    Battery,
    Manual,
}

// --- AGREGADO ---

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WatchBrandRef {
    pub id: Uuid,
    #[schema(example = "Rolex")]
    pub name: String,
}

/// Tipo de reparo como ficou associado ao pedido no momento da criação.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct RepairTypeRef {
    pub id: Uuid,
    #[schema(example = "Troca de Bateria")]
    pub name: String,
    pub description: Option<String>,
}

// Linha crua de repair_requests + nome da marca (JOIN)
#[derive(Debug, Clone, FromRow)]
pub struct RepairRequestRow {
    pub id: Uuid,
    pub reference_number: String,
    pub customer_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_document: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_email: Option<String>,
    pub watch_brand_id: Uuid,
    pub watch_brand_name: String,
    pub watch_type: WatchType,
    pub problem_description: String,
    pub status: RepairStatus,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub total_price: Option<Decimal>,
    pub internal_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pedido de reparo completo: os dados do cliente são uma cópia feita na submissão,
/// independente do cadastro vinculado em `customer_id`.
#[derive(Debug, Clone)]
pub struct RepairRequest {
    pub id: Uuid,
    pub reference_number: String,
    pub customer_id: Option<Uuid>,
    pub customer: CustomerData,
    pub watch_brand: WatchBrandRef,
    pub watch_type: WatchType,
    pub problem_description: String,
    pub status: RepairStatus,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub total_price: Option<Decimal>,
    pub internal_notes: Option<String>,
    pub repair_types: Vec<RepairTypeRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RepairRequest {
    pub fn from_row(row: RepairRequestRow, repair_types: Vec<RepairTypeRef>) -> Self {
        Self {
            id: row.id,
            reference_number: row.reference_number,
            customer_id: row.customer_id,
            customer: CustomerData {
                name: row.customer_name,
                cpf: row.customer_document,
                phone: row.customer_phone,
                address: row.customer_address,
                email: row.customer_email,
            },
            watch_brand: WatchBrandRef {
                id: row.watch_brand_id,
                name: row.watch_brand_name,
            },
            watch_type: row.watch_type,
            problem_description: row.problem_description,
            status: row.status,
            estimated_completion: row.estimated_completion,
            total_price: row.total_price,
            internal_notes: row.internal_notes,
            repair_types,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// O que o store precisa para gravar um pedido novo (status inicial é sempre PENDING).
#[derive(Debug, Clone)]
pub struct NewRepairRequest {
    pub id: Uuid,
    pub reference_number: String,
    pub customer_id: Option<Uuid>,
    pub customer: CustomerData,
    pub watch_brand: WatchBrandRef,
    pub watch_type: WatchType,
    pub problem_description: String,
    pub repair_types: Vec<RepairTypeRef>,
    pub created_at: DateTime<Utc>,
}

/// Campos alteráveis pelo admin; `None` mantém o valor atual.
#[derive(Debug, Clone, Default)]
pub struct RepairRequestChanges {
    pub status: Option<RepairStatus>,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub total_price: Option<Decimal>,
    pub internal_notes: Option<String>,
}

// --- PAYLOADS ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct WatchData {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub brand_id: String,
    #[serde(rename = "type")]
    #[schema(example = "AUTOMATIC")]
    pub watch_type: WatchType,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RepairData {
    #[validate(length(min = 1, message = "Selecione ao menos um tipo de reparo."))]
    #[schema(example = json!(["550e8400-e29b-41d4-a716-446655440001"]))]
    pub repair_type_ids: Vec<String>,

    #[validate(length(min = 1, message = "Descreva o problema."))]
    #[schema(example = "O relógio atrasa 5 minutos por dia")]
    pub problem_description: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RepairSubmission {
    #[validate(nested)]
    pub customer_data: CustomerData,
    #[validate(nested)]
    pub watch_data: WatchData,
    #[validate(nested)]
    pub repair_data: RepairData,
    #[serde(default)]
    pub create_customer_account: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RepairUpdatePayload {
    #[schema(example = "IN_PROGRESS")]
    pub status: Option<String>,
    pub estimated_completion: Option<DateTime<Utc>>,
    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = "350.00")]
    pub total_price: Option<Decimal>,
    #[schema(example = "Aguardando peça do fornecedor")]
    pub internal_notes: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ListQuery {
    pub status: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "A página começa em 1."))]
    pub page: u32,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "O limite deve estar entre 1 e 100."))]
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            status: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

// --- RESPOSTAS ---

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedRepairRequest {
    pub id: Uuid,
    #[schema(example = "REP-2025-042")]
    pub reference_number: String,
    pub status: RepairStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionResult {
    pub success: bool,
    pub repair_request: CreatedRepairRequest,
    pub customer_account_created: bool,
    pub message: String,
}

/// Visão pública do andamento. As notas internas só aparecem depois que o reparo sai de PENDING.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicStatusView {
    pub id: Uuid,
    pub reference_number: String,
    pub status: RepairStatus,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub customer_name: String,
    pub watch_brand: String,
    pub repair_types: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl From<&RepairRequest> for PublicStatusView {
    fn from(r: &RepairRequest) -> Self {
        let notes = match r.status {
            RepairStatus::Pending => None,
            RepairStatus::InProgress | RepairStatus::Completed | RepairStatus::Delivered => {
                r.internal_notes.clone()
            }
        };

        Self {
            id: r.id,
            reference_number: r.reference_number.clone(),
            status: r.status,
            estimated_completion: r.estimated_completion,
            customer_name: r.customer.name.clone(),
            watch_brand: r.watch_brand.name.clone(),
            repair_types: r.repair_types.iter().map(|t| t.name.clone()).collect(),
            created_at: r.created_at,
            notes,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminSummary {
    pub id: Uuid,
    pub reference_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub watch_brand: String,
    pub watch_type: WatchType,
    pub repair_types: Vec<String>,
    pub status: RepairStatus,
    pub total_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl From<&RepairRequest> for AdminSummary {
    fn from(r: &RepairRequest) -> Self {
        Self {
            id: r.id,
            reference_number: r.reference_number.clone(),
            customer_name: r.customer.name.clone(),
            customer_phone: r.customer.phone.clone(),
            watch_brand: r.watch_brand.name.clone(),
            watch_type: r.watch_type,
            repair_types: r.repair_types.iter().map(|t| t.name.clone()).collect(),
            status: r.status,
            total_price: r.total_price,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDetail {
    pub id: Uuid,
    pub reference_number: String,
    pub customer_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_cpf: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_email: Option<String>,
    pub watch_brand: String,
    pub watch_type: WatchType,
    pub repair_types: Vec<RepairTypeRef>,
    pub problem_description: String,
    pub status: RepairStatus,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub total_price: Option<Decimal>,
    pub internal_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&RepairRequest> for AdminDetail {
    fn from(r: &RepairRequest) -> Self {
        Self {
            id: r.id,
            reference_number: r.reference_number.clone(),
            customer_id: r.customer_id,
            customer_name: r.customer.name.clone(),
            customer_cpf: r.customer.cpf.clone(),
            customer_phone: r.customer.phone.clone(),
            customer_address: r.customer.address.clone(),
            customer_email: r.customer.email.clone(),
            watch_brand: r.watch_brand.name.clone(),
            watch_type: r.watch_type,
            repair_types: r.repair_types.clone(),
            problem_description: r.problem_description.clone(),
            status: r.status,
            estimated_completion: r.estimated_completion,
            total_price: r.total_price,
            internal_notes: r.internal_notes.clone(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: i64,
    pub total_items: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RepairPage {
    pub repair_requests: Vec<AdminSummary>,
    pub pagination: Pagination,
}
