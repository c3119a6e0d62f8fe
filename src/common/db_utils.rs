// src/common/db_utils.rs

use uuid::Uuid;

use crate::common::error::AppError;

/// Converte o id vindo da rota num UUID, com erro de domínio em vez da rejeição genérica do axum.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::MalformedIdentifier(raw.to_string()))
}

/// Offset SQL para uma página 1-indexada.
pub fn page_offset(page: u32, limit: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(limit)
}

/// ceil(total / limit); zero itens => zero páginas.
pub fn total_pages(total_items: i64, limit: u32) -> i64 {
    if limit == 0 {
        return 0;
    }
    let limit = i64::from(limit);
    (total_items + limit - 1) / limit
}
