// src/handlers/health.rs

use axum::{response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Serviço no ar")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy", "timestamp": Utc::now() }))
}
