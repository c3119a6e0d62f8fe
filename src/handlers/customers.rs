// src/handlers/customers.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::customer::{CustomerCheck, CustomerCheckQuery},
};

// GET /api/customers/check?cpf=...
#[utoipa::path(
    get,
    path = "/api/customers/check",
    tag = "Customers",
    responses(
        (status = 200, description = "Indica se já existe cadastro para o CPF", body = CustomerCheck),
        (status = 400, description = "CPF inválido")
    ),
    params(
        ("cpf" = String, Query, description = "CPF com ou sem pontuação")
    )
)]
pub async fn check_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<CustomerCheckQuery>,
) -> Result<impl IntoResponse, ApiError> {

    let check = app_state.customer_service
        .check(&query.cpf)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(check)))
}
