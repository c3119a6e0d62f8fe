// src/handlers/catalog.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    common::{
        db_utils::parse_id,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::i18n::Locale,
    models::catalog::{FormData, RepairType, RepairTypePayload, WatchBrand, WatchBrandPayload},
};

// =============================================================================
//  FORMULÁRIO PÚBLICO
// =============================================================================

// GET /api/repair-form/data
#[utoipa::path(
    get,
    path = "/api/repair-form/data",
    tag = "Repairs",
    responses(
        (status = 200, description = "Marcas e tipos de reparo ativos", body = FormData)
    )
)]
pub async fn get_form_data(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let data = app_state.catalog_service
        .form_data()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(data)))
}

// =============================================================================
//  ADMIN: MARCAS
// =============================================================================

// GET /api/admin/watch-brands
#[utoipa::path(
    get,
    path = "/api/admin/watch-brands",
    tag = "Catalog",
    responses(
        (status = 200, description = "Todas as marcas, inclusive inativas", body = Vec<WatchBrand>)
    )
)]
pub async fn list_watch_brands(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let brands = app_state.catalog_service
        .list_brands()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(brands)))
}

// POST /api/admin/watch-brands
#[utoipa::path(
    post,
    path = "/api/admin/watch-brands",
    tag = "Catalog",
    request_body = WatchBrandPayload,
    responses(
        (status = 201, description = "Marca criada", body = WatchBrand),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Já existe uma marca com esse nome")
    )
)]
pub async fn create_watch_brand(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<WatchBrandPayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let brand = app_state.catalog_service
        .create_brand(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(brand)))
}

// PUT /api/admin/watch-brands/{id}
#[utoipa::path(
    put,
    path = "/api/admin/watch-brands/{id}",
    tag = "Catalog",
    request_body = WatchBrandPayload,
    responses(
        (status = 200, description = "Marca atualizada"),
        (status = 404, description = "Marca não encontrada"),
        (status = 409, description = "Já existe uma marca com esse nome")
    ),
    params(
        ("id" = String, Path, description = "UUID da marca")
    )
)]
pub async fn update_watch_brand(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<WatchBrandPayload>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_id(&id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state.catalog_service
        .update_brand(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Watch brand updated successfully" })),
    ))
}

// DELETE /api/admin/watch-brands/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/watch-brands/{id}",
    tag = "Catalog",
    responses(
        (status = 200, description = "Marca desativada (pedidos antigos continuam com ela)"),
        (status = 404, description = "Marca não encontrada")
    ),
    params(
        ("id" = String, Path, description = "UUID da marca")
    )
)]
pub async fn deactivate_watch_brand(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_id(&id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    app_state.catalog_service
        .deactivate_brand(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Watch brand deactivated successfully" })),
    ))
}

// =============================================================================
//  ADMIN: TIPOS DE REPARO
// =============================================================================

// GET /api/admin/repair-types
#[utoipa::path(
    get,
    path = "/api/admin/repair-types",
    tag = "Catalog",
    responses(
        (status = 200, description = "Todos os tipos de reparo, inclusive inativos", body = Vec<RepairType>)
    )
)]
pub async fn list_repair_types(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {

    let types = app_state.catalog_service
        .list_repair_types()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(types)))
}

// POST /api/admin/repair-types
#[utoipa::path(
    post,
    path = "/api/admin/repair-types",
    tag = "Catalog",
    request_body = RepairTypePayload,
    responses(
        (status = 201, description = "Tipo de reparo criado", body = RepairType),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_repair_type(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RepairTypePayload>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let repair_type = app_state.catalog_service
        .create_repair_type(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(repair_type)))
}

// PUT /api/admin/repair-types/{id}
#[utoipa::path(
    put,
    path = "/api/admin/repair-types/{id}",
    tag = "Catalog",
    request_body = RepairTypePayload,
    responses(
        (status = 200, description = "Tipo de reparo atualizado"),
        (status = 404, description = "Tipo de reparo não encontrado")
    ),
    params(
        ("id" = String, Path, description = "UUID do tipo de reparo")
    )
)]
pub async fn update_repair_type(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<RepairTypePayload>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_id(&id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state.catalog_service
        .update_repair_type(id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Repair type updated successfully" })),
    ))
}

// DELETE /api/admin/repair-types/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/repair-types/{id}",
    tag = "Catalog",
    responses(
        (status = 200, description = "Tipo de reparo desativado"),
        (status = 404, description = "Tipo de reparo não encontrado")
    ),
    params(
        ("id" = String, Path, description = "UUID do tipo de reparo")
    )
)]
pub async fn deactivate_repair_type(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_id(&id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    app_state.catalog_service
        .deactivate_repair_type(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Repair type deactivated successfully" })),
    ))
}
