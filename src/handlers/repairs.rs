// src/handlers/repairs.rs

use axum::{
    extract::{Path, Query, State},
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
    // Importe os models de resposta para o Swagger
    models::repair::{
        AdminDetail, ListQuery, PublicStatusView, RepairPage, RepairSubmission,
        RepairUpdatePayload, SubmissionResult,
    },
};

// =============================================================================
//  ÁREA PÚBLICA
// =============================================================================

// POST /api/repair-requests
#[utoipa::path(
    post,
    path = "/api/repair-requests",
    tag = "Repairs",
    request_body = RepairSubmission,
    responses(
        (status = 201, description = "Pedido de reparo criado", body = SubmissionResult),
        (status = 400, description = "CPF, marca, tipos de reparo ou campos inválidos")
    )
)]
pub async fn create_repair_request(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RepairSubmission>,
) -> Result<impl IntoResponse, ApiError> {

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let result = app_state.repair_service
        .submit(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(result)))
}

// GET /api/repair-requests/{key}/status
#[utoipa::path(
    get,
    path = "/api/repair-requests/{key}/status",
    tag = "Repairs",
    responses(
        (status = 200, description = "Andamento do reparo", body = PublicStatusView),
        (status = 400, description = "Identificador malformado"),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("key" = String, Path, description = "UUID do pedido ou número de referência (REP-AAAA-NNN)")
    )
)]
pub async fn get_repair_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let view = app_state.repair_service
        .status_by_key(&key)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// GET /api/repair-requests/reference/{reference_number}/status
#[utoipa::path(
    get,
    path = "/api/repair-requests/reference/{reference_number}/status",
    tag = "Repairs",
    responses(
        (status = 200, description = "Andamento do reparo", body = PublicStatusView),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("reference_number" = String, Path, description = "Número de referência (REP-AAAA-NNN)")
    )
)]
pub async fn get_repair_status_by_reference(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(reference_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let view = app_state.repair_service
        .status_by_reference(&reference_number)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(view)))
}

// =============================================================================
//  ÁREA ADMIN
// =============================================================================

// GET /api/admin/repair-requests
#[utoipa::path(
    get,
    path = "/api/admin/repair-requests",
    tag = "Admin",
    responses(
        (status = 200, description = "Pedidos paginados, do mais novo ao mais antigo", body = RepairPage),
        (status = 400, description = "Status ou paginação inválidos")
    ),
    params(
        ("status" = Option<String>, Query, description = "PENDING, IN_PROGRESS, COMPLETED ou DELIVERED"),
        ("page" = Option<u32>, Query, description = "Página (começa em 1)"),
        ("limit" = Option<u32>, Query, description = "Itens por página (1 a 100, padrão 20)")
    )
)]
pub async fn list_repair_requests(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {

    query.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let page = app_state.repair_service
        .list(&query)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/admin/repair-requests/{id}
#[utoipa::path(
    get,
    path = "/api/admin/repair-requests/{id}",
    tag = "Admin",
    responses(
        (status = 200, description = "Detalhes completos do pedido", body = AdminDetail),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("id" = String, Path, description = "UUID do pedido")
    )
)]
pub async fn get_repair_request_detail(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_id(&id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let detail = app_state.repair_service
        .admin_detail(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(detail)))
}

// PUT /api/admin/repair-requests/{id}
#[utoipa::path(
    put,
    path = "/api/admin/repair-requests/{id}",
    tag = "Admin",
    request_body = RepairUpdatePayload,
    responses(
        (status = 200, description = "Pedido atualizado"),
        (status = 400, description = "Status inválido ou ID malformado"),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("id" = String, Path, description = "UUID do pedido")
    )
)]
pub async fn update_repair_request(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    Json(payload): Json<RepairUpdatePayload>,
) -> Result<impl IntoResponse, ApiError> {

    let id = parse_id(&id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    payload.validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state.repair_service
        .update(id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "message": "Repair request updated successfully" })),
    ))
}
