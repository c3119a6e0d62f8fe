// src/router.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// Monta todas as rotas da API (públicas e admin) sobre o estado já construído.
pub fn build_router(app_state: AppState) -> Router {
    // Formulário público e acompanhamento
    let repair_routes = Router::new()
        .route("/", post(handlers::repairs::create_repair_request))
        .route("/{key}/status", get(handlers::repairs::get_repair_status))
        .route(
            "/reference/{reference_number}/status",
            get(handlers::repairs::get_repair_status_by_reference),
        );

    let admin_routes = Router::new()
        .route("/repair-requests", get(handlers::repairs::list_repair_requests))
        .route(
            "/repair-requests/{id}",
            get(handlers::repairs::get_repair_request_detail)
                .put(handlers::repairs::update_repair_request),
        )
        .route(
            "/watch-brands",
            get(handlers::catalog::list_watch_brands).post(handlers::catalog::create_watch_brand),
        )
        .route(
            "/watch-brands/{id}",
            put(handlers::catalog::update_watch_brand)
                .delete(handlers::catalog::deactivate_watch_brand),
        )
        .route(
            "/repair-types",
            get(handlers::catalog::list_repair_types).post(handlers::catalog::create_repair_type),
        )
        .route(
            "/repair-types/{id}",
            put(handlers::catalog::update_repair_type)
                .delete(handlers::catalog::deactivate_repair_type),
        );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(handlers::health::health_check))
        .route("/api/repair-form/data", get(handlers::catalog::get_form_data))
        .route("/api/customers/check", get(handlers::customers::check_customer))
        .nest("/api/repair-requests", repair_routes)
        .nest("/api/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
