// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Watchmaker Backend",
        description = "Pedidos de reparo de relógios: formulário público, acompanhamento e administração."
    ),
    paths(
        // --- Health ---
        handlers::health::health_check,

        // --- Repairs (público) ---
        handlers::catalog::get_form_data,
        handlers::repairs::create_repair_request,
        handlers::repairs::get_repair_status,
        handlers::repairs::get_repair_status_by_reference,

        // --- Customers ---
        handlers::customers::check_customer,

        // --- Admin ---
        handlers::repairs::list_repair_requests,
        handlers::repairs::get_repair_request_detail,
        handlers::repairs::update_repair_request,

        // --- Catalog ---
        handlers::catalog::list_watch_brands,
        handlers::catalog::create_watch_brand,
        handlers::catalog::update_watch_brand,
        handlers::catalog::deactivate_watch_brand,
        handlers::catalog::list_repair_types,
        handlers::catalog::create_repair_type,
        handlers::catalog::update_repair_type,
        handlers::catalog::deactivate_repair_type,
    ),
    components(
        schemas(
            // --- Catalog ---
            models::catalog::WatchBrand,
            models::catalog::RepairType,
            models::catalog::FormData,
            models::catalog::WatchBrandPayload,
            models::catalog::RepairTypePayload,

            // --- Customers ---
            models::customer::Customer,
            models::customer::CustomerData,
            models::customer::CustomerCheck,

            // --- Repairs ---
            models::repair::RepairStatus,
            models::repair::WatchType,
            models::repair::WatchBrandRef,
            models::repair::RepairTypeRef,
            models::repair::WatchData,
            models::repair::RepairData,
            models::repair::RepairSubmission,
            models::repair::CreatedRepairRequest,
            models::repair::SubmissionResult,
            models::repair::PublicStatusView,

            // --- Admin ---
            models::repair::RepairUpdatePayload,
            models::repair::AdminSummary,
            models::repair::AdminDetail,
            models::repair::Pagination,
            models::repair::RepairPage,
        )
    ),
    tags(
        (name = "Health", description = "Verificação de saúde do serviço"),
        (name = "Repairs", description = "Formulário público e acompanhamento de reparos"),
        (name = "Customers", description = "Consulta de clientes por CPF"),
        (name = "Admin", description = "Gestão dos pedidos de reparo"),
        (name = "Catalog", description = "Marcas e tipos de reparo")
    )
)]
pub struct ApiDoc;
