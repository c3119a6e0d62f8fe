// src/services/repair_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{
        cpf,
        db_utils::{page_offset, parse_id, total_pages},
        error::{AppError, UniqueKey},
    },
    db::RepairStore,
    models::{
        customer::CustomerData,
        repair::{
            AdminDetail, AdminSummary, CreatedRepairRequest, ListQuery, NewRepairRequest,
            Pagination, PublicStatusView, RepairPage, RepairRequest, RepairRequestChanges,
            RepairStatus, RepairSubmission, RepairTypeRef, RepairUpdatePayload, SubmissionResult,
            WatchBrandRef, WatchType,
        },
    },
    services::{
        catalog_service::CatalogService,
        customer_service::CustomerService,
        reference_allocator::{looks_like_reference, ReferenceAllocator},
    },
};

// Quantas vezes refazemos o INSERT quando o banco acusa número de referência repetido
const INSERT_ATTEMPTS: u32 = 3;

// Campo de texto vazio conta como "não informado"
fn parse_optional_status(raw: Option<&str>) -> Result<Option<RepairStatus>, AppError> {
    raw.filter(|s| !s.trim().is_empty())
        .map(str::parse::<RepairStatus>)
        .transpose()
}

#[derive(Clone)]
pub struct RepairService {
    store: Arc<dyn RepairStore>,
    catalog: CatalogService,
    customers: CustomerService,
    allocator: ReferenceAllocator,
}

impl RepairService {
    pub fn new(
        store: Arc<dyn RepairStore>,
        catalog: CatalogService,
        customers: CustomerService,
        allocator: ReferenceAllocator,
    ) -> Self {
        Self {
            store,
            catalog,
            customers,
            allocator,
        }
    }

    // =========================================================================
    //  SUBMISSÃO (fluxo público completo)
    // =========================================================================

    /// CPF -> marca/tipos ativos -> cliente -> número de referência -> gravação.
    pub async fn submit(&self, submission: RepairSubmission) -> Result<SubmissionResult, AppError> {
        let RepairSubmission {
            mut customer_data,
            watch_data,
            repair_data,
            create_customer_account,
        } = submission;

        let document = cpf::validate_and_format(&customer_data.cpf)?;
        customer_data.cpf = document.into_inner();

        let brand = self.catalog.check_brand(parse_id(&watch_data.brand_id)?).await?;
        let repair_types = self
            .catalog
            .check_repair_type_ids(&repair_data.repair_type_ids)
            .await?;

        let (customer_id, customer_account_created) = self
            .customers
            .resolve_or_create(&customer_data, create_customer_account)
            .await?;

        let repair = self
            .create(
                customer_data,
                brand,
                watch_data.watch_type,
                repair_data.problem_description,
                repair_types,
                customer_id,
            )
            .await?;

        Ok(SubmissionResult {
            success: true,
            repair_request: CreatedRepairRequest {
                id: repair.id,
                reference_number: repair.reference_number,
                status: repair.status,
                created_at: repair.created_at,
            },
            customer_account_created,
            message: "Repair request submitted successfully!".to_string(),
        })
    }

    /// Monta e grava o agregado em PENDING com um número de referência novo.
    /// Não valida nada: marca, tipos e cliente já chegam resolvidos.
    pub async fn create(
        &self,
        customer: CustomerData,
        watch_brand: WatchBrandRef,
        watch_type: WatchType,
        problem_description: String,
        repair_types: Vec<RepairTypeRef>,
        customer_id: Option<Uuid>,
    ) -> Result<RepairRequest, AppError> {
        let mut new = NewRepairRequest {
            id: Uuid::new_v4(),
            reference_number: String::new(),
            customer_id,
            customer,
            watch_brand,
            watch_type,
            problem_description,
            repair_types,
            created_at: Utc::now(),
        };

        let store = &self.store;
        let mut attempt = 0;
        loop {
            attempt += 1;
            new.reference_number = self
                .allocator
                .allocate_with(|candidate| async move { store.reference_exists(&candidate).await })
                .await?;

            match self.store.insert(&new).await {
                Ok(repair) => {
                    tracing::info!(
                        "✅ Pedido de reparo {} criado ({})",
                        repair.reference_number,
                        repair.id
                    );
                    return Ok(repair);
                }
                // Outro pedido pegou o mesmo número entre a checagem e o INSERT
                Err(AppError::DuplicateResource(UniqueKey::ReferenceNumber))
                    if attempt < INSERT_ATTEMPTS =>
                {
                    tracing::warn!(
                        "Número de referência {} tomado por outra requisição, gerando outro.",
                        new.reference_number
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    pub async fn get_by_id(&self, id: Uuid) -> Result<RepairRequest, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("repair_request"))
    }

    pub async fn get_by_reference(&self, reference_number: &str) -> Result<RepairRequest, AppError> {
        self.store
            .find_by_reference(reference_number.trim())
            .await?
            .ok_or(AppError::NotFound("repair_request"))
    }

    /// Aceita tanto o UUID quanto o número de referência.
    pub async fn get_by_key(&self, key: &str) -> Result<RepairRequest, AppError> {
        let key = key.trim();
        if looks_like_reference(key) {
            return self.get_by_reference(key).await;
        }
        self.get_by_id(parse_id(key)?).await
    }

    pub async fn status_by_key(&self, key: &str) -> Result<PublicStatusView, AppError> {
        let repair = self.get_by_key(key).await?;
        Ok(PublicStatusView::from(&repair))
    }

    pub async fn status_by_reference(
        &self,
        reference_number: &str,
    ) -> Result<PublicStatusView, AppError> {
        let repair = self.get_by_reference(reference_number).await?;
        Ok(PublicStatusView::from(&repair))
    }

    pub async fn admin_detail(&self, id: Uuid) -> Result<AdminDetail, AppError> {
        let repair = self.get_by_id(id).await?;
        Ok(AdminDetail::from(&repair))
    }

    pub async fn list(&self, query: &ListQuery) -> Result<RepairPage, AppError> {
        let status = parse_optional_status(query.status.as_deref())?;

        let (items, total_items) = self
            .store
            .list(
                status,
                page_offset(query.page, query.limit),
                i64::from(query.limit),
            )
            .await?;

        Ok(RepairPage {
            repair_requests: items.iter().map(AdminSummary::from).collect(),
            pagination: Pagination {
                current_page: query.page,
                total_pages: total_pages(total_items, query.limit),
                total_items,
            },
        })
    }

    // =========================================================================
    //  ATUALIZAÇÃO (admin)
    // =========================================================================

    /// Sobrescreve os campos presentes. Qualquer status do enum é aceito,
    /// sem grafo de transições; status inválido aborta antes de tocar no registro.
    pub async fn update(&self, id: Uuid, payload: RepairUpdatePayload) -> Result<(), AppError> {
        let status = parse_optional_status(payload.status.as_deref())?;

        let changes = RepairRequestChanges {
            status,
            estimated_completion: payload.estimated_completion,
            total_price: payload.total_price,
            internal_notes: payload.internal_notes,
        };

        if !self.store.update(id, &changes).await? {
            return Err(AppError::NotFound("repair_request"));
        }

        match status {
            Some(s) => tracing::info!("Pedido {} atualizado, status agora {}", id, s.as_str()),
            None => tracing::info!("Pedido {} atualizado", id),
        }
        Ok(())
    }
}
