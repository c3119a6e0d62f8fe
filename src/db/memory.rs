// src/db/memory.rs

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::{AppError, UniqueKey},
    db::store::{CatalogStore, CustomerStore, RepairStore},
    models::{
        catalog::{RepairType, RepairTypePayload, WatchBrand, WatchBrandPayload},
        customer::{Customer, CustomerData},
        repair::{NewRepairRequest, RepairRequest, RepairRequestChanges, RepairStatus},
    },
};

#[derive(Default)]
struct State {
    brands: HashMap<Uuid, WatchBrand>,
    repair_types: HashMap<Uuid, RepairType>,
    customers: HashMap<Uuid, Customer>,
    repairs: HashMap<Uuid, RepairRequest>,
}

/// Armazenamento em memória com as mesmas restrições de unicidade do Postgres.
///
/// Usado nos testes e com `STORAGE_BACKEND=memory`. Cada escrita checa a unicidade
/// e insere sob o mesmo lock, o que faz o papel do índice único do banco.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, AppError> {
        self.state
            .read()
            .map_err(|e| anyhow!("Falha ao adquirir lock de leitura: {}", e).into())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, AppError> {
        self.state
            .write()
            .map_err(|e| anyhow!("Falha ao adquirir lock de escrita: {}", e).into())
    }

    /// Escreve notas internas direto no armazenamento, sem passar pelo serviço.
    pub fn set_internal_notes(&self, id: Uuid, notes: &str) -> Result<bool, AppError> {
        let mut state = self.write()?;
        Ok(match state.repairs.get_mut(&id) {
            Some(repair) => {
                repair.internal_notes = Some(notes.to_string());
                true
            }
            None => false,
        })
    }

    pub fn customer_count(&self) -> Result<usize, AppError> {
        Ok(self.read()?.customers.len())
    }

    // Marca e tipos de reparo são resolvidos na leitura, como os JOINs do Postgres.
    fn hydrate(state: &State, repair: &RepairRequest) -> RepairRequest {
        let mut repair = repair.clone();
        if let Some(brand) = state.brands.get(&repair.watch_brand.id) {
            repair.watch_brand.name = brand.name.clone();
        }
        for linked in &mut repair.repair_types {
            if let Some(t) = state.repair_types.get(&linked.id) {
                linked.name = t.name.clone();
                linked.description = t.description.clone();
            }
        }
        repair
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list_brands(&self, only_active: bool) -> Result<Vec<WatchBrand>, AppError> {
        let state = self.read()?;
        let mut brands: Vec<WatchBrand> = state
            .brands
            .values()
            .filter(|b| !only_active || b.is_active)
            .cloned()
            .collect();
        brands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(brands)
    }

    async fn find_brand(&self, id: Uuid) -> Result<Option<WatchBrand>, AppError> {
        Ok(self.read()?.brands.get(&id).cloned())
    }

    async fn insert_brand(&self, input: &WatchBrandPayload) -> Result<WatchBrand, AppError> {
        let mut state = self.write()?;
        if state.brands.values().any(|b| b.name == input.name) {
            return Err(AppError::DuplicateResource(UniqueKey::BrandName));
        }

        let brand = WatchBrand {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            is_active: input.is_active,
            created_at: Utc::now(),
        };
        state.brands.insert(brand.id, brand.clone());
        Ok(brand)
    }

    async fn update_brand(
        &self,
        id: Uuid,
        input: &WatchBrandPayload,
    ) -> Result<Option<WatchBrand>, AppError> {
        let mut state = self.write()?;
        if state
            .brands
            .values()
            .any(|b| b.id != id && b.name == input.name)
        {
            return Err(AppError::DuplicateResource(UniqueKey::BrandName));
        }

        Ok(state.brands.get_mut(&id).map(|brand| {
            brand.name = input.name.clone();
            brand.is_active = input.is_active;
            brand.clone()
        }))
    }

    async fn deactivate_brand(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.write()?;
        Ok(match state.brands.get_mut(&id) {
            Some(brand) => {
                brand.is_active = false;
                true
            }
            None => false,
        })
    }

    async fn list_repair_types(&self, only_active: bool) -> Result<Vec<RepairType>, AppError> {
        let state = self.read()?;
        let mut types: Vec<RepairType> = state
            .repair_types
            .values()
            .filter(|t| !only_active || t.is_active)
            .cloned()
            .collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn find_repair_types(
        &self,
        ids: &[Uuid],
        only_active: bool,
    ) -> Result<Vec<RepairType>, AppError> {
        let state = self.read()?;
        Ok(state
            .repair_types
            .values()
            .filter(|t| ids.contains(&t.id) && (!only_active || t.is_active))
            .cloned()
            .collect())
    }

    async fn insert_repair_type(&self, input: &RepairTypePayload) -> Result<RepairType, AppError> {
        let mut state = self.write()?;
        let repair_type = RepairType {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            description: input.description.clone(),
            estimated_price: input.estimated_price,
            is_active: input.is_active,
            created_at: Utc::now(),
        };
        state.repair_types.insert(repair_type.id, repair_type.clone());
        Ok(repair_type)
    }

    async fn update_repair_type(
        &self,
        id: Uuid,
        input: &RepairTypePayload,
    ) -> Result<Option<RepairType>, AppError> {
        let mut state = self.write()?;
        Ok(state.repair_types.get_mut(&id).map(|t| {
            t.name = input.name.clone();
            t.description = input.description.clone();
            t.estimated_price = input.estimated_price;
            t.is_active = input.is_active;
            t.clone()
        }))
    }

    async fn deactivate_repair_type(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.write()?;
        Ok(match state.repair_types.get_mut(&id) {
            Some(t) => {
                t.is_active = false;
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn find_by_document(&self, document_number: &str) -> Result<Option<Customer>, AppError> {
        let state = self.read()?;
        Ok(state
            .customers
            .values()
            .find(|c| c.document_number == document_number)
            .cloned())
    }

    async fn insert(&self, data: &CustomerData) -> Result<Customer, AppError> {
        let mut state = self.write()?;
        if state.customers.values().any(|c| c.document_number == data.cpf) {
            return Err(AppError::DuplicateResource(UniqueKey::DocumentNumber));
        }

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            document_number: data.cpf.clone(),
            phone: data.phone.clone(),
            address: data.address.clone(),
            email: data.email.clone(),
            created_at: now,
            updated_at: now,
        };
        state.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }
}

#[async_trait]
impl RepairStore for InMemoryStore {
    async fn reference_exists(&self, reference_number: &str) -> Result<bool, AppError> {
        let state = self.read()?;
        Ok(state
            .repairs
            .values()
            .any(|r| r.reference_number == reference_number))
    }

    async fn insert(&self, new: &NewRepairRequest) -> Result<RepairRequest, AppError> {
        let mut state = self.write()?;
        if state
            .repairs
            .values()
            .any(|r| r.reference_number == new.reference_number)
        {
            return Err(AppError::DuplicateResource(UniqueKey::ReferenceNumber));
        }

        let repair = RepairRequest {
            id: new.id,
            reference_number: new.reference_number.clone(),
            customer_id: new.customer_id,
            customer: new.customer.clone(),
            watch_brand: new.watch_brand.clone(),
            watch_type: new.watch_type,
            problem_description: new.problem_description.clone(),
            status: RepairStatus::Pending,
            estimated_completion: None,
            total_price: None,
            internal_notes: None,
            repair_types: new.repair_types.clone(),
            created_at: new.created_at,
            updated_at: new.created_at,
        };
        state.repairs.insert(repair.id, repair.clone());
        Ok(repair)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RepairRequest>, AppError> {
        let state = self.read()?;
        Ok(state.repairs.get(&id).map(|r| Self::hydrate(&state, r)))
    }

    async fn find_by_reference(
        &self,
        reference_number: &str,
    ) -> Result<Option<RepairRequest>, AppError> {
        let state = self.read()?;
        Ok(state
            .repairs
            .values()
            .find(|r| r.reference_number == reference_number)
            .map(|r| Self::hydrate(&state, r)))
    }

    async fn update(&self, id: Uuid, changes: &RepairRequestChanges) -> Result<bool, AppError> {
        let mut state = self.write()?;
        let Some(repair) = state.repairs.get_mut(&id) else {
            return Ok(false);
        };

        if let Some(status) = changes.status {
            repair.status = status;
        }
        if let Some(estimated) = changes.estimated_completion {
            repair.estimated_completion = Some(estimated);
        }
        if let Some(price) = changes.total_price {
            repair.total_price = Some(price);
        }
        if let Some(notes) = &changes.internal_notes {
            repair.internal_notes = Some(notes.clone());
        }
        repair.updated_at = Utc::now();

        Ok(true)
    }

    async fn list(
        &self,
        status: Option<RepairStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<RepairRequest>, i64), AppError> {
        let state = self.read()?;
        let mut matching: Vec<&RepairRequest> = state
            .repairs
            .values()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|r| Self::hydrate(&state, r))
            .collect();

        Ok((page, total))
    }
}
