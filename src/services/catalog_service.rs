// src/services/catalog_service.rs

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{db_utils::parse_id, error::AppError},
    db::CatalogStore,
    models::{
        catalog::{FormData, RepairType, RepairTypePayload, WatchBrand, WatchBrandPayload},
        repair::{RepairTypeRef, WatchBrandRef},
    },
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    //  PORTÃO DE DADOS DE REFERÊNCIA
    // =========================================================================

    /// A marca precisa existir e estar ativa.
    pub async fn check_brand(&self, brand_id: Uuid) -> Result<WatchBrandRef, AppError> {
        match self.store.find_brand(brand_id).await? {
            Some(brand) if brand.is_active => Ok(WatchBrandRef {
                id: brand.id,
                name: brand.name,
            }),
            _ => Err(AppError::InvalidBrand),
        }
    }

    /// Todos os ids (sem repetição) precisam resolver para tipos ativos; senão falha tudo.
    /// O retorno segue a ordem em que os ids foram enviados.
    pub async fn check_repair_types(&self, ids: &[Uuid]) -> Result<Vec<RepairTypeRef>, AppError> {
        let mut seen = HashSet::new();
        let distinct: Vec<Uuid> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        if distinct.is_empty() {
            return Err(AppError::InvalidRepairTypes);
        }

        let found = self.store.find_repair_types(&distinct, true).await?;
        if found.len() != distinct.len() {
            return Err(AppError::InvalidRepairTypes);
        }

        let mut by_id: HashMap<Uuid, RepairType> = found.into_iter().map(|t| (t.id, t)).collect();
        distinct
            .iter()
            .map(|id| {
                by_id
                    .remove(id)
                    .map(|t| RepairTypeRef {
                        id: t.id,
                        name: t.name,
                        description: t.description,
                    })
                    .ok_or(AppError::InvalidRepairTypes)
            })
            .collect()
    }

    /// Versão para ids ainda em texto (como vêm do formulário).
    pub async fn check_repair_type_ids(
        &self,
        raw_ids: &[String],
    ) -> Result<Vec<RepairTypeRef>, AppError> {
        let ids = raw_ids
            .iter()
            .map(|raw| parse_id(raw))
            .collect::<Result<Vec<_>, _>>()?;
        self.check_repair_types(&ids).await
    }

    pub async fn form_data(&self) -> Result<FormData, AppError> {
        Ok(FormData {
            watch_brands: self.store.list_brands(true).await?,
            repair_types: self.store.list_repair_types(true).await?,
        })
    }

    // =========================================================================
    //  ADMIN: MARCAS
    // =========================================================================

    pub async fn list_brands(&self) -> Result<Vec<WatchBrand>, AppError> {
        self.store.list_brands(false).await
    }

    pub async fn create_brand(&self, input: &WatchBrandPayload) -> Result<WatchBrand, AppError> {
        let brand = self.store.insert_brand(input).await?;
        tracing::info!("Marca criada: {} ({})", brand.name, brand.id);
        Ok(brand)
    }

    pub async fn update_brand(
        &self,
        id: Uuid,
        input: &WatchBrandPayload,
    ) -> Result<WatchBrand, AppError> {
        self.store
            .update_brand(id, input)
            .await?
            .ok_or(AppError::NotFound("watch_brand"))
    }

    pub async fn deactivate_brand(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.deactivate_brand(id).await? {
            return Err(AppError::NotFound("watch_brand"));
        }
        tracing::info!("Marca desativada: {}", id);
        Ok(())
    }

    // =========================================================================
    //  ADMIN: TIPOS DE REPARO
    // =========================================================================

    pub async fn list_repair_types(&self) -> Result<Vec<RepairType>, AppError> {
        self.store.list_repair_types(false).await
    }

    pub async fn create_repair_type(
        &self,
        input: &RepairTypePayload,
    ) -> Result<RepairType, AppError> {
        let repair_type = self.store.insert_repair_type(input).await?;
        tracing::info!("Tipo de reparo criado: {} ({})", repair_type.name, repair_type.id);
        Ok(repair_type)
    }

    pub async fn update_repair_type(
        &self,
        id: Uuid,
        input: &RepairTypePayload,
    ) -> Result<RepairType, AppError> {
        self.store
            .update_repair_type(id, input)
            .await?
            .ok_or(AppError::NotFound("repair_type"))
    }

    pub async fn deactivate_repair_type(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.deactivate_repair_type(id).await? {
            return Err(AppError::NotFound("repair_type"));
        }
        tracing::info!("Tipo de reparo desativado: {}", id);
        Ok(())
    }
}
