// src/db/store.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        catalog::{RepairType, RepairTypePayload, WatchBrand, WatchBrandPayload},
        customer::{Customer, CustomerData},
        repair::{NewRepairRequest, RepairRequest, RepairRequestChanges, RepairStatus},
    },
};

// Contratos que os serviços esperam do armazenamento.
// As unicidades (CPF, nome da marca, número de referência) são garantidas AQUI,
// e uma violação sempre volta como AppError::DuplicateResource.

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_brands(&self, only_active: bool) -> Result<Vec<WatchBrand>, AppError>;

    async fn find_brand(&self, id: Uuid) -> Result<Option<WatchBrand>, AppError>;

    async fn insert_brand(&self, input: &WatchBrandPayload) -> Result<WatchBrand, AppError>;

    async fn update_brand(
        &self,
        id: Uuid,
        input: &WatchBrandPayload,
    ) -> Result<Option<WatchBrand>, AppError>;

    /// Retorna `false` se a marca não existe.
    async fn deactivate_brand(&self, id: Uuid) -> Result<bool, AppError>;

    async fn list_repair_types(&self, only_active: bool) -> Result<Vec<RepairType>, AppError>;

    /// Busca os ids informados; a ordem do retorno não é garantida.
    async fn find_repair_types(
        &self,
        ids: &[Uuid],
        only_active: bool,
    ) -> Result<Vec<RepairType>, AppError>;

    async fn insert_repair_type(&self, input: &RepairTypePayload) -> Result<RepairType, AppError>;

    async fn update_repair_type(
        &self,
        id: Uuid,
        input: &RepairTypePayload,
    ) -> Result<Option<RepairType>, AppError>;

    async fn deactivate_repair_type(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_document(&self, document_number: &str) -> Result<Option<Customer>, AppError>;

    /// `data.cpf` já deve estar na forma canônica.
    async fn insert(&self, data: &CustomerData) -> Result<Customer, AppError>;
}

#[async_trait]
pub trait RepairStore: Send + Sync {
    async fn reference_exists(&self, reference_number: &str) -> Result<bool, AppError>;

    /// Grava o pedido e suas associações com tipos de reparo de forma atômica.
    async fn insert(&self, new: &NewRepairRequest) -> Result<RepairRequest, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RepairRequest>, AppError>;

    async fn find_by_reference(
        &self,
        reference_number: &str,
    ) -> Result<Option<RepairRequest>, AppError>;

    /// Aplica as mudanças e renova `updated_at`. Retorna `false` se o pedido não existe.
    async fn update(&self, id: Uuid, changes: &RepairRequestChanges) -> Result<bool, AppError>;

    /// Página ordenada do mais novo para o mais antigo, junto com o total filtrado.
    async fn list(
        &self,
        status: Option<RepairStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<RepairRequest>, i64), AppError>;
}
