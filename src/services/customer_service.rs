// src/services/customer_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{cpf, error::{AppError, UniqueKey}},
    db::CustomerStore,
    models::customer::{Customer, CustomerCheck, CustomerData},
};

#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    /// Resolve o cadastro do cliente pelo CPF, criando-o se ele pediu conta e ainda não existe.
    ///
    /// Retorna `(id, criado)`. Sem `create_account` nada é persistido e o pedido
    /// guarda só a cópia dos dados. `data.cpf` já deve estar na forma canônica.
    pub async fn resolve_or_create(
        &self,
        data: &CustomerData,
        create_account: bool,
    ) -> Result<(Option<Uuid>, bool), AppError> {
        if !create_account {
            return Ok((None, false));
        }

        if let Some(existing) = self.store.find_by_document(&data.cpf).await? {
            return Ok((Some(existing.id), false));
        }

        match self.store.insert(data).await {
            Ok(customer) => {
                tracing::info!("👤 Cliente cadastrado: {}", customer.id);
                Ok((Some(customer.id), true))
            }
            // Outra submissão com o mesmo CPF ganhou a corrida: usamos o cadastro dela.
            Err(AppError::DuplicateResource(UniqueKey::DocumentNumber)) => {
                tracing::warn!("Corrida no cadastro de cliente, reaproveitando o registro existente.");
                let existing = self
                    .store
                    .find_by_document(&data.cpf)
                    .await?
                    .ok_or(AppError::NotFound("customer"))?;
                Ok((Some(existing.id), false))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn find_by_document(&self, raw_document: &str) -> Result<Option<Customer>, AppError> {
        let document = cpf::validate_and_format(raw_document)?;
        self.store.find_by_document(document.as_str()).await
    }

    pub async fn check(&self, raw_document: &str) -> Result<CustomerCheck, AppError> {
        let customer = self.find_by_document(raw_document).await?;
        Ok(CustomerCheck {
            exists: customer.is_some(),
            customer: customer.as_ref().map(CustomerData::from),
        })
    }
}
