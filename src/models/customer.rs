// src/models/customer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    #[schema(example = "Maria da Silva")]
    pub name: String,
    // Sempre no formato canônico DDD.DDD.DDD-DD (único)
    #[schema(example = "111.444.777-35")]
    pub document_number: String,
    #[schema(example = "(11) 99999-8888")]
    pub phone: String,
    #[schema(example = "Rua das Flores, 123 - Centro")]
    pub address: String,
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dados de identificação enviados pelo cliente junto com o pedido.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CustomerData {
    #[validate(length(min = 1, max = 255, message = "O nome é obrigatório."))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    // Só a presença; os dígitos são conferidos em cpf::validate_and_format
    #[validate(length(min = 1, message = "O CPF é obrigatório."))]
    #[schema(example = "111.444.777-35")]
    pub cpf: String,

    #[validate(length(min = 1, max = 20, message = "O telefone é obrigatório."))]
    #[schema(example = "(11) 99999-8888")]
    pub phone: String,

    #[validate(length(min = 1, message = "O endereço é obrigatório."))]
    #[schema(example = "Rua das Flores, 123 - Centro")]
    pub address: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,
}

impl From<&Customer> for CustomerData {
    fn from(c: &Customer) -> Self {
        Self {
            name: c.name.clone(),
            cpf: c.document_number.clone(),
            phone: c.phone.clone(),
            address: c.address.clone(),
            email: c.email.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerCheck {
    pub exists: bool,
    pub customer: Option<CustomerData>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerCheckQuery {
    #[schema(example = "111.444.777-35")]
    pub cpf: String,
}
