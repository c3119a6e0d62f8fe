// src/db/customer_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::{map_unique_violation, AppError, UniqueKey},
    db::store::CustomerStore,
    models::customer::{Customer, CustomerData},
};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn find_by_document(&self, document_number: &str) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, document_number, phone, address, email, created_at, updated_at
            FROM customers
            WHERE document_number = $1
            "#,
        )
        .bind(document_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn insert(&self, data: &CustomerData) -> Result<Customer, AppError> {
        // A UNIQUE(document_number) é quem decide a corrida entre dois cadastros simultâneos
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, document_number, phone, address, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, document_number, phone, address, email, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.cpf)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(&data.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, UniqueKey::DocumentNumber))
    }
}
