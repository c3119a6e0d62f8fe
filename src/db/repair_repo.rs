// src/db/repair_repo.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Executor, FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{map_unique_violation, AppError, UniqueKey},
    db::store::RepairStore,
    models::repair::{
        NewRepairRequest, RepairRequest, RepairRequestChanges, RepairRequestRow, RepairStatus,
        RepairTypeRef,
    },
};

// O nome da marca vem sempre do JOIN; o resto é a linha do pedido.
const SELECT_REPAIR: &str = r#"
    SELECT
        r.id, r.reference_number, r.customer_id,
        r.customer_name, r.customer_document, r.customer_phone,
        r.customer_address, r.customer_email,
        r.watch_brand_id, b.name AS watch_brand_name,
        r.watch_type, r.problem_description, r.status,
        r.estimated_completion, r.total_price, r.internal_notes,
        r.created_at, r.updated_at
    FROM repair_requests r
    JOIN watch_brands b ON b.id = r.watch_brand_id
"#;

#[derive(FromRow)]
struct LinkedRepairType {
    repair_request_id: Uuid,
    id: Uuid,
    name: String,
    description: Option<String>,
}

#[derive(Clone)]
pub struct RepairRepository {
    pool: PgPool,
}

impl RepairRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Tipos de reparo associados a cada pedido, na ordem em que foram enviados.
    async fn fetch_repair_types<'e, E>(
        &self,
        executor: E,
        request_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<RepairTypeRef>>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, LinkedRepairType>(
            r#"
            SELECT rrt.repair_request_id, rt.id, rt.name, rt.description
            FROM repair_request_types rrt
            JOIN repair_types rt ON rt.id = rrt.repair_type_id
            WHERE rrt.repair_request_id = ANY($1)
            ORDER BY rrt.repair_request_id, rrt.position ASC
            "#,
        )
        .bind(request_ids)
        .fetch_all(executor)
        .await?;

        let mut by_request: HashMap<Uuid, Vec<RepairTypeRef>> = HashMap::new();
        for row in rows {
            by_request
                .entry(row.repair_request_id)
                .or_default()
                .push(RepairTypeRef {
                    id: row.id,
                    name: row.name,
                    description: row.description,
                });
        }

        Ok(by_request)
    }

    async fn assemble(&self, rows: Vec<RepairRequestRow>) -> Result<Vec<RepairRequest>, AppError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut types = self.fetch_repair_types(&self.pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let linked = types.remove(&row.id).unwrap_or_default();
                RepairRequest::from_row(row, linked)
            })
            .collect())
    }

    async fn find_one(&self, filter: &str, value: &str) -> Result<Option<RepairRequest>, AppError> {
        let sql = format!("{SELECT_REPAIR} WHERE {filter}");
        let row = sqlx::query_as::<_, RepairRequestRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl RepairStore for RepairRepository {
    async fn reference_exists(&self, reference_number: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM repair_requests WHERE reference_number = $1)",
        )
        .bind(reference_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, new: &NewRepairRequest) -> Result<RepairRequest, AppError> {
        // Pedido + associações na mesma transação
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO repair_requests (
                id, reference_number, customer_id,
                customer_name, customer_document, customer_phone,
                customer_address, customer_email,
                watch_brand_id, watch_type, problem_description,
                status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            "#,
        )
        .bind(new.id)
        .bind(&new.reference_number)
        .bind(new.customer_id)
        .bind(&new.customer.name)
        .bind(&new.customer.cpf)
        .bind(&new.customer.phone)
        .bind(&new.customer.address)
        .bind(&new.customer.email)
        .bind(new.watch_brand.id)
        .bind(new.watch_type)
        .bind(&new.problem_description)
        .bind(RepairStatus::Pending)
        .bind(new.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, UniqueKey::ReferenceNumber))?;

        for (position, repair_type) in new.repair_types.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO repair_request_types (repair_request_id, repair_type_id, position)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(new.id)
            .bind(repair_type.id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(RepairRequest {
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
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RepairRequest>, AppError> {
        let sql = format!("{SELECT_REPAIR} WHERE r.id = $1");
        let row = sqlx::query_as::<_, RepairRequestRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.assemble(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_reference(
        &self,
        reference_number: &str,
    ) -> Result<Option<RepairRequest>, AppError> {
        self.find_one("r.reference_number = $1", reference_number).await
    }

    async fn update(&self, id: Uuid, changes: &RepairRequestChanges) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE repair_requests
            SET status = COALESCE($2, status),
                estimated_completion = COALESCE($3, estimated_completion),
                total_price = COALESCE($4, total_price),
                internal_notes = COALESCE($5, internal_notes),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.status)
        .bind(changes.estimated_completion)
        .bind(changes.total_price)
        .bind(&changes.internal_notes)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        status: Option<RepairStatus>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<RepairRequest>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM repair_requests WHERE ($1::repair_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "{SELECT_REPAIR} WHERE ($1::repair_status IS NULL OR r.status = $1) \
             ORDER BY r.created_at DESC, r.id ASC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, RepairRequestRow>(&sql)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((self.assemble(rows).await?, total))
    }
}
