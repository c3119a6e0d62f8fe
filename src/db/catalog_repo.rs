// src/db/catalog_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::{map_unique_violation, AppError, UniqueKey},
    db::store::CatalogStore,
    models::catalog::{RepairType, RepairTypePayload, WatchBrand, WatchBrandPayload},
};

// Marcas e tipos de reparo: dados de referência, muita leitura e pouca escrita.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    // =========================================================================
    //  MARCAS
    // =========================================================================

    async fn list_brands(&self, only_active: bool) -> Result<Vec<WatchBrand>, AppError> {
        let brands = sqlx::query_as::<_, WatchBrand>(
            r#"
            SELECT id, name, is_active, created_at
            FROM watch_brands
            WHERE ($1 = FALSE OR is_active)
            ORDER BY name ASC
            "#,
        )
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(brands)
    }

    async fn find_brand(&self, id: Uuid) -> Result<Option<WatchBrand>, AppError> {
        let brand = sqlx::query_as::<_, WatchBrand>(
            "SELECT id, name, is_active, created_at FROM watch_brands WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(brand)
    }

    async fn insert_brand(&self, input: &WatchBrandPayload) -> Result<WatchBrand, AppError> {
        sqlx::query_as::<_, WatchBrand>(
            r#"
            INSERT INTO watch_brands (name, is_active)
            VALUES ($1, $2)
            RETURNING id, name, is_active, created_at
            "#,
        )
        .bind(&input.name)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, UniqueKey::BrandName))
    }

    async fn update_brand(
        &self,
        id: Uuid,
        input: &WatchBrandPayload,
    ) -> Result<Option<WatchBrand>, AppError> {
        sqlx::query_as::<_, WatchBrand>(
            r#"
            UPDATE watch_brands
            SET name = $2, is_active = $3
            WHERE id = $1
            RETURNING id, name, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, UniqueKey::BrandName))
    }

    async fn deactivate_brand(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE watch_brands SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  TIPOS DE REPARO
    // =========================================================================

    async fn list_repair_types(&self, only_active: bool) -> Result<Vec<RepairType>, AppError> {
        let types = sqlx::query_as::<_, RepairType>(
            r#"
            SELECT id, name, description, estimated_price, is_active, created_at
            FROM repair_types
            WHERE ($1 = FALSE OR is_active)
            ORDER BY name ASC
            "#,
        )
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    async fn find_repair_types(
        &self,
        ids: &[Uuid],
        only_active: bool,
    ) -> Result<Vec<RepairType>, AppError> {
        let types = sqlx::query_as::<_, RepairType>(
            r#"
            SELECT id, name, description, estimated_price, is_active, created_at
            FROM repair_types
            WHERE id = ANY($1) AND ($2 = FALSE OR is_active)
            "#,
        )
        .bind(ids)
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    async fn insert_repair_type(&self, input: &RepairTypePayload) -> Result<RepairType, AppError> {
        let repair_type = sqlx::query_as::<_, RepairType>(
            r#"
            INSERT INTO repair_types (name, description, estimated_price, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, estimated_price, is_active, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.estimated_price)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(repair_type)
    }

    async fn update_repair_type(
        &self,
        id: Uuid,
        input: &RepairTypePayload,
    ) -> Result<Option<RepairType>, AppError> {
        let repair_type = sqlx::query_as::<_, RepairType>(
            r#"
            UPDATE repair_types
            SET name = $2, description = $3, estimated_price = $4, is_active = $5
            WHERE id = $1
            RETURNING id, name, description, estimated_price, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.estimated_price)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(repair_type)
    }

    async fn deactivate_repair_type(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE repair_types SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
