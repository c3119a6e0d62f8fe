// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::{bail, Context};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{
        CatalogRepository, CatalogStore, CustomerRepository, CustomerStore, InMemoryStore,
        RepairRepository, RepairStore,
    },
    services::{
        reference_allocator::DEFAULT_MAX_ATTEMPTS, CatalogService, CustomerService,
        ReferenceAllocator, RepairService,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => bail!("STORAGE_BACKEND desconhecido: '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub server_addr: String,
    pub reference_max_attempts: u32,
}

fn env_or<T: FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} inválido ('{}'): {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let storage = env_or("STORAGE_BACKEND", StorageBackend::Postgres)?;
        let database_url = env::var("DATABASE_URL").ok();
        if storage == StorageBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL deve ser definida quando STORAGE_BACKEND=postgres");
        }

        Ok(Self {
            storage,
            database_url,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            server_addr: env_or("SERVER_ADDR", "0.0.0.0:3000".to_string())?,
            reference_max_attempts: env_or("REFERENCE_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    // Só existe com o backend Postgres (usado para as migrações)
    pub db_pool: Option<PgPool>,
    pub repair_service: RepairService,
    pub catalog_service: CatalogService,
    pub customer_service: CustomerService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let allocator = ReferenceAllocator::new(config.reference_max_attempts);

        match config.storage {
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL deve ser definida")?;

                let db_pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(config.db_acquire_timeout)
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                // --- Monta o gráfico de dependências ---
                let mut state = Self::from_stores(
                    Arc::new(CatalogRepository::new(db_pool.clone())),
                    Arc::new(CustomerRepository::new(db_pool.clone())),
                    Arc::new(RepairRepository::new(db_pool.clone())),
                    allocator,
                );
                state.db_pool = Some(db_pool);
                Ok(state)
            }
            StorageBackend::Memory => {
                tracing::warn!("⚠️ Usando armazenamento em memória: nada será persistido.");
                Ok(Self::with_memory_store(InMemoryStore::new(), allocator))
            }
        }
    }

    pub fn from_stores(
        catalog_store: Arc<dyn CatalogStore>,
        customer_store: Arc<dyn CustomerStore>,
        repair_store: Arc<dyn RepairStore>,
        allocator: ReferenceAllocator,
    ) -> Self {
        let catalog_service = CatalogService::new(catalog_store);
        let customer_service = CustomerService::new(customer_store);
        let repair_service = RepairService::new(
            repair_store,
            catalog_service.clone(),
            customer_service.clone(),
            allocator,
        );

        Self {
            db_pool: None,
            repair_service,
            catalog_service,
            customer_service,
            i18n_store: Arc::new(I18nStore::new()),
        }
    }

    /// Mesmo gráfico de dependências, com os três stores apontando para a mesma memória.
    pub fn with_memory_store(store: InMemoryStore, allocator: ReferenceAllocator) -> Self {
        let store = Arc::new(store);
        Self::from_stores(store.clone(), store.clone(), store, allocator)
    }

    pub fn in_memory() -> Self {
        Self::with_memory_store(InMemoryStore::new(), ReferenceAllocator::default())
    }
}
