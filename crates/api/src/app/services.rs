//! Store selection and use-case wiring.

use std::sync::Arc;

use anyhow::Context;

use stockline_catalog::CatalogUseCases;
use stockline_core::{BranchId, FranchiseId, IdStrategy, ProductId, RecordId};
use stockline_infra::{AppConfig, InMemoryCatalogStore, PostgresCatalogStore};

use crate::app::errors::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: CatalogUseCases,
    ids: IdStrategy,
}

impl AppServices {
    pub fn new(catalog: CatalogUseCases, ids: IdStrategy) -> Self {
        Self { catalog, ids }
    }

    /// Process-local store; state is lost on restart.
    pub fn in_memory(ids: IdStrategy) -> Self {
        let store = Arc::new(InMemoryCatalogStore::new());
        Self::new(CatalogUseCases::from_store(store, ids), ids)
    }

    /// Pick the store from configuration, bootstrapping the Postgres schema
    /// when a database is configured.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let Some(url) = config.database_url.as_deref() else {
            return Ok(Self::in_memory(config.id_strategy));
        };

        let store = PostgresCatalogStore::connect(url, config.db_max_connections)
            .await
            .context("failed to connect to postgres")?;
        store.migrate().await.context("failed to create schema")?;
        tracing::info!(
            max_connections = config.db_max_connections,
            "using postgres catalog store"
        );

        let store = Arc::new(store);
        Ok(Self::new(
            CatalogUseCases::from_store(store, config.id_strategy),
            config.id_strategy,
        ))
    }

    pub fn franchise_id(&self, raw: &str) -> Result<FranchiseId, ApiError> {
        self.parse(raw, "Invalid franchise ID").map(FranchiseId::new)
    }

    pub fn branch_id(&self, raw: &str) -> Result<BranchId, ApiError> {
        self.parse(raw, "Invalid branch ID").map(BranchId::new)
    }

    pub fn product_id(&self, raw: &str) -> Result<ProductId, ApiError> {
        self.parse(raw, "Invalid product ID").map(ProductId::new)
    }

    fn parse(&self, raw: &str, field: &'static str) -> Result<RecordId, ApiError> {
        self.ids
            .parse(raw)
            .ok_or_else(|| ApiError::invalid_format(field))
    }
}
