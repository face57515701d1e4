//! Application state.

use std::sync::Arc;

use vox_catalog::{ClipCatalog, PgCatalog};
use vox_storage::{BucketClient, ObjectStore};
use vox_supply::{ClipSupplier, SupplierConfig};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub supplier: Arc<ClipSupplier>,
    pub catalog: Arc<dyn ClipCatalog>,
    pub storage: Arc<dyn ObjectStore>,
}

impl AppState {
    /// Create application state backed by Postgres and the clip bucket.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let catalog = PgCatalog::from_env().await?;
        let storage = BucketClient::from_env()?;

        Ok(Self::from_parts(
            config,
            Arc::new(catalog),
            Arc::new(storage),
            SupplierConfig::from_env(),
        ))
    }

    /// Assemble state from already-built collaborators.
    pub fn from_parts(
        config: ApiConfig,
        catalog: Arc<dyn ClipCatalog>,
        storage: Arc<dyn ObjectStore>,
        supplier_config: SupplierConfig,
    ) -> Self {
        let supplier = ClipSupplier::new(
            Arc::clone(&catalog),
            Arc::clone(&storage),
            supplier_config,
        );

        Self {
            config,
            supplier: Arc::new(supplier),
            catalog,
            storage,
        }
    }
}
