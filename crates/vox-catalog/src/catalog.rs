//! Catalog contract consumed by the clip pipeline.

use async_trait::async_trait;

use vox_models::{ClipId, ClipRecord};

use crate::error::CatalogResult;

/// Reads and writes against the clip catalog.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait ClipCatalog: Send + Sync {
    /// Up to `limit` clips `client_id` may hear in `locale`, in catalog order.
    ///
    /// Returns fewer than `limit` when the eligible pool is smaller.
    async fn fetch_candidates(
        &self,
        client_id: &str,
        locale: &str,
        limit: usize,
    ) -> CatalogResult<Vec<ClipRecord>>;

    /// Remove the clip row for `id`. Missing rows are not an error.
    async fn delete_record(&self, id: ClipId) -> CatalogResult<()>;

    /// Fetch one clip. Fails with `NotFound` when no row exists.
    async fn fetch_by_id(&self, id: ClipId) -> CatalogResult<ClipRecord>;

    /// Cheap round trip for readiness checks.
    async fn check_connectivity(&self) -> CatalogResult<()>;
}
