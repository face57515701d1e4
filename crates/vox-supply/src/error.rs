//! Supply error types.

use thiserror::Error;

use vox_catalog::CatalogError;
use vox_storage::StorageError;

/// Result type for supply operations.
pub type SupplyResult<T> = Result<T, SupplyError>;

/// Request-fatal errors. Per-candidate problems never surface here.
#[derive(Debug, Error)]
pub enum SupplyError {
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[source] CatalogError),

    #[error("Clip not found: {0}")]
    ClipNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl SupplyError {
    pub fn clip_not_found(id: impl Into<String>) -> Self {
        Self::ClipNotFound(id.into())
    }
}

impl From<CatalogError> for SupplyError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(id) => Self::ClipNotFound(id.to_string()),
            other => Self::CatalogUnavailable(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vox_models::ClipId;

    #[test]
    fn test_catalog_not_found_maps_to_clip_not_found() {
        let err: SupplyError = CatalogError::NotFound(ClipId(5)).into();
        assert!(matches!(err, SupplyError::ClipNotFound(ref id) if id == "5"));
    }

    #[test]
    fn test_other_catalog_errors_are_unavailable() {
        let err: SupplyError = CatalogError::unavailable("timeout").into();
        assert!(matches!(err, SupplyError::CatalogUnavailable(_)));

        let err: SupplyError = CatalogError::invalid_row("bad taxonomy").into();
        assert!(matches!(err, SupplyError::CatalogUnavailable(_)));
    }
}
