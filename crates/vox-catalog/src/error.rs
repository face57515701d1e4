//! Catalog error types.

use thiserror::Error;

use vox_models::ClipId;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to configure catalog: {0}")]
    ConfigError(String),

    #[error("Clip not found: {0}")]
    NotFound(ClipId),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid clip row: {0}")]
    InvalidRow(String),
}

impl CatalogError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn invalid_row(msg: impl Into<String>) -> Self {
        Self::InvalidRow(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }

    /// Label used for request metrics.
    pub(crate) fn status_label(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "not_found",
            CatalogError::InvalidRow(_) => "invalid_row",
            CatalogError::ConfigError(_) | CatalogError::Unavailable(_) => "error",
        }
    }
}

impl From<tokio_postgres::Error> for CatalogError {
    fn from(e: tokio_postgres::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}
