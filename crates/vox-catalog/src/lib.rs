//! Relational clip catalog gateway.
//!
//! This crate provides:
//! - The `ClipCatalog` contract consumed by the clip pipeline
//! - A PostgreSQL implementation over a shared pipelined connection
//! - Request metrics per catalog operation

pub mod catalog;
pub mod error;
mod metrics;
pub mod pg;

pub use catalog::ClipCatalog;
pub use error::{CatalogError, CatalogResult};
pub use pg::{CatalogConfig, PgCatalog, SCHEMA};

#[cfg(feature = "mock")]
pub use catalog::MockClipCatalog;
