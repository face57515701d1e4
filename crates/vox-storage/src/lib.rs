//! S3-compatible object store client for clip audio.
//!
//! This crate provides:
//! - The `ObjectStore` capability consumed by the clip pipeline
//! - Object metadata lookups (existence and size)
//! - Presigned playback URL generation
//! - Object deletion

pub mod client;
pub mod error;
pub mod store;

pub use client::{BucketClient, BucketConfig};
pub use error::{StorageError, StorageResult};
pub use store::{ObjectMeta, ObjectStore};

#[cfg(feature = "mock")]
pub use store::MockObjectStore;
