//! Object store capability consumed by the clip pipeline.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StorageResult;

/// Metadata for a stored object, fetched per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Object size in bytes.
    pub size_bytes: u64,
}

/// Operations the clip pipeline needs from the object store.
///
/// Implementations own timeouts and retries; callers treat every
/// call as a single suspension point.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch object metadata. Fails with `NotFound` when the object is absent.
    async fn head_object(&self, key: &str) -> StorageResult<ObjectMeta>;

    /// Issue a time-limited GET URL for `key`.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Delete an object. Deleting a missing key succeeds.
    async fn delete_object(&self, key: &str) -> StorageResult<()>;

    /// Probe the bucket for readiness checks.
    async fn check_connectivity(&self) -> StorageResult<()>;
}
