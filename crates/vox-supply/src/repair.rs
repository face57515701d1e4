//! Lazy catalog repair for corrupt clips.
//!
//! A repair removes the catalog row and then makes a best-effort attempt to
//! remove the uploader's object. Both deletes are idempotent and every
//! failure is logged and dropped.
//!
//! The object key is `{owner_client_id}/{sentence_id}`, which is not the
//! storage key the size check ran against (that one usually carries the
//! media extension). The key scheme is kept as-is pending an audit of which
//! objects ingestion actually writes under it.

use tracing::{info, warn};

use vox_catalog::ClipCatalog;
use vox_models::{ClipId, ClipRecord};
use vox_storage::ObjectStore;

use crate::metrics::record_repair;

/// A corrupt clip scheduled for removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOrder {
    pub clip_id: ClipId,
    /// Client that uploaded the clip, not the one reading it.
    pub owner_client_id: String,
    pub sentence_id: String,
}

impl RepairOrder {
    pub fn for_record(record: &ClipRecord) -> Self {
        Self {
            clip_id: record.id,
            owner_client_id: record.owner_client_id.clone(),
            sentence_id: record.original_sentence_id.clone(),
        }
    }

    /// Key of the object removed alongside the catalog row.
    pub fn object_key(&self) -> String {
        format!("{}/{}", self.owner_client_id, self.sentence_id)
    }
}

/// What a repair managed to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairReport {
    pub record_deleted: bool,
    pub object_deleted: bool,
}

impl RepairReport {
    fn label(&self) -> &'static str {
        match (self.record_deleted, self.object_deleted) {
            (true, true) => "ok",
            (false, false) => "failed",
            _ => "partial",
        }
    }
}

/// Delete the catalog row, then the uploader's object. Never fails.
pub async fn run_repair(
    catalog: &dyn ClipCatalog,
    store: &dyn ObjectStore,
    order: &RepairOrder,
) -> RepairReport {
    let record_deleted = match catalog.delete_record(order.clip_id).await {
        Ok(()) => true,
        Err(e) => {
            warn!(clip_id = %order.clip_id, error = %e, "Failed to delete corrupt clip record");
            false
        }
    };

    let key = order.object_key();
    let object_deleted = match store.delete_object(&key).await {
        Ok(()) => true,
        Err(e) => {
            warn!(clip_id = %order.clip_id, key = %key, error = %e, "Failed to delete corrupt clip object");
            false
        }
    };

    let report = RepairReport {
        record_deleted,
        object_deleted,
    };
    record_repair(report.label());

    if record_deleted {
        info!(
            clip_id = %order.clip_id,
            owner = %order.owner_client_id,
            sentence_id = %order.sentence_id,
            "Corrupt clip has been removed"
        );
    }

    report
}
