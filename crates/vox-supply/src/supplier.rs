//! Clip supplier: candidate selection, store validation, URL issuing.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use vox_catalog::ClipCatalog;
use vox_models::{ClipDescriptor, ClipId, ClipRecord};
use vox_storage::ObjectStore;

use crate::config::{RepairMode, SupplierConfig};
use crate::error::{SupplyError, SupplyResult};
use crate::metrics::{record_candidate, record_shortfall};
use crate::repair::{run_repair, RepairOrder};

/// Why a candidate was left out of the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Head request failed: object missing, access denied, or transient error.
    StoreError(String),
    /// Object exists but is too small to decode. Triggers repair.
    Undersized { size_bytes: u64 },
    /// Object is valid but no playback URL could be issued.
    PresignFailed(String),
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::StoreError(_) => "store_error",
            SkipReason::Undersized { .. } => "undersized",
            SkipReason::PresignFailed(_) => "presign_failed",
        }
    }
}

/// Result of evaluating one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    Accepted(ClipDescriptor),
    Skipped(SkipReason),
}

/// Serves random clips and playback URLs.
///
/// Holds no per-request state; share one instance across requests.
#[derive(Clone)]
pub struct ClipSupplier {
    catalog: Arc<dyn ClipCatalog>,
    store: Arc<dyn ObjectStore>,
    config: SupplierConfig,
}

impl ClipSupplier {
    pub fn new(
        catalog: Arc<dyn ClipCatalog>,
        store: Arc<dyn ObjectStore>,
        config: SupplierConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            config,
        }
    }

    pub fn config(&self) -> &SupplierConfig {
        &self.config
    }

    /// Up to `count` verified clips for `client_id` in `locale`.
    ///
    /// Candidates are checked one at a time in catalog order and the loop
    /// stops at the `count`th accepted clip. Broken candidates shrink the
    /// result instead of failing it; only a failed candidate fetch is fatal.
    pub async fn get_random_clips(
        &self,
        client_id: &str,
        locale: &str,
        count: usize,
    ) -> SupplyResult<Vec<ClipDescriptor>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let limit = self.config.candidate_limit(count);
        let candidates = self
            .catalog
            .fetch_candidates(client_id, locale, limit)
            .await
            .map_err(SupplyError::CatalogUnavailable)?;

        let mut clips = Vec::with_capacity(count.min(candidates.len()));

        for record in &candidates {
            match self.evaluate(client_id, record).await {
                CandidateOutcome::Accepted(descriptor) => {
                    record_candidate("accepted");
                    clips.push(descriptor);
                }
                CandidateOutcome::Skipped(reason) => {
                    record_candidate(reason.as_str());
                }
            }

            if clips.len() == count {
                break;
            }
        }

        if clips.len() < count {
            record_shortfall();
            info!(
                client_id = %client_id,
                locale = %locale,
                requested = count,
                candidates = candidates.len(),
                returned = clips.len(),
                "Candidate pool exhausted before clip count was reached"
            );
        }

        Ok(clips)
    }

    /// Validate one candidate against the store.
    async fn evaluate(&self, client_id: &str, record: &ClipRecord) -> CandidateOutcome {
        let meta = match self.store.head_object(&record.storage_key).await {
            Ok(meta) => meta,
            Err(e) => {
                warn!(
                    clip_id = %record.id,
                    key = %record.storage_key,
                    error = %e,
                    "Store error retrieving clip"
                );
                return CandidateOutcome::Skipped(SkipReason::StoreError(e.to_string()));
            }
        };

        if meta.size_bytes < self.config.min_clip_bytes {
            warn!(
                clip_id = %record.id,
                requester = %client_id,
                owner = %record.owner_client_id,
                sentence_id = %record.original_sentence_id,
                size_bytes = meta.size_bytes,
                "Clip is smaller than {} bytes",
                self.config.min_clip_bytes
            );
            self.repair(RepairOrder::for_record(record)).await;
            return CandidateOutcome::Skipped(SkipReason::Undersized {
                size_bytes: meta.size_bytes,
            });
        }

        match self
            .store
            .presign_get(&record.storage_key, self.config.url_expiry)
            .await
        {
            Ok(audio_src) => CandidateOutcome::Accepted(ClipDescriptor::from_record(
                record,
                &self.config.media_suffix,
                audio_src,
            )),
            Err(e) => {
                warn!(clip_id = %record.id, error = %e, "Failed to sign clip URL");
                CandidateOutcome::Skipped(SkipReason::PresignFailed(e.to_string()))
            }
        }
    }

    /// Issue a repair according to the configured mode. Never fails.
    pub async fn repair(&self, order: RepairOrder) {
        match self.config.repair_mode {
            RepairMode::Inline => {
                run_repair(self.catalog.as_ref(), self.store.as_ref(), &order).await;
            }
            RepairMode::Detached => {
                let catalog = Arc::clone(&self.catalog);
                let store = Arc::clone(&self.store);
                let span = info_span!("clip_repair", clip_id = %order.clip_id);

                tokio::spawn(
                    async move {
                        run_repair(catalog.as_ref(), store.as_ref(), &order).await;
                    }
                    .instrument(span),
                );
            }
        }
    }

    /// Signed URL for an avatar clip. The key is trusted as-is.
    pub async fn get_avatar_clips_url(&self, storage_key: &str) -> SupplyResult<String> {
        let url = self
            .store
            .presign_get(storage_key, self.config.url_expiry)
            .await?;
        Ok(url)
    }

    /// Signed URL for a clip looked up by id. No store validation.
    pub async fn get_clip_url(&self, id: &str) -> SupplyResult<String> {
        let clip_id: ClipId = id
            .parse()
            .map_err(|_| SupplyError::clip_not_found(id))?;

        let record = self.catalog.fetch_by_id(clip_id).await?;
        debug!(clip_id = %clip_id, key = %record.storage_key, "Signing clip URL");

        let url = self
            .store
            .presign_get(&record.storage_key, self.config.url_expiry)
            .await?;
        Ok(url)
    }
}
