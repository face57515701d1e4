//! Supplier configuration.

use std::time::Duration;

/// Oversampling factor applied to the requested clip count.
pub const DEFAULT_OVERSAMPLE_FACTOR: f64 = 1.5;

/// Smallest object size accepted as a decodable clip.
pub const DEFAULT_MIN_CLIP_BYTES: u64 = 256;

/// Lifetime of playback URLs (12 hours).
pub const DEFAULT_URL_EXPIRY: Duration = Duration::from_secs(60 * 60 * 12);

/// Media extension stripped from storage keys to form a clip glob.
pub const DEFAULT_MEDIA_SUFFIX: &str = ".mp3";

/// How repairs are issued from the read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepairMode {
    /// Spawn the repair and keep validating.
    #[default]
    Detached,
    /// Await the repair before evaluating the next candidate.
    Inline,
}

impl RepairMode {
    /// Parse a mode name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "detached" => Some(Self::Detached),
            "inline" => Some(Self::Inline),
            _ => None,
        }
    }
}

/// Clip supplier configuration.
#[derive(Debug, Clone)]
pub struct SupplierConfig {
    pub oversample_factor: f64,
    pub min_clip_bytes: u64,
    pub url_expiry: Duration,
    pub media_suffix: String,
    pub repair_mode: RepairMode,
}

impl Default for SupplierConfig {
    fn default() -> Self {
        Self {
            oversample_factor: DEFAULT_OVERSAMPLE_FACTOR,
            min_clip_bytes: DEFAULT_MIN_CLIP_BYTES,
            url_expiry: DEFAULT_URL_EXPIRY,
            media_suffix: DEFAULT_MEDIA_SUFFIX.to_string(),
            repair_mode: RepairMode::default(),
        }
    }
}

impl SupplierConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let repair_mode = std::env::var("CLIP_REPAIR_MODE")
            .ok()
            .and_then(|s| RepairMode::parse(&s))
            .unwrap_or_default();

        Self {
            repair_mode,
            ..Self::default()
        }
    }

    pub fn with_repair_mode(mut self, mode: RepairMode) -> Self {
        self.repair_mode = mode;
        self
    }

    /// Number of candidates to request for `count` clips: `ceil(count * factor)`.
    pub fn candidate_limit(&self, count: usize) -> usize {
        let limit = (count as f64 * self.oversample_factor).ceil() as usize;
        limit.max(count)
    }
}
