//! Randomized clip supply.
//!
//! Selects eligible clips from the catalog, verifies each backing object in
//! the store, repairs dangling or corrupt catalog rows on the way, and hands
//! back playable descriptors with signed URLs.

pub mod config;
pub mod error;
mod metrics;
pub mod repair;
pub mod supplier;

pub use config::{RepairMode, SupplierConfig};
pub use error::{SupplyError, SupplyResult};
pub use repair::{run_repair, RepairOrder, RepairReport};
pub use supplier::{CandidateOutcome, ClipSupplier, SkipReason};
