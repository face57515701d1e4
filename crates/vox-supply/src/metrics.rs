//! Clip supply metrics.

use metrics::counter;

/// Metric name constants.
pub mod names {
    /// Candidates evaluated, by outcome.
    pub const CANDIDATES_TOTAL: &str = "clip_candidates_total";

    /// Repairs issued, by result.
    pub const REPAIRS_TOTAL: &str = "clip_repairs_total";

    /// Requests that returned fewer clips than asked for.
    pub const SHORTFALL_TOTAL: &str = "clip_supply_shortfall_total";
}

pub fn record_candidate(outcome: &'static str) {
    counter!(names::CANDIDATES_TOTAL, "outcome" => outcome).increment(1);
}

pub fn record_repair(result: &'static str) {
    counter!(names::REPAIRS_TOTAL, "result" => result).increment(1);
}

pub fn record_shortfall() {
    counter!(names::SHORTFALL_TOTAL).increment(1);
}
