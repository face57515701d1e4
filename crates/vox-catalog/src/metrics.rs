//! Catalog metrics collection.
//!
//! - Request counters by operation and status
//! - Latency histograms

use std::future::Future;
use std::time::Instant;

use metrics::{counter, histogram};

use crate::error::CatalogResult;

/// Metric name constants.
pub mod names {
    /// Total catalog requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "catalog_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "catalog_latency_seconds";
}

/// Record metrics for a completed catalog request.
pub fn record_request(operation: &'static str, status: &'static str, latency_secs: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation,
        "status" => status
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation
    )
    .record(latency_secs);
}

/// Await a catalog call and record its outcome.
pub async fn timed<T, F>(operation: &'static str, fut: F) -> CatalogResult<T>
where
    F: Future<Output = CatalogResult<T>>,
{
    let start = Instant::now();
    let result = fut.await;
    let status = match &result {
        Ok(_) => "ok",
        Err(e) => e.status_label(),
    };
    record_request(operation, status, start.elapsed().as_secs_f64());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    #[test]
    fn test_metric_names() {
        assert!(names::REQUESTS_TOTAL.contains("requests"));
        assert!(names::LATENCY_SECONDS.contains("latency"));
    }

    #[tokio::test]
    async fn test_timed_passes_result_through() {
        let ok = timed("fetch_by_id", async { Ok::<_, CatalogError>(3) }).await;
        assert_eq!(ok.unwrap(), 3);

        let err = timed("fetch_by_id", async {
            Err::<u32, _>(CatalogError::unavailable("down"))
        })
        .await;
        assert!(matches!(err, Err(CatalogError::Unavailable(_))));
    }
}
