//! Catalog-specific metrics.

use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Outcome label attached to catalog operation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    NotFound,
    Conflict,
    Invalid,
    Error,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::NotFound => "not_found",
            Outcome::Conflict => "conflict",
            Outcome::Invalid => "invalid",
            Outcome::Error => "error",
        }
    }
}

/// Catalog metrics recorder
pub struct CatalogMetrics;

impl CatalogMetrics {
    // =========================================================================
    // Operation Metrics
    // =========================================================================

    /// Record a finished catalog operation (`create`, `get`, `list`, `update`, `delete`).
    ///
    /// Callers measure `elapsed` with whichever clock they run on.
    pub fn record_operation(operation: &'static str, outcome: Outcome, elapsed: Duration) {
        counter!(
            "catalog_operations_total",
            "operation" => operation,
            "outcome" => outcome.as_str()
        )
        .increment(1);
        histogram!("catalog_operation_duration_seconds", "operation" => operation)
            .record(elapsed.as_secs_f64());
    }

    /// Record products written by the startup seeder.
    pub fn record_seeded(inserted: usize, duplicates: usize) {
        counter!("catalog_seeded_products_total").increment(inserted as u64);
        if duplicates > 0 {
            counter!("catalog_seed_duplicates_total").increment(duplicates as u64);
        }

        tracing::debug!(inserted, duplicates, "Recorded seeding metrics");
    }

    /// Record entries dropped by an expiry sweep.
    pub fn record_purged(count: usize) {
        counter!("catalog_expired_products_total").increment(count as u64);
    }

    // =========================================================================
    // Gauge Metrics (Current State)
    // =========================================================================

    /// Set the number of live products in the store.
    pub fn set_products_count(count: usize) {
        gauge!("catalog_products").set(count as f64);
    }
}
