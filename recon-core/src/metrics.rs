//! Metrics collection for observability
//!
//! Prometheus counters for each ingest outcome, registered on a
//! private registry so multiple stores can coexist in one process.
//!
//! # Metrics
//!
//! - `recon_events_ingested_total` - Reports accepted into the log
//! - `recon_events_duplicate_total` - Byte-identical replays rejected
//! - `recon_events_ignored_total` - Conflicts lost by the incoming report
//! - `recon_events_superseded_total` - Stored events replaced by a correction
//! - `recon_events_incomplete_total` - Reports stored but excluded from balances

use prometheus::{IntCounter, Registry};
use std::fmt;
use std::sync::Arc;

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Reports accepted into the log
    pub ingested_total: IntCounter,

    /// Byte-identical replays rejected
    pub duplicate_total: IntCounter,

    /// Conflicts lost by the incoming report
    pub ignored_total: IntCounter,

    /// Stored events replaced by a correction
    pub superseded_total: IntCounter,

    /// Reports stored but excluded from balances
    pub incomplete_total: IntCounter,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl fmt::Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metrics")
            .field("ingested_total", &self.ingested_total.get())
            .field("duplicate_total", &self.duplicate_total.get())
            .field("ignored_total", &self.ignored_total.get())
            .field("superseded_total", &self.superseded_total.get())
            .field("incomplete_total", &self.incomplete_total.get())
            .finish()
    }
}

impl Metrics {
    /// Create new metrics collector with its own registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let ingested_total = IntCounter::new(
            "recon_events_ingested_total",
            "Reports accepted into the log",
        )?;
        registry.register(Box::new(ingested_total.clone()))?;

        let duplicate_total = IntCounter::new(
            "recon_events_duplicate_total",
            "Byte-identical replays rejected",
        )?;
        registry.register(Box::new(duplicate_total.clone()))?;

        let ignored_total = IntCounter::new(
            "recon_events_ignored_total",
            "Conflicts lost by the incoming report",
        )?;
        registry.register(Box::new(ignored_total.clone()))?;

        let superseded_total = IntCounter::new(
            "recon_events_superseded_total",
            "Stored events replaced by a correction",
        )?;
        registry.register(Box::new(superseded_total.clone()))?;

        let incomplete_total = IntCounter::new(
            "recon_events_incomplete_total",
            "Reports stored but excluded from balances",
        )?;
        registry.register(Box::new(incomplete_total.clone()))?;

        Ok(Self {
            ingested_total,
            duplicate_total,
            ignored_total,
            superseded_total,
            incomplete_total,
            registry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let metrics = Metrics::new().unwrap();
        assert_eq!(metrics.ingested_total.get(), 0);
        assert_eq!(metrics.duplicate_total.get(), 0);
    }

    #[test]
    fn registries_are_independent() {
        // Two collectors must not collide on registration
        let a = Metrics::new().unwrap();
        let b = Metrics::new().unwrap();
        a.ingested_total.inc();
        assert_eq!(a.ingested_total.get(), 1);
        assert_eq!(b.ingested_total.get(), 0);
    }
}
