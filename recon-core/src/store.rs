//! Reconciliation store: the stateful core of the engine
//!
//! Owns the per-user event log and the dedupe index, and implements the
//! ingest state machine: completeness gate, duplicate detection by
//! fingerprint, and conflict resolution by completeness score.
//!
//! # Concurrency
//!
//! Dedupe keys embed the user id, so serializing writes per user also
//! serializes them per key. Ingest takes the user's map entry
//! exclusively; two concurrent ingests for the same key therefore
//! observe each other's completed effect and can never double-insert a
//! slot. Queries take a shared guard on the user's log and see a
//! consistent snapshot (never a half-applied supersede). Unrelated
//! users live on separate shards and proceed in parallel. Nothing here
//! blocks on I/O; suspension is lock acquisition only.

use crate::{
    canonical::fingerprint,
    config::Config,
    metrics::Metrics,
    score::{resolve_conflict, Winner},
    types::{CanonicalEvent, EventStatus, IngestOutcome},
    views, Error, Result,
};
use dashmap::DashMap;
use std::collections::HashMap;
use tracing::debug;

/// One dedupe-key slot: the live event plus every report it replaced
///
/// Predecessors are retained for auditability and are reachable through
/// the supersede chain; they are not separately queryable.
#[derive(Debug)]
struct Slot {
    current: CanonicalEvent,
    history: Vec<CanonicalEvent>,
}

/// Per-user log: slots in insertion order plus the dedupe index
#[derive(Debug, Default)]
struct UserLog {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
}

/// The reconciliation store
///
/// Constructed once, lives for the process duration. All state is in
/// memory; there is no durability across restarts.
#[derive(Debug)]
pub struct ReconciliationStore {
    logs: DashMap<String, UserLog>,
    config: Config,
    metrics: Metrics,
}

impl ReconciliationStore {
    /// Create a store with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let metrics = Metrics::new()?;
        Ok(Self {
            logs: DashMap::new(),
            config,
            metrics,
        })
    }

    /// Create a store with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(Config::default())
    }

    /// Ingest one normalized report
    ///
    /// Every input yields an [`IngestOutcome`]; business results are
    /// never errors. `Err` signals an internal invariant violation,
    /// which is a defect in the store itself.
    pub fn ingest(&self, mut event: CanonicalEvent) -> Result<IngestOutcome> {
        if !event.is_complete() {
            event.status = EventStatus::Incomplete;
        }

        // Exclusive entry guard: the lookup and the slot write below are
        // one atomic unit for this user (and thus for this dedupe key).
        let mut log = self.logs.entry(event.user_id.clone()).or_default();

        let existing_pos = log.index.get(&event.dedupe_key).copied();
        let Some(pos) = existing_pos else {
            let accepted = event.status != EventStatus::Incomplete;
            let status = event.status;
            let pos = log.slots.len();
            log.index.insert(event.dedupe_key.clone(), pos);
            log.slots.push(Slot {
                current: event.clone(),
                history: Vec::new(),
            });

            if accepted {
                self.metrics.ingested_total.inc();
            } else {
                self.metrics.incomplete_total.inc();
            }
            debug!(
                user_id = %event.user_id,
                dedupe_key = %event.dedupe_key,
                status = %status,
                "stored new slot"
            );
            return Ok(IngestOutcome {
                accepted,
                status,
                event,
            });
        };

        let slot = log
            .slots
            .get_mut(pos)
            .ok_or_else(|| Error::InvariantViolation(format!("dedupe index points past log end: {}", pos)))?;
        if slot.current.dedupe_key != event.dedupe_key {
            return Err(Error::InvariantViolation(format!(
                "dedupe index entry for {} resolves to slot {}",
                event.dedupe_key, slot.current.dedupe_key
            )));
        }

        // Byte-identical replay of the stored report
        if fingerprint(&slot.current) == fingerprint(&event) {
            self.metrics.duplicate_total.inc();
            debug!(
                user_id = %event.user_id,
                dedupe_key = %event.dedupe_key,
                "duplicate replay rejected"
            );
            return Ok(IngestOutcome {
                accepted: false,
                status: EventStatus::Duplicate,
                event: slot.current.clone(),
            });
        }

        // Genuine conflict: two different claims about the same transaction
        match resolve_conflict(&slot.current, &event) {
            Winner::Existing => {
                self.metrics.ignored_total.inc();
                debug!(
                    user_id = %event.user_id,
                    dedupe_key = %event.dedupe_key,
                    "conflicting report lost to stored slot"
                );
                Ok(IngestOutcome {
                    accepted: false,
                    status: EventStatus::Ignored,
                    event: slot.current.clone(),
                })
            }
            Winner::Incoming => {
                event.supersedes_key = Some(slot.current.dedupe_key.clone());

                // Replace in place: the slot keeps its position so a
                // later correction does not disturb insertion order,
                // and the superseded report is retained on the chain.
                let mut superseded = std::mem::replace(&mut slot.current, event.clone());
                superseded.status = EventStatus::Superseded;
                slot.history.push(superseded);

                self.metrics.superseded_total.inc();
                self.metrics.ingested_total.inc();
                debug!(
                    user_id = %event.user_id,
                    dedupe_key = %event.dedupe_key,
                    "stored slot superseded by incoming report"
                );
                Ok(IngestOutcome {
                    accepted: true,
                    status: EventStatus::Valid,
                    event,
                })
            }
        }
    }

    /// All stored events for the user, most recent first
    pub fn timeline(&self, user_id: &str) -> Vec<CanonicalEvent> {
        views::timeline(&self.current_events(user_id))
    }

    /// Per-account balances derived from the user's effective events
    pub fn accounts(&self, user_id: &str) -> Vec<views::AccountView> {
        views::accounts(&self.effective_events(user_id), &self.config.base_currency)
    }

    /// Total balance across all of the user's accounts
    pub fn global_balance(&self, user_id: &str) -> views::GlobalBalance {
        views::global_balance(&self.effective_events(user_id), &self.config.base_currency)
    }

    /// Metrics collector for this store
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Snapshot of the user's current slots, in insertion order
    fn current_events(&self, user_id: &str) -> Vec<CanonicalEvent> {
        match self.logs.get(user_id) {
            Some(log) => log.slots.iter().map(|s| s.current.clone()).collect(),
            None => Vec::new(),
        }
    }

    /// Snapshot of the user's effective (VALID) events
    fn effective_events(&self, user_id: &str) -> Vec<CanonicalEvent> {
        match self.logs.get(user_id) {
            Some(log) => log
                .slots
                .iter()
                .map(|s| &s.current)
                .filter(|e| e.status == EventStatus::Valid)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}
