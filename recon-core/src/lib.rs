//! Wealth Event Reconciliation Core
//!
//! Reconciles financial events reported by independent upstream providers
//! into one canonical per-user event log, with duplicate detection and
//! conflict resolution between competing reports of the same transaction.
//!
//! # Architecture
//!
//! - **Identity**: deterministic canonical hashing separates transaction
//!   identity (dedupe key) from report content (fingerprint)
//! - **Single Slot**: at most one live event per dedupe key at any time
//! - **Supersede Chain**: replaced reports are retained, never deleted
//! - **Derived Views**: timeline and balances are pure functions of the
//!   effective (VALID, non-superseded) events
//!
//! # Invariants
//!
//! - Deterministic outcome: same reports → same winning slot, in any
//!   arrival order (tie scores excepted, where last write wins)
//! - Status transitions are monotonic: a superseded, duplicate, or
//!   ignored event is never re-activated
//! - Only VALID events contribute to balances

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod canonical;
pub mod config;
pub mod error;
pub mod metrics;
pub mod score;
pub mod store;
pub mod types;
pub mod views;

// Re-exports
pub use config::Config;
pub use error::{Error, Result};
pub use store::ReconciliationStore;
pub use types::{CanonicalEvent, EventStatus, EventType, IngestOutcome, SourceType};
pub use views::{AccountView, GlobalBalance};
