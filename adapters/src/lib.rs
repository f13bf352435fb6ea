//! # Provider Normalization Adapters
//!
//! One adapter per upstream provider shape. Each adapter validates its
//! provider's raw webhook payload, then maps it to the canonical event
//! representation consumed by the reconciliation store.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐  ┌───────────┐  ┌───────────┐
//! │   Bank    │  │  Crypto   │  │  Insurer  │
//! │  payload  │  │  payload  │  │  payload  │
//! └─────┬─────┘  └─────┬─────┘  └─────┬─────┘
//!       │              │              │
//! ┌─────▼─────┐  ┌─────▼─────┐  ┌─────▼─────┐
//! │BankAdapter│  │CryptoAdptr│  │InsurerAdpt│
//! └─────┬─────┘  └─────┬─────┘  └─────┬─────┘
//!       │   validate shape, map fields │
//!       └──────────────┼───────────────┘
//!                      ▼
//!         CanonicalEvent (+ dedupe key)
//!                      ▼
//!         ReconciliationStore::ingest
//! ```
//!
//! Shape violations fail fast here with a structured list of the
//! violated fields; they never reach the store. Completeness (missing
//! amount and the like) is a store concern, not a shape concern: a
//! well-shaped payload with gaps still normalizes.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod adapter;
pub mod bank;
pub mod crypto;
pub mod error;
pub mod insurer;
pub mod shape;

pub use adapter::{adapter_for, ProviderAdapter};
pub use bank::BankAdapter;
pub use crypto::CryptoAdapter;
pub use error::{Error, FieldViolation, Result};
pub use insurer::InsurerAdapter;
