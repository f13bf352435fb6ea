//! Provider adapter contract

use crate::Result;
use recon_core::{CanonicalEvent, SourceType};
use serde_json::Value;

/// Provider adapter trait
///
/// One implementation per upstream payload shape. `normalize` validates
/// the raw payload against the provider schema and maps it to a
/// canonical event with its dedupe key attached and initial status
/// VALID; the store decides the final status at ingest.
pub trait ProviderAdapter: Send + Sync {
    /// Provider category this adapter handles
    fn source_type(&self) -> SourceType;

    /// Adapter name (used in validation errors and logs)
    fn name(&self) -> &'static str;

    /// Validate and normalize one raw payload
    fn normalize(&self, raw: &Value) -> Result<CanonicalEvent>;
}

/// Adapter for a provider category
///
/// The match is exhaustive: adding a provider variant forces an adapter.
pub fn adapter_for(source: SourceType) -> &'static dyn ProviderAdapter {
    match source {
        SourceType::Bank => &crate::bank::BankAdapter,
        SourceType::Crypto => &crate::crypto::CryptoAdapter,
        SourceType::Insurer => &crate::insurer::InsurerAdapter,
    }
}
