//! Bank payload adapter
//!
//! Bank webhooks report fiat movements:
//!
//! ```json
//! {
//!   "userId": "user-001",
//!   "bankId": "BNP",
//!   "txnId": "txn-12345",
//!   "date": "2025-12-08T12:00:00Z",
//!   "type": "credit",
//!   "amount": 2000,
//!   "currency": "EUR",
//!   "account": "acc-01",
//!   "description": "Virement salaire"
//! }
//! ```

use crate::{adapter::ProviderAdapter, shape::PayloadReader, Result};
use recon_core::canonical::build_dedupe_key;
use recon_core::{CanonicalEvent, EventStatus, EventType, SourceType};
use serde_json::Value;

/// Adapter for the bank payload shape
#[derive(Debug, Clone, Copy)]
pub struct BankAdapter;

impl ProviderAdapter for BankAdapter {
    fn source_type(&self) -> SourceType {
        SourceType::Bank
    }

    fn name(&self) -> &'static str {
        "bank"
    }

    fn normalize(&self, raw: &Value) -> Result<CanonicalEvent> {
        let mut p = PayloadReader::new(self.name(), raw);

        let user_id = p.require_str("userId");
        let provider = p.require_str("bankId");
        let external_event_id = p.require_str("txnId");
        let timestamp = p.require_rfc3339("date");
        let direction = p.opt_enum("type", &["credit", "debit"]);
        let amount = p.opt_decimal("amount");
        let currency = p.opt_str("currency");
        let account_id = p.require_str("account");
        let description = p.opt_str("description");

        p.finish()?;

        // Anything other than an explicit credit is money out
        let event_type = match direction.as_deref() {
            Some("credit") => EventType::FiatCredit,
            _ => EventType::FiatDebit,
        };

        let dedupe_key = build_dedupe_key(&provider, Some(&external_event_id), &user_id);

        Ok(CanonicalEvent {
            user_id,
            provider,
            source_type: SourceType::Bank,
            external_event_id: Some(external_event_id),
            account_id,
            timestamp,
            event_type,
            currency,
            amount,
            asset: None,
            fiat_value: None,
            description,
            dedupe_key,
            status: EventStatus::Valid,
            supersedes_key: None,
            raw: raw.clone(),
        })
    }
}
