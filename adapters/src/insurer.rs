//! Insurer payload adapter
//!
//! Insurer webhooks report policy movements:
//!
//! ```json
//! {
//!   "userId": "user-001",
//!   "insurer": "AXA",
//!   "transactionId": "av-2025-001",
//!   "timestamp": 1710002000000,
//!   "movementType": "premium",
//!   "amount": 500,
//!   "currency": "EUR",
//!   "policyNumber": "acc-04"
//! }
//! ```

use crate::{adapter::ProviderAdapter, shape::PayloadReader, Result};
use recon_core::canonical::build_dedupe_key;
use recon_core::{CanonicalEvent, EventStatus, EventType, SourceType};
use serde_json::Value;

/// Adapter for the insurer payload shape
#[derive(Debug, Clone, Copy)]
pub struct InsurerAdapter;

impl ProviderAdapter for InsurerAdapter {
    fn source_type(&self) -> SourceType {
        SourceType::Insurer
    }

    fn name(&self) -> &'static str {
        "insurer"
    }

    fn normalize(&self, raw: &Value) -> Result<CanonicalEvent> {
        let mut p = PayloadReader::new(self.name(), raw);

        let user_id = p.require_str("userId");
        let provider = p.require_str("insurer");
        let external_event_id = p.require_str("transactionId");
        let timestamp = p.require_epoch_millis("timestamp");
        let direction = p.opt_enum("movementType", &["premium", "payout"]);
        let amount = p.opt_decimal("amount");
        let currency = p.opt_str("currency");
        let account_id = p.require_str("policyNumber");

        p.finish()?;

        let event_type = match direction.as_deref() {
            Some("premium") => EventType::InsurancePremium,
            _ => EventType::InsurancePayout,
        };

        let dedupe_key = build_dedupe_key(&provider, Some(&external_event_id), &user_id);

        Ok(CanonicalEvent {
            user_id,
            provider,
            source_type: SourceType::Insurer,
            external_event_id: Some(external_event_id),
            account_id,
            timestamp,
            event_type,
            currency,
            amount,
            asset: None,
            fiat_value: None,
            description: None,
            dedupe_key,
            status: EventStatus::Valid,
            supersedes_key: None,
            raw: raw.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "userId": "user-001",
            "insurer": "AXA",
            "transactionId": "av-2025-001",
            "timestamp": 1710002000000i64,
            "movementType": "premium",
            "amount": 500,
            "currency": "EUR",
            "policyNumber": "acc-04"
        })
    }

    #[test]
    fn normalizes_premium() {
        let event = InsurerAdapter.normalize(&payload()).unwrap();
        assert_eq!(event.provider, "AXA");
        assert_eq!(event.source_type, SourceType::Insurer);
        assert_eq!(event.account_id, "acc-04");
        assert_eq!(event.event_type, EventType::InsurancePremium);
        assert_eq!(event.amount, Some(dec!(500)));
        assert_eq!(event.timestamp.timestamp_millis(), 1710002000000);
    }

    #[test]
    fn payout_maps_to_insurance_payout() {
        let mut raw = payload();
        raw["movementType"] = json!("payout");
        let event = InsurerAdapter.normalize(&raw).unwrap();
        assert_eq!(event.event_type, EventType::InsurancePayout);
    }

    #[test]
    fn invalid_movement_type_is_a_shape_violation() {
        let mut raw = payload();
        raw["movementType"] = json!("refund");
        assert!(InsurerAdapter.normalize(&raw).is_err());
    }
}
