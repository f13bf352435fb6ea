//! Crypto exchange payload adapter
//!
//! Exchange webhooks report asset movements with a fiat valuation:
//!
//! ```json
//! {
//!   "userId": "user-001",
//!   "platform": "Coinbase",
//!   "id": "tx-abc123",
//!   "time": 1710001000000,
//!   "type": "crypto_deposit",
//!   "asset": "BTC",
//!   "amount": 0.05,
//!   "fiatValue": 1500,
//!   "currency": "EUR",
//!   "walletId": "acc-03"
//! }
//! ```

use crate::{adapter::ProviderAdapter, shape::PayloadReader, Result};
use recon_core::canonical::build_dedupe_key;
use recon_core::{CanonicalEvent, EventStatus, EventType, SourceType};
use serde_json::Value;

/// Adapter for the crypto exchange payload shape
#[derive(Debug, Clone, Copy)]
pub struct CryptoAdapter;

impl ProviderAdapter for CryptoAdapter {
    fn source_type(&self) -> SourceType {
        SourceType::Crypto
    }

    fn name(&self) -> &'static str {
        "crypto"
    }

    fn normalize(&self, raw: &Value) -> Result<CanonicalEvent> {
        let mut p = PayloadReader::new(self.name(), raw);

        let user_id = p.require_str("userId");
        let provider = p.require_str("platform");
        let external_event_id = p.require_str("id");
        let timestamp = p.require_epoch_millis("time");
        let direction = p.opt_enum("type", &["crypto_deposit", "crypto_withdrawal"]);
        let asset = p.opt_str("asset");
        let amount = p.opt_decimal("amount");
        let fiat_value = p.opt_decimal("fiatValue");
        let currency = p.opt_str("currency");
        let account_id = p.require_str("walletId");

        p.finish()?;

        let event_type = match direction.as_deref() {
            Some("crypto_deposit") => EventType::CryptoDeposit,
            _ => EventType::CryptoWithdrawal,
        };

        let dedupe_key = build_dedupe_key(&provider, Some(&external_event_id), &user_id);

        Ok(CanonicalEvent {
            user_id,
            provider,
            source_type: SourceType::Crypto,
            external_event_id: Some(external_event_id),
            account_id,
            timestamp,
            event_type,
            currency,
            amount,
            asset,
            fiat_value,
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
            "platform": "Coinbase",
            "id": "tx-abc123",
            "time": 1710001000000i64,
            "type": "crypto_deposit",
            "asset": "BTC",
            "amount": 0.05,
            "fiatValue": 1500,
            "currency": "EUR",
            "walletId": "acc-03"
        })
    }

    #[test]
    fn normalizes_deposit() {
        let event = CryptoAdapter.normalize(&payload()).unwrap();
        assert_eq!(event.provider, "Coinbase");
        assert_eq!(event.source_type, SourceType::Crypto);
        assert_eq!(event.account_id, "acc-03");
        assert_eq!(event.event_type, EventType::CryptoDeposit);
        assert_eq!(event.asset.as_deref(), Some("BTC"));
        assert_eq!(event.amount, Some(dec!(0.05)));
        assert_eq!(event.fiat_value, Some(dec!(1500)));
        assert_eq!(event.timestamp.timestamp_millis(), 1710001000000);
    }

    #[test]
    fn missing_direction_maps_to_withdrawal() {
        let mut raw = payload();
        raw.as_object_mut().unwrap().remove("type");
        let event = CryptoAdapter.normalize(&raw).unwrap();
        assert_eq!(event.event_type, EventType::CryptoWithdrawal);
    }

    #[test]
    fn non_numeric_time_is_a_shape_violation() {
        let mut raw = payload();
        raw["time"] = json!("2024-03-09");
        assert!(CryptoAdapter.normalize(&raw).is_err());
    }
}
