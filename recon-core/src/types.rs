//! Core types for the reconciliation engine
//!
//! All types are designed for:
//! - Deterministic hashing (explicit canonical field order, see
//!   [`crate::canonical`])
//! - Exact arithmetic (Decimal for money)
//! - One canonical shape regardless of the reporting provider

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upstream provider category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    /// Retail bank
    Bank,
    /// Crypto exchange
    Crypto,
    /// Insurance company
    Insurer,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceType::Bank => "BANK",
            SourceType::Crypto => "CRYPTO",
            SourceType::Insurer => "INSURER",
        };
        write!(f, "{}", s)
    }
}

/// Canonical event type, one per provider-native direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Fiat money in (bank credit)
    FiatCredit,
    /// Fiat money out (bank debit)
    FiatDebit,
    /// Crypto asset deposit
    CryptoDeposit,
    /// Crypto asset withdrawal
    CryptoWithdrawal,
    /// Insurance premium paid
    InsurancePremium,
    /// Insurance payout received
    InsurancePayout,
}

impl EventType {
    /// Canonical wire name (SCREAMING_SNAKE_CASE)
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::FiatCredit => "FIAT_CREDIT",
            EventType::FiatDebit => "FIAT_DEBIT",
            EventType::CryptoDeposit => "CRYPTO_DEPOSIT",
            EventType::CryptoWithdrawal => "CRYPTO_WITHDRAWAL",
            EventType::InsurancePremium => "INSURANCE_PREMIUM",
            EventType::InsurancePayout => "INSURANCE_PAYOUT",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a stored event
///
/// Transitions are monotonic per dedupe-key slot: VALID/INCOMPLETE may
/// move to SUPERSEDED when replaced; DUPLICATE, IGNORED, and SUPERSEDED
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Effective: counted in balances
    Valid,
    /// Stored but missing a required field; excluded from balances
    Incomplete,
    /// Byte-identical replay of an already stored report; rejected
    Duplicate,
    /// Replaced by a higher-ranked report of the same transaction
    Superseded,
    /// Lost the conflict against the stored report; rejected
    Ignored,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventStatus::Valid => "VALID",
            EventStatus::Incomplete => "INCOMPLETE",
            EventStatus::Duplicate => "DUPLICATE",
            EventStatus::Superseded => "SUPERSEDED",
            EventStatus::Ignored => "IGNORED",
        };
        write!(f, "{}", s)
    }
}

/// Provider-agnostic normalized representation of one reported transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// Owning user
    pub user_id: String,

    /// Provider display name (bank id, platform, insurer)
    pub provider: String,

    /// Provider category
    pub source_type: SourceType,

    /// Provider-native transaction id, if the provider reports one
    pub external_event_id: Option<String>,

    /// Provider-native account / wallet / policy identifier
    pub account_id: String,

    /// Absolute time of the transaction
    pub timestamp: DateTime<Utc>,

    /// Canonical direction
    pub event_type: EventType,

    /// Fiat currency code (EUR, ...)
    pub currency: Option<String>,

    /// Fiat amount
    pub amount: Option<Decimal>,

    /// Crypto asset symbol (BTC, ...)
    pub asset: Option<String>,

    /// Fiat valuation of the crypto movement
    pub fiat_value: Option<Decimal>,

    /// Free-text description
    pub description: Option<String>,

    /// Deterministic transaction identity (hex SHA-256, see
    /// [`crate::canonical::build_dedupe_key`])
    pub dedupe_key: String,

    /// Lifecycle status, decided by the store at ingest
    pub status: EventStatus,

    /// Dedupe key of the event this one replaced, if any
    pub supersedes_key: Option<String>,

    /// Original provider payload, kept opaque for diagnostics
    pub raw: serde_json::Value,
}

impl CanonicalEvent {
    /// A complete event carries everything balances depend on.
    ///
    /// `timestamp`, `user_id`, `account_id`, and `event_type` are
    /// structural here, so in practice the gate trips on a missing
    /// amount or an empty identifier.
    pub fn is_complete(&self) -> bool {
        !self.user_id.is_empty() && !self.account_id.is_empty() && self.amount.is_some()
    }
}

/// Result of one ingest call
///
/// Every input produces an outcome; no business result is an error.
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    /// Whether the incoming report was taken into the log
    pub accepted: bool,

    /// Outcome status (for rejected reports, the reason)
    pub status: EventStatus,

    /// The event now occupying the slot (the existing one when the
    /// incoming report was rejected)
    pub event: CanonicalEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&EventStatus::Superseded).unwrap();
        assert_eq!(json, "\"SUPERSEDED\"");
        let json = serde_json::to_string(&EventType::FiatCredit).unwrap();
        assert_eq!(json, "\"FIAT_CREDIT\"");
        let json = serde_json::to_string(&SourceType::Insurer).unwrap();
        assert_eq!(json, "\"INSURER\"");
    }

    #[test]
    fn zero_amount_counts_as_present() {
        use chrono::Utc;
        use rust_decimal::Decimal;

        let event = CanonicalEvent {
            user_id: "user-001".to_string(),
            provider: "BNP".to_string(),
            source_type: SourceType::Bank,
            external_event_id: Some("txn-zero".to_string()),
            account_id: "acc-01".to_string(),
            timestamp: Utc::now(),
            event_type: EventType::FiatCredit,
            currency: Some("EUR".to_string()),
            amount: Some(Decimal::ZERO),
            asset: None,
            fiat_value: None,
            description: None,
            dedupe_key: "k".to_string(),
            status: EventStatus::Valid,
            supersedes_key: None,
            raw: serde_json::Value::Null,
        };
        // A reported zero is a real amount; only a missing field gates
        assert!(event.is_complete());

        let mut gapped = event;
        gapped.amount = None;
        assert!(!gapped.is_complete());
    }

    #[test]
    fn event_type_round_trips() {
        for et in [
            EventType::FiatCredit,
            EventType::FiatDebit,
            EventType::CryptoDeposit,
            EventType::CryptoWithdrawal,
            EventType::InsurancePremium,
            EventType::InsurancePayout,
        ] {
            let json = serde_json::to_string(&et).unwrap();
            let back: EventType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, et);
            assert_eq!(json, format!("\"{}\"", et.as_str()));
        }
    }
}
