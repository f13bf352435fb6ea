//! Aggregation views over a user's event log
//!
//! Pure functions of a snapshot of store state. Balances count only
//! effective (VALID) events; the timeline shows every stored slot.

use crate::types::{CanonicalEvent, EventType};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-account balance view
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    /// Provider-native account / wallet / policy identifier
    pub account_id: String,

    /// Signed balance in the base currency
    pub balance_eur: Decimal,

    /// Quantity held per crypto asset
    pub assets: BTreeMap<String, Decimal>,
}

/// Total balance across all accounts
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GlobalBalance {
    /// Fiat balances plus EUR-valued crypto contributions
    pub total_eur: Decimal,
}

/// Signed contribution of an event type to a fiat balance
fn fiat_sign(event_type: EventType) -> Option<Decimal> {
    match event_type {
        EventType::FiatCredit | EventType::InsurancePayout => Some(Decimal::ONE),
        EventType::FiatDebit | EventType::InsurancePremium => Some(-Decimal::ONE),
        EventType::CryptoDeposit | EventType::CryptoWithdrawal => None,
    }
}

/// All stored events sorted by timestamp descending
///
/// The sort is stable, so events with equal timestamps keep their
/// insertion order.
pub fn timeline(events: &[CanonicalEvent]) -> Vec<CanonicalEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}

/// Group effective events by account and accumulate balances
///
/// Fiat amounts contribute only in the base currency; asset quantities
/// accumulate from any event carrying an asset and an amount, whatever
/// the currency. Accounts are returned in first-seen order.
pub fn accounts(effective: &[CanonicalEvent], base_currency: &str) -> Vec<AccountView> {
    let mut order: Vec<String> = Vec::new();
    let mut by_account: BTreeMap<String, AccountView> = BTreeMap::new();

    for event in effective {
        let view = by_account
            .entry(event.account_id.clone())
            .or_insert_with(|| {
                order.push(event.account_id.clone());
                AccountView {
                    account_id: event.account_id.clone(),
                    balance_eur: Decimal::ZERO,
                    assets: BTreeMap::new(),
                }
            });

        if let Some(amount) = event.amount {
            if event.currency.as_deref() == Some(base_currency) {
                if let Some(sign) = fiat_sign(event.event_type) {
                    view.balance_eur += sign * amount;
                }
            }
            if let Some(asset) = &event.asset {
                *view.assets.entry(asset.clone()).or_insert(Decimal::ZERO) += amount;
            }
        }
    }

    order
        .into_iter()
        .filter_map(|account_id| by_account.remove(&account_id))
        .collect()
}

/// Sum of per-account balances plus EUR-denominated crypto value
///
/// Crypto contributes through `fiat_value`: withdrawals subtract,
/// everything else adds.
pub fn global_balance(effective: &[CanonicalEvent], base_currency: &str) -> GlobalBalance {
    let fiat: Decimal = accounts(effective, base_currency)
        .iter()
        .map(|a| a.balance_eur)
        .sum();

    let crypto: Decimal = effective
        .iter()
        .filter(|e| e.currency.as_deref() == Some(base_currency))
        .filter_map(|e| {
            e.fiat_value.map(|fv| {
                if e.event_type == EventType::CryptoWithdrawal {
                    -fv
                } else {
                    fv
                }
            })
        })
        .sum();

    GlobalBalance {
        total_eur: fiat + crypto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::build_dedupe_key;
    use crate::types::{EventStatus, SourceType};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn event(
        account_id: &str,
        event_type: EventType,
        amount: Option<Decimal>,
        currency: Option<&str>,
    ) -> CanonicalEvent {
        CanonicalEvent {
            user_id: "user-001".to_string(),
            provider: "BNP".to_string(),
            source_type: SourceType::Bank,
            external_event_id: Some("txn-1".to_string()),
            account_id: account_id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 12, 8, 12, 0, 0).unwrap(),
            event_type,
            currency: currency.map(str::to_string),
            amount,
            asset: None,
            fiat_value: None,
            description: None,
            dedupe_key: build_dedupe_key("BNP", Some("txn-1"), "user-001"),
            status: EventStatus::Valid,
            supersedes_key: None,
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn credits_add_and_debits_subtract() {
        let events = vec![
            event("acc-01", EventType::FiatCredit, Some(dec!(2000)), Some("EUR")),
            event("acc-01", EventType::FiatDebit, Some(dec!(300)), Some("EUR")),
            event("acc-01", EventType::InsurancePremium, Some(dec!(100)), Some("EUR")),
            event("acc-01", EventType::InsurancePayout, Some(dec!(50)), Some("EUR")),
        ];
        let views = accounts(&events, "EUR");
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].balance_eur, dec!(1650));
    }

    #[test]
    fn non_base_currency_does_not_move_fiat_balance() {
        let events = vec![
            event("acc-01", EventType::FiatCredit, Some(dec!(2000)), Some("USD")),
            event("acc-01", EventType::FiatCredit, Some(dec!(10)), None),
        ];
        let views = accounts(&events, "EUR");
        assert_eq!(views[0].balance_eur, Decimal::ZERO);
    }

    #[test]
    fn asset_quantities_accumulate_regardless_of_currency() {
        let mut deposit = event("acc-03", EventType::CryptoDeposit, Some(dec!(0.05)), Some("USD"));
        deposit.asset = Some("BTC".to_string());
        let mut again = event("acc-03", EventType::CryptoDeposit, Some(dec!(0.02)), None);
        again.asset = Some("BTC".to_string());

        let views = accounts(&[deposit, again], "EUR");
        assert_eq!(views[0].assets.get("BTC"), Some(&dec!(0.07)));
        // Crypto amounts never touch the fiat balance
        assert_eq!(views[0].balance_eur, Decimal::ZERO);
    }

    #[test]
    fn accounts_keep_first_seen_order() {
        let events = vec![
            event("acc-02", EventType::FiatCredit, Some(dec!(1)), Some("EUR")),
            event("acc-01", EventType::FiatCredit, Some(dec!(2)), Some("EUR")),
            event("acc-02", EventType::FiatDebit, Some(dec!(1)), Some("EUR")),
        ];
        let views = accounts(&events, "EUR");
        assert_eq!(views[0].account_id, "acc-02");
        assert_eq!(views[1].account_id, "acc-01");
    }

    #[test]
    fn global_balance_adds_eur_crypto_value() {
        let mut deposit = event("acc-03", EventType::CryptoDeposit, Some(dec!(0.05)), Some("EUR"));
        deposit.asset = Some("BTC".to_string());
        deposit.fiat_value = Some(dec!(1500));
        let mut withdrawal = event("acc-03", EventType::CryptoWithdrawal, Some(dec!(0.01)), Some("EUR"));
        withdrawal.asset = Some("BTC".to_string());
        withdrawal.fiat_value = Some(dec!(400));
        let credit = event("acc-01", EventType::FiatCredit, Some(dec!(2000)), Some("EUR"));

        let balance = global_balance(&[deposit, withdrawal, credit], "EUR");
        assert_eq!(balance.total_eur, dec!(3100)); // 2000 + 1500 - 400
    }

    #[test]
    fn non_eur_fiat_value_is_excluded() {
        let mut deposit = event("acc-03", EventType::CryptoDeposit, Some(dec!(0.05)), Some("USD"));
        deposit.fiat_value = Some(dec!(1500));

        let balance = global_balance(&[deposit], "EUR");
        assert_eq!(balance.total_eur, Decimal::ZERO);
    }

    #[test]
    fn timeline_is_descending_and_stable() {
        let mut a = event("acc-01", EventType::FiatCredit, Some(dec!(1)), Some("EUR"));
        a.timestamp = Utc.with_ymd_and_hms(2025, 12, 1, 9, 0, 0).unwrap();
        a.external_event_id = Some("old".to_string());
        let mut b = event("acc-01", EventType::FiatCredit, Some(dec!(2)), Some("EUR"));
        b.external_event_id = Some("tied-first".to_string());
        let mut c = event("acc-01", EventType::FiatCredit, Some(dec!(3)), Some("EUR"));
        c.external_event_id = Some("tied-second".to_string());

        let sorted = timeline(&[a, b, c]);
        assert_eq!(sorted[0].external_event_id.as_deref(), Some("tied-first"));
        assert_eq!(sorted[1].external_event_id.as_deref(), Some("tied-second"));
        assert_eq!(sorted[2].external_event_id.as_deref(), Some("old"));
    }
}
