//! Canonical serialization and identity hashing
//!
//! Ensures a deterministic byte representation before hashing, so that
//! identical structured input always yields identical keys regardless
//! of field formatting. Uses fixed field order, length-prefixed
//! strings, presence markers for optional fields, and normalized
//! decimal rendering.
//!
//! Two independent identities are derived per event:
//!
//! - **dedupe key**: hash of (provider, external event id, user id).
//!   Two reports sharing it are claims about the *same* transaction,
//!   even when the rest of their fields differ.
//! - **fingerprint**: hash of the content fields. Equality means the
//!   two reports are byte-identical claims.

use crate::types::CanonicalEvent;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Canonical byte writer with a fixed field order
#[derive(Debug, Default)]
pub struct CanonicalWriter {
    buffer: Vec<u8>,
}

impl CanonicalWriter {
    /// Create new writer
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Write string (length-prefixed, big-endian)
    pub fn write_str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        self.buffer.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        self.buffer.extend_from_slice(bytes);
    }

    /// Write i64 (big-endian)
    pub fn write_i64(&mut self, n: i64) {
        self.buffer.extend_from_slice(&n.to_be_bytes());
    }

    /// Write optional string with a presence marker
    pub fn write_opt_str(&mut self, opt: Option<&str>) {
        match opt {
            Some(s) => {
                self.buffer.push(1);
                self.write_str(s);
            }
            None => self.buffer.push(0),
        }
    }

    /// Write optional decimal, normalized so trailing zeros do not
    /// change the hash (`2000` and `2000.00` serialize identically)
    pub fn write_opt_decimal(&mut self, opt: Option<&Decimal>) {
        match opt {
            Some(d) => {
                self.buffer.push(1);
                self.write_str(&d.normalize().to_string());
            }
            None => self.buffer.push(0),
        }
    }

    /// Compute hex-encoded SHA-256 over the written bytes
    pub fn hash_hex(self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.buffer);
        hex::encode(hasher.finalize())
    }
}

/// Build the dedupe key: the stable transaction identity
///
/// Hash of (provider, external event id, user id) in fixed order.
pub fn build_dedupe_key(provider: &str, external_event_id: Option<&str>, user_id: &str) -> String {
    let mut w = CanonicalWriter::new();
    w.write_str(provider);
    w.write_opt_str(external_event_id);
    w.write_str(user_id);
    w.hash_hex()
}

/// Build the fingerprint: the report content identity
///
/// Hash of (event type, amount, currency, asset, fiat value, timestamp,
/// description) in fixed order. Timestamps hash as epoch milliseconds.
pub fn fingerprint(event: &CanonicalEvent) -> String {
    let mut w = CanonicalWriter::new();
    w.write_str(event.event_type.as_str());
    w.write_opt_decimal(event.amount.as_ref());
    w.write_opt_str(event.currency.as_deref());
    w.write_opt_str(event.asset.as_deref());
    w.write_opt_decimal(event.fiat_value.as_ref());
    w.write_i64(event.timestamp.timestamp_millis());
    w.write_opt_str(event.description.as_deref());
    w.hash_hex()
}
