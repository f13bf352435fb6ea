//! Shape validation over raw JSON payloads
//!
//! [`PayloadReader`] walks a provider payload field by field and
//! accumulates every violated constraint instead of failing on the
//! first, so the caller gets one structured error describing the whole
//! payload. Required accessors hand back placeholder values when the
//! field is bad; a placeholder is always accompanied by a recorded
//! violation, and [`PayloadReader::finish`] refuses such payloads, so
//! placeholders never escape a successful normalization.

use crate::error::{Error, FieldViolation, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::warn;

/// Field-by-field reader for one provider payload
#[derive(Debug)]
pub struct PayloadReader<'a> {
    provider: &'static str,
    fields: Option<&'a Map<String, Value>>,
    violations: Vec<FieldViolation>,
}

impl<'a> PayloadReader<'a> {
    /// Start reading a raw payload
    pub fn new(provider: &'static str, raw: &'a Value) -> Self {
        let fields = raw.as_object();
        let mut violations = Vec::new();
        if fields.is_none() {
            violations.push(FieldViolation {
                field: "$".to_string(),
                constraint: "must be a JSON object".to_string(),
            });
        }
        Self {
            provider,
            fields,
            violations,
        }
    }

    fn record(&mut self, field: &str, constraint: &str) {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            constraint: constraint.to_string(),
        });
    }

    /// Absent and null are both treated as missing
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields
            .and_then(|f| f.get(field))
            .filter(|v| !v.is_null())
    }

    /// Required string field
    pub fn require_str(&mut self, field: &str) -> String {
        match self.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.record(field, "must be a string");
                String::new()
            }
            None => {
                self.record(field, "required");
                String::new()
            }
        }
    }

    /// Optional string field
    pub fn opt_str(&mut self, field: &str) -> Option<String> {
        match self.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.record(field, "must be a string");
                None
            }
            None => None,
        }
    }

    /// Optional numeric field, read exactly (no float round-trip noise)
    pub fn opt_decimal(&mut self, field: &str) -> Option<Decimal> {
        match self.get(field) {
            Some(Value::Number(n)) => match decimal_from_number(n) {
                Some(d) => Some(d),
                None => {
                    self.record(field, "must be a representable number");
                    None
                }
            },
            Some(_) => {
                self.record(field, "must be a number");
                None
            }
            None => None,
        }
    }

    /// Optional enum field; values outside `allowed` are violations
    pub fn opt_enum(&mut self, field: &str, allowed: &[&str]) -> Option<String> {
        match self.get(field) {
            Some(Value::String(s)) if allowed.contains(&s.as_str()) => Some(s.clone()),
            Some(_) => {
                self.record(field, &format!("must be one of {}", allowed.join("|")));
                None
            }
            None => None,
        }
    }

    /// Required ISO-8601 datetime string
    pub fn require_rfc3339(&mut self, field: &str) -> DateTime<Utc> {
        match self.get(field) {
            Some(Value::String(s)) => match DateTime::parse_from_rfc3339(s) {
                Ok(dt) => dt.with_timezone(&Utc),
                Err(_) => {
                    self.record(field, "must be an ISO-8601 datetime");
                    DateTime::UNIX_EPOCH
                }
            },
            Some(_) => {
                self.record(field, "must be a string");
                DateTime::UNIX_EPOCH
            }
            None => {
                self.record(field, "required");
                DateTime::UNIX_EPOCH
            }
        }
    }

    /// Required epoch-milliseconds timestamp
    pub fn require_epoch_millis(&mut self, field: &str) -> DateTime<Utc> {
        match self.get(field) {
            Some(Value::Number(n)) => match n.as_i64().and_then(DateTime::from_timestamp_millis) {
                Some(dt) => dt,
                None => {
                    self.record(field, "must be epoch milliseconds");
                    DateTime::UNIX_EPOCH
                }
            },
            Some(_) => {
                self.record(field, "must be a number");
                DateTime::UNIX_EPOCH
            }
            None => {
                self.record(field, "required");
                DateTime::UNIX_EPOCH
            }
        }
    }

    /// Finish: Ok only when no constraint was violated
    pub fn finish(self) -> Result<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            warn!(
                provider = self.provider,
                violations = self.violations.len(),
                "payload failed shape validation"
            );
            Err(Error::schema(self.provider, self.violations))
        }
    }
}

/// Convert a JSON number to Decimal without going through f64 parsing
/// artifacts where the shortest decimal rendering is exact
fn decimal_from_number(n: &serde_json::Number) -> Option<Decimal> {
    let rendered = n.to_string();
    Decimal::from_str(&rendered)
        .or_else(|_| Decimal::from_scientific(&rendered))
        .ok()
}
