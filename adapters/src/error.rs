//! Error types for adapters

use std::fmt;
use thiserror::Error;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// One violated constraint in a raw payload
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldViolation {
    /// Payload field name (provider-native)
    pub field: String,
    /// Constraint that was violated
    pub constraint: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.constraint)
    }
}

/// Adapter errors
#[derive(Error, Debug)]
pub enum Error {
    /// Raw payload does not match the provider schema
    #[error("{provider} payload failed shape validation: {}", format_violations(.violations))]
    Schema {
        /// Provider adapter name
        provider: &'static str,
        /// Every violated field with its constraint
        violations: Vec<FieldViolation>,
    },
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Build a schema error from collected violations
    pub fn schema(provider: &'static str, violations: Vec<FieldViolation>) -> Self {
        Error::Schema {
            provider,
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_violation() {
        let err = Error::schema(
            "bank",
            vec![
                FieldViolation {
                    field: "txnId".to_string(),
                    constraint: "required".to_string(),
                },
                FieldViolation {
                    field: "amount".to_string(),
                    constraint: "must be a number".to_string(),
                },
            ],
        );
        let msg = err.to_string();
        assert!(msg.contains("txnId: required"));
        assert!(msg.contains("amount: must be a number"));
    }
}
