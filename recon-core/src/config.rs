//! Configuration for the reconciliation engine

use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service name (used in log fields)
    pub service_name: String,

    /// Service version
    pub service_version: String,

    /// Currency that balances are denominated in. Amounts in any other
    /// currency pass through asset quantities only; there is no
    /// conversion.
    pub base_currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "recon-core".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            base_currency: "EUR".to_string(),
        }
    }
}

impl Config {
    /// Load from TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(name) = std::env::var("RECON_SERVICE_NAME") {
            config.service_name = name;
        }

        if let Ok(currency) = std::env::var("RECON_BASE_CURRENCY") {
            if currency.is_empty() {
                return Err(crate::Error::Config(
                    "RECON_BASE_CURRENCY must not be empty".to_string(),
                ));
            }
            config.base_currency = currency;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service_name, "recon-core");
        assert_eq!(config.base_currency, "EUR");
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            service_name = "recon"
            service_version = "0.1.0"
            base_currency = "EUR"
            "#,
        )
        .unwrap();
        assert_eq!(config.service_name, "recon");
    }
}
