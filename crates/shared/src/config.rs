//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Settlement policy defaults.
    #[serde(default)]
    pub settlement: SettlementConfig,
    /// Cash drawer configuration.
    #[serde(default)]
    pub cash: CashConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settlement policy defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// Flat VAT rate applied to net order totals (0.10 = 10%).
    #[serde(default = "default_vat_rate")]
    pub vat_rate: Decimal,
}

fn default_vat_rate() -> Decimal {
    Decimal::new(10, 2)
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            vat_rate: default_vat_rate(),
        }
    }
}

/// Cash drawer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CashConfig {
    /// Face values accepted in a drawer count, largest first.
    #[serde(default = "default_denominations")]
    pub denominations: Vec<u32>,
}

fn default_denominations() -> Vec<u32> {
    vec![20_000, 10_000, 5_000, 1_000, 500, 100, 50, 20, 10, 5, 1]
}

impl Default for CashConfig {
    fn default() -> Self {
        Self {
            denominations: default_denominations(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "shinedesk=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `SHINEDESK__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SHINEDESK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.settlement.vat_rate, dec!(0.10));
        assert_eq!(config.cash.denominations.first(), Some(&20_000));
        assert_eq!(config.cash.denominations.last(), Some(&1));
        assert_eq!(config.logging.filter, "shinedesk=info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        temp_env::with_vars_unset(
            ["SHINEDESK__SETTLEMENT__VAT_RATE", "SHINEDESK__LOGGING__FILTER"],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.settlement.vat_rate, dec!(0.10));
            },
        );
    }

    #[test]
    fn test_load_env_override() {
        temp_env::with_vars(
            [
                ("SHINEDESK__SETTLEMENT__VAT_RATE", Some("0.05")),
                ("SHINEDESK__LOGGING__FILTER", Some("shinedesk=debug")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.settlement.vat_rate, dec!(0.05));
                assert_eq!(config.logging.filter, "shinedesk=debug");
            },
        );
    }
}
