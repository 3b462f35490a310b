//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file in which every section is optional.
//! `GOLDSCOUT_SOURCE_URL` overrides the spot price endpoint.
//!
//! # Example
//!
//! ```no_run
//! use goldscout::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::cache::CacheConfig;
use super::logging::LoggingConfig;
use super::source::SourceConfig;
use crate::application::RefreshPolicy;
use crate::domain::{AlertCriteria, DealConfig, Purity, ValuationConstants};
use crate::error::{ConfigError, Result};

/// Environment variable overriding `source.url`.
pub const SOURCE_URL_ENV: &str = "GOLDSCOUT_SOURCE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub valuation: ValuationConstants,
    #[serde(default)]
    pub deals: DealConfig,
    #[serde(default)]
    pub alerts: AlertCriteria,
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(url) = std::env::var(SOURCE_URL_ENV) {
            config.source.url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Check that all values are within acceptable ranges.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.source.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "source.url" });
        }
        let url = url::Url::parse(&self.source.url)
            .map_err(|e| invalid("source.url", &e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("source.url", "scheme must be http or https"));
        }
        if self.source.timeout_ms == 0 {
            return Err(invalid("source.timeout_ms", "must be greater than 0"));
        }

        if self.cache.ttl_secs == 0 {
            return Err(invalid("cache.ttl_secs", "must be greater than 0"));
        }

        let valuation = &self.valuation;
        if valuation.ounce_to_gram <= Decimal::ZERO {
            return Err(invalid("valuation.ounce_to_gram", "must be greater than 0"));
        }
        if valuation.landed_multiplier <= Decimal::ZERO {
            return Err(invalid("valuation.landed_multiplier", "must be greater than 0"));
        }
        for (field, value) in [
            ("valuation.retail_spread_10g", valuation.retail_spread_10g),
            ("valuation.rtgs_discount_10g", valuation.rtgs_discount_10g),
            (
                "valuation.jewellery_premium_22k_10g",
                valuation.jewellery_premium_22k_10g,
            ),
        ] {
            if value < Decimal::ZERO {
                return Err(invalid(field, "must be 0 or greater"));
            }
        }
        if valuation.tax_rate < Decimal::ZERO || valuation.tax_rate >= Decimal::ONE {
            return Err(invalid("valuation.tax_rate", "must be in [0, 1)"));
        }
        if valuation.purity_factor_22k <= Decimal::ZERO || valuation.purity_factor_22k > Decimal::ONE
        {
            return Err(invalid("valuation.purity_factor_22k", "must be in (0, 1]"));
        }

        if !self.deals.is_ordered() {
            return Err(invalid(
                "deals",
                "thresholds must be ordered noise < good < great < exceptional",
            ));
        }

        let alerts = &self.alerts;
        if alerts.max_alerts == 0 {
            return Err(invalid("alerts.max_alerts", "must be greater than 0"));
        }
        if alerts.min_weight_grams < Decimal::ZERO {
            return Err(invalid("alerts.min_weight_grams", "must be 0 or greater"));
        }
        if alerts.default_max_price_per_gram <= Decimal::ZERO {
            return Err(invalid(
                "alerts.default_max_price_per_gram",
                "must be greater than 0",
            ));
        }
        for (label, cap) in &alerts.max_price_per_gram {
            label
                .parse::<Purity>()
                .map_err(|e| invalid("alerts.max_price_per_gram", &e.to_string()))?;
            if *cap <= Decimal::ZERO {
                return Err(invalid("alerts.max_price_per_gram", "caps must be greater than 0"));
            }
        }

        Ok(())
    }

    /// Refresh timing derived from the `[source]` and `[cache]` sections.
    #[must_use]
    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy {
            ttl: Duration::from_secs(self.cache.ttl_secs),
            fetch_timeout: Duration::from_millis(self.source.timeout_ms),
            max_stale: Duration::from_secs(self.cache.max_stale_secs),
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
