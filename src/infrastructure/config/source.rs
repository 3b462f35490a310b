//! Spot price source configuration.

use serde::Deserialize;

pub const DEFAULT_SOURCE_URL: &str = "https://data-asg.goldprice.org/dbXRates/INR";

/// Upstream rates endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    /// Bound on a single fetch, in milliseconds.
    pub timeout_ms: u64,
    /// Currency the endpoint quotes in. Informational only.
    pub currency: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_ms: 10_000,
            currency: "INR".to_string(),
        }
    }
}
