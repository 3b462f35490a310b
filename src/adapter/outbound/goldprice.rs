//! goldprice.org spot price client.
//!
//! Fetches `dbXRates/<CCY>` and extracts `xauPrice` and `xagPrice` from the
//! first item. Everything else in the response is ignored.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client as HttpClient;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::infrastructure::config::SourceConfig;
use crate::port::{SpotPriceSource, SpotQuote};

const AGENT: &str = concat!("goldscout/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    items: Vec<RateItem>,
}

#[derive(Debug, Deserialize)]
struct RateItem {
    #[serde(rename = "xauPrice")]
    xau_price: Option<Decimal>,
    #[serde(rename = "xagPrice")]
    xag_price: Option<Decimal>,
}

/// Extract the gold and silver prices from a response body.
pub fn parse_rates(body: &[u8]) -> Result<SpotQuote, SourceError> {
    let response: RatesResponse =
        serde_json::from_slice(body).map_err(|_| SourceError::Malformed { field: "items" })?;
    let item = response
        .items
        .into_iter()
        .next()
        .ok_or(SourceError::Malformed { field: "items" })?;

    Ok(SpotQuote {
        gold_per_troy_ounce: item
            .xau_price
            .ok_or(SourceError::Malformed { field: "xauPrice" })?,
        silver_per_troy_ounce: item
            .xag_price
            .ok_or(SourceError::Malformed { field: "xagPrice" })?,
    })
}

/// HTTP client for the goldprice.org rates endpoint.
pub struct GoldPriceClient {
    http: HttpClient,
    url: String,
}

impl GoldPriceClient {
    #[must_use]
    pub fn from_config(config: &SourceConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            url: config.url.clone(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SpotPriceSource for GoldPriceClient {
    async fn fetch(&self) -> Result<SpotQuote, SourceError> {
        debug!(url = %self.url, "Fetching spot price");
        let response = self
            .http
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        parse_rates(&body)
    }

    fn name(&self) -> &str {
        "goldprice.org"
    }
}
