//! Spot price source port.
//!
//! The engine only needs two numbers from the upstream provider: gold and
//! silver per troy ounce in the configured currency. Transport, provider
//! failover and response format belong to the adapter.

use async_trait::async_trait;

use crate::domain::Price;
use crate::error::SourceError;

/// Raw per-troy-ounce prices as reported upstream.
///
/// Unvalidated: the service turns a quote into a
/// [`SpotPrice`](crate::domain::SpotPrice), which rejects non-positive values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotQuote {
    pub gold_per_troy_ounce: Price,
    pub silver_per_troy_ounce: Price,
}

/// Upstream bullion price provider.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - The caller bounds every call with a timeout; implementations need not
#[async_trait]
pub trait SpotPriceSource: Send + Sync {
    /// Fetch the current quote.
    async fn fetch(&self) -> Result<SpotQuote, SourceError>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}
