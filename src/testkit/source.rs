//! Scripted spot price source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::Price;
use crate::error::SourceError;
use crate::port::{SpotPriceSource, SpotQuote};

/// A [`SpotPriceSource`] returning a configurable quote or failure.
///
/// Every `fetch` is counted, including failed and timed-out ones, so tests
/// can assert how often the upstream would have been hit.
#[derive(Debug)]
pub struct StubSpotSource {
    response: Mutex<Result<SpotQuote, String>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl StubSpotSource {
    pub fn new(gold_per_troy_ounce: Price, silver_per_troy_ounce: Price) -> Self {
        Self {
            response: Mutex::new(Ok(SpotQuote {
                gold_per_troy_ounce,
                silver_per_troy_ounce,
            })),
            delay: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleep this long inside every fetch.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock() = Some(delay);
        self
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock() = delay;
    }

    pub fn set_quote(&self, gold_per_troy_ounce: Price, silver_per_troy_ounce: Price) {
        *self.response.lock() = Ok(SpotQuote {
            gold_per_troy_ounce,
            silver_per_troy_ounce,
        });
    }

    /// Make every subsequent fetch fail as unavailable.
    pub fn fail_with(&self, reason: &str) {
        *self.response.lock() = Err(reason.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpotPriceSource for StubSpotSource {
    async fn fetch(&self) -> Result<SpotQuote, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.response
            .lock()
            .clone()
            .map_err(|reason| SourceError::Unavailable { reason })
    }

    fn name(&self) -> &str {
        "stub"
    }
}
