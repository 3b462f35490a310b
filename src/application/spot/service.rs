//! Demand-driven spot price refresh.
//!
//! [`SpotPriceService`] owns the cache and is the only writer to it. Callers
//! that miss the cache while a fetch is in flight wait for that fetch instead
//! of issuing their own. Every fetch is bounded by a timeout, and a failed
//! fetch never clears the held value.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::cache::{CacheLookup, SpotPriceCache, DEFAULT_TTL};
use crate::domain::SpotPrice;
use crate::error::{Result, SourceError};
use crate::port::{Clock, SpotPriceSource, SpotStore, SystemClock};

/// Timing knobs for the refresh path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    /// How long a fetched price is served without refreshing.
    pub ttl: Duration,
    /// Upper bound on a single upstream fetch.
    pub fetch_timeout: Duration,
    /// Oldest value served as stale when a refresh fails.
    pub max_stale: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            fetch_timeout: Duration::from_secs(10),
            max_stale: Duration::from_secs(3600),
        }
    }
}

/// How current a served spot price is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Freshness {
    Fresh,
    /// Refresh failed and the last good value was served instead.
    Stale { age_secs: u64 },
}

impl Freshness {
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }
}

/// A spot price together with its freshness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotReading {
    pub spot: Arc<SpotPrice>,
    pub freshness: Freshness,
}

impl SpotReading {
    fn fresh(spot: Arc<SpotPrice>) -> Self {
        Self {
            spot,
            freshness: Freshness::Fresh,
        }
    }

    fn stale(spot: Arc<SpotPrice>, age: Duration) -> Self {
        Self {
            spot,
            freshness: Freshness::Stale {
                age_secs: age.as_secs(),
            },
        }
    }
}

/// Owns the single spot price slot and coordinates refreshes.
pub struct SpotPriceService {
    source: Arc<dyn SpotPriceSource>,
    clock: Arc<dyn Clock>,
    store: Option<Arc<dyn SpotStore>>,
    cache: SpotPriceCache,
    policy: RefreshPolicy,
    /// Held for the duration of one upstream fetch.
    refresh_lock: Mutex<()>,
    /// Completed fetch attempts, successful or not.
    attempts: AtomicU64,
    last_error: RwLock<Option<String>>,
}

impl SpotPriceService {
    #[must_use]
    pub fn new(source: Arc<dyn SpotPriceSource>, policy: RefreshPolicy) -> Self {
        Self {
            source,
            clock: Arc::new(SystemClock),
            store: None,
            cache: SpotPriceCache::new(policy.ttl),
            policy,
            refresh_lock: Mutex::new(()),
            attempts: AtomicU64::new(0),
            last_error: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Persist every successful fetch to `store` and seed the slot from it.
    ///
    /// An unreadable snapshot is logged and ignored.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn SpotStore>) -> Self {
        match store.load() {
            Ok(Some(spot)) => {
                info!(
                    gold = %spot.gold_per_troy_ounce(),
                    fetched_at = %spot.fetched_at(),
                    "Seeded spot price from snapshot"
                );
                self.cache.put(spot);
            }
            Ok(None) => debug!("No spot price snapshot"),
            Err(e) => warn!(error = %e, "Ignoring unreadable spot price snapshot"),
        }
        self.store = Some(store);
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &RefreshPolicy {
        &self.policy
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// The held value without triggering a refresh.
    #[must_use]
    pub fn peek(&self) -> Option<Arc<SpotPrice>> {
        self.cache.current()
    }

    /// Current spot price, refreshing on demand.
    ///
    /// Within the TTL this never touches the source. After expiry exactly one
    /// caller fetches; concurrent callers wait and share its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unavailable`] when the refresh fails and no
    /// value young enough to serve as stale is held.
    pub async fn current(&self) -> Result<SpotReading> {
        if let CacheLookup::Fresh(spot) = self.cache.lookup(self.clock.now()) {
            return Ok(SpotReading::fresh(spot));
        }

        let seen = self.attempts.load(Ordering::Acquire);
        let _guard = self.refresh_lock.lock().await;

        let now = self.clock.now();
        let lookup = self.cache.lookup(now);
        if let CacheLookup::Fresh(spot) = lookup {
            return Ok(SpotReading::fresh(spot));
        }
        if self.attempts.load(Ordering::Acquire) != seen {
            // An attempt finished while we waited and it did not succeed.
            let reason = self
                .last_error
                .read()
                .clone()
                .unwrap_or_else(|| "refresh failed".to_string());
            return self.stale_or_unavailable(&lookup, now, reason);
        }

        self.refresh_locked().await
    }

    /// Fetch now regardless of the TTL.
    ///
    /// For an external scheduler that refreshes on a fixed cadence.
    ///
    /// # Errors
    ///
    /// Same as [`current`](Self::current).
    pub async fn refresh(&self) -> Result<SpotReading> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> Result<SpotReading> {
        let started = Instant::now();
        let fetched = match tokio::time::timeout(self.policy.fetch_timeout, self.source.fetch()).await
        {
            Ok(Ok(quote)) => SpotPrice::try_new(
                quote.gold_per_troy_ounce,
                quote.silver_per_troy_ounce,
                self.clock.now(),
            )
            .map_err(|e| SourceError::Unavailable {
                reason: e.to_string(),
            }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(SourceError::Timeout {
                after_ms: u64::try_from(self.policy.fetch_timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let result = match fetched {
            Ok(spot) => {
                info!(
                    source = self.source.name(),
                    gold = %spot.gold_per_troy_ounce(),
                    silver = %spot.silver_per_troy_ounce(),
                    elapsed_ms,
                    "Spot price refreshed"
                );
                if let Some(store) = &self.store {
                    if let Err(e) = store.save(&spot) {
                        warn!(error = %e, "Failed to persist spot price snapshot");
                    }
                }
                *self.last_error.write() = None;
                Ok(SpotReading::fresh(self.cache.put(spot)))
            }
            Err(e) => {
                warn!(source = self.source.name(), error = %e, elapsed_ms, "Spot price refresh failed");
                let reason = match e {
                    SourceError::Unavailable { reason } => reason,
                    other => other.to_string(),
                };
                *self.last_error.write() = Some(reason.clone());
                let now = self.clock.now();
                self.stale_or_unavailable(&self.cache.lookup(now), now, reason)
            }
        };

        self.attempts.fetch_add(1, Ordering::Release);
        result
    }

    fn stale_or_unavailable(
        &self,
        lookup: &CacheLookup,
        now: chrono::DateTime<chrono::Utc>,
        reason: String,
    ) -> Result<SpotReading> {
        if let Some(spot) = lookup.spot() {
            let age = spot.age_at(now);
            if age <= self.policy.max_stale {
                warn!(age_secs = age.as_secs(), "Serving stale spot price");
                return Ok(SpotReading::stale(Arc::clone(spot), age));
            }
            warn!(
                age_secs = age.as_secs(),
                max_stale_secs = self.policy.max_stale.as_secs(),
                "Cached spot price too old to serve"
            );
        }
        Err(SourceError::Unavailable { reason }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::clock::ManualClock;
    use crate::testkit::source::StubSpotSource;
    use rust_decimal_macros::dec;

    fn service(source: Arc<StubSpotSource>, clock: Arc<ManualClock>) -> SpotPriceService {
        SpotPriceService::new(source, RefreshPolicy::default()).with_clock(clock)
    }

    #[tokio::test]
    async fn first_call_fetches_and_caches() {
        let source = Arc::new(StubSpotSource::new(dec!(5989.4), dec!(75)));
        let clock = Arc::new(ManualClock::default());
        let service = service(Arc::clone(&source), Arc::clone(&clock));

        let reading = service.current().await.unwrap();
        assert_eq!(reading.freshness, Freshness::Fresh);
        assert_eq!(reading.spot.gold_per_troy_ounce(), dec!(5989.4));
        assert_eq!(reading.spot.fetched_at(), clock.now());

        service.current().await.unwrap();
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn non_positive_quote_is_unavailable() {
        let source = Arc::new(StubSpotSource::new(dec!(0), dec!(75)));
        let service = service(source, Arc::new(ManualClock::default()));

        let err = service.current().await.unwrap_err();
        assert!(err.is_source_unavailable());
        assert!(service.peek().is_none());
    }

    #[tokio::test]
    async fn refresh_ignores_ttl() {
        let source = Arc::new(StubSpotSource::new(dec!(5989.4), dec!(75)));
        let service = service(Arc::clone(&source), Arc::new(ManualClock::default()));

        service.current().await.unwrap();
        source.set_quote(dec!(6000), dec!(76));
        let reading = service.refresh().await.unwrap();

        assert_eq!(source.calls(), 2);
        assert_eq!(reading.spot.gold_per_troy_ounce(), dec!(6000));
    }

    #[tokio::test]
    async fn stale_beyond_bound_is_unavailable() {
        let source = Arc::new(StubSpotSource::new(dec!(5989.4), dec!(75)));
        let clock = Arc::new(ManualClock::default());
        let service = service(Arc::clone(&source), Arc::clone(&clock));

        service.current().await.unwrap();
        source.fail_with("upstream down");
        clock.advance(chrono::Duration::seconds(3601));

        assert!(service.current().await.unwrap_err().is_source_unavailable());
        assert!(service.peek().is_some());
    }
}
