//! Single-slot spot price cache.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::SpotPrice;

/// Default freshness window.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Result of looking up the slot at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// Held value is younger than the TTL.
    Fresh(Arc<SpotPrice>),
    /// Held value is past due; callers must refresh.
    Expired(Arc<SpotPrice>),
    Empty,
}

impl CacheLookup {
    /// The held value regardless of freshness.
    #[must_use]
    pub fn spot(&self) -> Option<&Arc<SpotPrice>> {
        match self {
            Self::Fresh(spot) | Self::Expired(spot) => Some(spot),
            Self::Empty => None,
        }
    }
}

/// Holds at most one [`SpotPrice`].
///
/// Readers get an `Arc` to an immutable value. `put` swaps the whole slot
/// under the write lock, so no reader can observe a partially replaced price.
pub struct SpotPriceCache {
    slot: RwLock<Option<Arc<SpotPrice>>>,
    ttl: Duration,
}

impl SpotPriceCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Classify the held value at `now`. Fresh iff `now - fetched_at < ttl`.
    #[must_use]
    pub fn lookup(&self, now: DateTime<Utc>) -> CacheLookup {
        match self.slot.read().as_ref() {
            Some(spot) if spot.age_at(now) < self.ttl => CacheLookup::Fresh(Arc::clone(spot)),
            Some(spot) => CacheLookup::Expired(Arc::clone(spot)),
            None => CacheLookup::Empty,
        }
    }

    /// Replace the slot and return the shared handle to the new value.
    pub fn put(&self, spot: SpotPrice) -> Arc<SpotPrice> {
        let spot = Arc::new(spot);
        *self.slot.write() = Some(Arc::clone(&spot));
        spot
    }

    /// The held value regardless of freshness.
    #[must_use]
    pub fn current(&self) -> Option<Arc<SpotPrice>> {
        self.slot.read().clone()
    }
}

impl Default for SpotPriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn spot_at(at: DateTime<Utc>) -> SpotPrice {
        SpotPrice::try_new(dec!(5989.4), dec!(75), at).unwrap()
    }

    #[test]
    fn empty_until_first_put() {
        let cache = SpotPriceCache::default();
        assert_eq!(cache.lookup(Utc::now()), CacheLookup::Empty);
        assert!(cache.current().is_none());
    }

    #[test]
    fn fresh_strictly_inside_ttl() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let cache = SpotPriceCache::new(Duration::from_secs(60));
        cache.put(spot_at(t0));

        assert!(matches!(
            cache.lookup(t0 + chrono::Duration::seconds(59)),
            CacheLookup::Fresh(_)
        ));
        assert!(matches!(
            cache.lookup(t0 + chrono::Duration::seconds(60)),
            CacheLookup::Expired(_)
        ));
    }

    #[test]
    fn put_replaces_whole_value() {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let cache = SpotPriceCache::default();
        let first = cache.put(spot_at(t0));
        let second = cache.put(SpotPrice::try_new(dec!(6000), dec!(80), t0).unwrap());

        assert_eq!(first.gold_per_troy_ounce(), dec!(5989.4));
        let held = cache.current().unwrap();
        assert!(Arc::ptr_eq(&held, &second));
        assert_eq!(held.silver_per_troy_ounce(), dec!(80));
    }
}
