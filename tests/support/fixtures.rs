//! Shared construction helpers for integration tests.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use goldscout::application::{RefreshPolicy, SpotPriceService};
use goldscout::domain::{derive_ladder, Price, ReferenceLadder, SpotPrice, ValuationConstants};
use goldscout::testkit::clock::ManualClock;
use goldscout::testkit::source::StubSpotSource;
use rust_decimal_macros::dec;
use tempfile::TempDir;

pub const GOLD: Price = dec!(5989.4);
pub const SILVER: Price = dec!(75);

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

pub fn spot(gold: Price, silver: Price) -> SpotPrice {
    SpotPrice::try_new(gold, silver, t0()).unwrap()
}

/// Ladder for the worked example spot price with default constants.
pub fn worked_ladder() -> ReferenceLadder {
    derive_ladder(&spot(GOLD, SILVER), &ValuationConstants::default())
}

/// A 60s TTL policy with a short fetch timeout and a one hour stale bound.
pub fn policy(fetch_timeout: Duration) -> RefreshPolicy {
    RefreshPolicy {
        ttl: Duration::from_secs(60),
        fetch_timeout,
        max_stale: Duration::from_secs(3600),
    }
}

/// Service over a stub source and a manual clock starting at [`t0`].
pub fn service(
    source: &Arc<StubSpotSource>,
    fetch_timeout: Duration,
) -> (SpotPriceService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(t0()));
    let service = SpotPriceService::new(source.clone(), policy(fetch_timeout))
        .with_clock(clock.clone());
    (service, clock)
}

/// Write `contents` to `name` inside a fresh temp directory.
pub fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp file");
    (dir, path)
}
