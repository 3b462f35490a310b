//! Spot price caching and refresh coordination.

pub mod cache;
pub mod service;

pub use cache::{CacheLookup, SpotPriceCache, DEFAULT_TTL};
pub use service::{Freshness, RefreshPolicy, SpotPriceService, SpotReading};
