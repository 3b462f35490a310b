//! Application services (use cases).
//!
//! These services own the long-lived spot price state and coordinate the
//! ports with the pure domain logic.

pub mod engine;
pub mod spot;

pub use engine::{ScanOutcome, ScanReport, ValuationEngine};
pub use spot::{Freshness, RefreshPolicy, SpotPriceService, SpotReading};
