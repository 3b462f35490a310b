//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  Spot   │            │  Snapshot   │              │   Clock   │
//! │ Source  │            │   Store     │              │           │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`SpotPriceSource`] - Upstream bullion price provider
//! - [`SpotStore`] - Persisted single-slot spot price snapshot
//! - [`Clock`] - Time source for cache freshness

mod clock;
mod source;
mod store;

pub use clock::{Clock, SystemClock};
pub use source::{SpotPriceSource, SpotQuote};
pub use store::SpotStore;
