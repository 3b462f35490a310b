//! Goldscout - bullion valuation and deal detection.
//!
//! Turns one live gold/silver spot price into a ladder of reference prices
//! (landed, retail, RTGS, tax-inclusive, for 999 and 22K gold) and values
//! scraped jewellery and coin listings against it.
//!
//! # Architecture
//!
//! - [`domain`] - Pure value types and functions: `SpotPrice`, `derive_ladder`,
//!   `DealEvaluator`, catalog filtering and alert selection
//! - [`port`] - Seams to the outside: spot price source, snapshot store, clock
//! - [`adapter`] - goldprice.org client, JSON snapshot file, product files, CLI
//! - [`application`] - Single-slot cache with coalesced refresh and the
//!   valuation engine
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use goldscout::domain::{derive_ladder, SpotPrice, ValuationConstants};
//! use rust_decimal_macros::dec;
//!
//! let spot = SpotPrice::try_new(dec!(5989.4), dec!(75), Utc::now()).unwrap();
//! let ladder = derive_ladder(&spot, &ValuationConstants::default());
//! assert!(ladder.fine.rtgs_10g < ladder.fine.landed_10g);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
