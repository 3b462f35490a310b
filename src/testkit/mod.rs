//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`]: `StubSpotSource`, a scripted [`SpotPriceSource`](crate::port::SpotPriceSource)
//!   that counts invocations.
//! - [`clock`]: `ManualClock`, a [`Clock`](crate::port::Clock) advanced by hand.
//! - [`domain`]: Builders for products and evaluated products.

pub mod clock;
pub mod domain;
pub mod source;
