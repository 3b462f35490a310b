//! Spot price value object.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{DomainError, Metal};
use super::money::Price;

/// Bullion spot price per troy ounce, as fetched from the upstream source.
///
/// Both prices are strictly positive. A `SpotPrice` is never mutated: the
/// next successful fetch produces a new value that supersedes this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SpotPriceRecord")]
pub struct SpotPrice {
    gold_per_troy_ounce: Price,
    silver_per_troy_ounce: Price,
    fetched_at: DateTime<Utc>,
}

impl SpotPrice {
    /// Create a spot price, rejecting non-positive values.
    pub fn try_new(
        gold_per_troy_ounce: Price,
        silver_per_troy_ounce: Price,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if gold_per_troy_ounce <= Decimal::ZERO {
            return Err(DomainError::NonPositiveSpot {
                metal: Metal::Gold,
                value: gold_per_troy_ounce,
            });
        }
        if silver_per_troy_ounce <= Decimal::ZERO {
            return Err(DomainError::NonPositiveSpot {
                metal: Metal::Silver,
                value: silver_per_troy_ounce,
            });
        }
        Ok(Self {
            gold_per_troy_ounce,
            silver_per_troy_ounce,
            fetched_at,
        })
    }

    #[must_use]
    pub const fn gold_per_troy_ounce(&self) -> Price {
        self.gold_per_troy_ounce
    }

    #[must_use]
    pub const fn silver_per_troy_ounce(&self) -> Price {
        self.silver_per_troy_ounce
    }

    #[must_use]
    pub const fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Age of this price at `now`. A fetch time in the future counts as zero age.
    #[must_use]
    pub fn age_at(&self, now: DateTime<Utc>) -> std::time::Duration {
        now.signed_duration_since(self.fetched_at)
            .to_std()
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct SpotPriceRecord {
    gold_per_troy_ounce: Price,
    silver_per_troy_ounce: Price,
    fetched_at: DateTime<Utc>,
}

impl TryFrom<SpotPriceRecord> for SpotPrice {
    type Error = DomainError;

    fn try_from(record: SpotPriceRecord) -> Result<Self, Self::Error> {
        Self::try_new(
            record.gold_per_troy_ounce,
            record.silver_per_troy_ounce,
            record.fetched_at,
        )
    }
}
