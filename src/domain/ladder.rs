//! Reference price ladder derived from a single spot price.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{round_cents, round_whole, Price};

const TEN: Decimal = Decimal::TEN;

/// 999 fineness price points, per 10 grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FineGoldTier {
    pub spot_10g: Price,
    pub landed_10g: Price,
    pub retail_10g: Price,
    pub rtgs_10g: Price,
    /// RTGS price plus tax.
    pub tax_inclusive_10g: Price,
}

/// 22K price points, per 10 grams.
///
/// There is no RTGS point for 22K: bank settlement only quotes fine gold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Karat22Tier {
    pub spot_10g: Price,
    /// Landed 999 price scaled by the 22K purity factor.
    pub landed_10g: Price,
    /// Landed price plus the jewellery premium.
    pub retail_10g: Price,
    /// Retail price plus tax.
    pub tax_inclusive_10g: Price,
    /// Landed price plus tax, without the jewellery premium. Coin and bar
    /// reference.
    pub coin_tax_inclusive_10g: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilverTier {
    pub per_gram: Price,
    pub per_kg: Price,
}

/// Every reference price derived from one [`SpotPrice`](super::SpotPrice).
///
/// All fields are unrounded. Rounding happens only in [`LadderSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLadder {
    pub gold_per_gram: Price,
    pub fine: FineGoldTier,
    pub karat22: Karat22Tier,
    pub silver: SilverTier,
    pub fetched_at: DateTime<Utc>,
}

impl ReferenceLadder {
    /// Landed 999 price per gram.
    #[must_use]
    pub fn landed_per_gram(&self) -> Price {
        self.fine.landed_10g / TEN
    }

    /// Tax-inclusive 999 price per gram (coin and bar reference).
    #[must_use]
    pub fn fine_tax_inclusive_per_gram(&self) -> Price {
        self.fine.tax_inclusive_10g / TEN
    }

    /// Tax-inclusive 22K price per gram (jewellery reference).
    #[must_use]
    pub fn karat22_tax_inclusive_per_gram(&self) -> Price {
        self.karat22.tax_inclusive_10g / TEN
    }

    /// Tax-inclusive 22K price per gram without making charges (coin and bar
    /// reference).
    #[must_use]
    pub fn karat22_coin_tax_inclusive_per_gram(&self) -> Price {
        self.karat22.coin_tax_inclusive_10g / TEN
    }

    /// Serializable display view with rounded figures.
    #[must_use]
    pub fn snapshot(&self) -> LadderSnapshot {
        LadderSnapshot {
            fetched_at: self.fetched_at,
            spot_price_per_gram: round_cents(self.gold_per_gram),
            gold: GoldSnapshot {
                spot_10g: round_cents(self.fine.spot_10g),
                landed_10g: round_cents(self.fine.landed_10g),
                retail_999_10g: round_cents(self.fine.retail_10g),
                rtgs_999_10g: round_cents(self.fine.rtgs_10g),
                tax_inclusive_999_10g: round_cents(self.fine.tax_inclusive_10g),
                landed_22k_10g: round_cents(self.karat22.landed_10g),
                retail_22k_10g: round_cents(self.karat22.retail_10g),
                tax_inclusive_22k_10g: round_cents(self.karat22.tax_inclusive_10g),
                tax_inclusive_22k_coin_10g: round_cents(self.karat22.coin_tax_inclusive_10g),
                per_gram: PerGramSnapshot {
                    spot_999: round_whole(self.fine.spot_10g / TEN),
                    landed_999: round_whole(self.fine.landed_10g / TEN),
                    retail_999: round_whole(self.fine.retail_10g / TEN),
                    rtgs_999: round_whole(self.fine.rtgs_10g / TEN),
                    tax_inclusive_999: round_whole(self.fine.tax_inclusive_10g / TEN),
                    spot_22k: round_whole(self.karat22.spot_10g / TEN),
                    landed_22k: round_whole(self.karat22.landed_10g / TEN),
                    retail_22k: round_whole(self.karat22.retail_10g / TEN),
                    tax_inclusive_22k: round_whole(self.karat22.tax_inclusive_10g / TEN),
                    tax_inclusive_22k_coin: round_whole(
                        self.karat22.coin_tax_inclusive_10g / TEN,
                    ),
                },
            },
            silver: SilverSnapshot {
                per_gram: round_cents(self.silver.per_gram),
                per_kg: round_cents(self.silver.per_kg),
            },
        }
    }
}

/// Display view of a ladder, handed to presentation and alerting consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LadderSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub spot_price_per_gram: Price,
    pub gold: GoldSnapshot,
    pub silver: SilverSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldSnapshot {
    pub spot_10g: Price,
    pub landed_10g: Price,
    pub retail_999_10g: Price,
    pub rtgs_999_10g: Price,
    pub tax_inclusive_999_10g: Price,
    pub landed_22k_10g: Price,
    pub retail_22k_10g: Price,
    pub tax_inclusive_22k_10g: Price,
    pub tax_inclusive_22k_coin_10g: Price,
    pub per_gram: PerGramSnapshot,
}

/// Per-gram figures, rounded to whole currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerGramSnapshot {
    pub spot_999: Price,
    pub landed_999: Price,
    pub retail_999: Price,
    pub rtgs_999: Price,
    pub tax_inclusive_999: Price,
    pub spot_22k: Price,
    pub landed_22k: Price,
    pub retail_22k: Price,
    pub tax_inclusive_22k: Price,
    pub tax_inclusive_22k_coin: Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilverSnapshot {
    pub per_gram: Price,
    pub per_kg: Price,
}
