//! Spot price to reference ladder derivation.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::ladder::{FineGoldTier, Karat22Tier, ReferenceLadder, SilverTier};
use super::money::Price;
use super::spot::SpotPrice;

/// Constants driving the ladder derivation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValuationConstants {
    /// Grams per troy ounce
    #[serde(default = "default_ounce_to_gram")]
    pub ounce_to_gram: Decimal,

    /// Import duty and logistics over raw spot
    #[serde(default = "default_landed_multiplier")]
    pub landed_multiplier: Decimal,

    /// Retail markup above landed cost, per 10g
    #[serde(default = "default_retail_spread")]
    pub retail_spread_10g: Price,

    /// Bulk settlement discount below landed cost, per 10g
    #[serde(default = "default_rtgs_discount")]
    pub rtgs_discount_10g: Price,

    /// Making-charge proxy for 22K jewellery, per 10g
    #[serde(default = "default_jewellery_premium")]
    pub jewellery_premium_22k_10g: Price,

    /// Tax rate as a fraction (0.03 = 3%)
    #[serde(default = "default_tax_rate")]
    pub tax_rate: Decimal,

    /// 22K fineness factor (22/24)
    #[serde(default = "default_purity_factor_22k")]
    pub purity_factor_22k: Decimal,
}

fn default_ounce_to_gram() -> Decimal {
    Decimal::new(311_035, 4) // 31.1035
}

fn default_landed_multiplier() -> Decimal {
    Decimal::new(111, 2) // 1.11
}

fn default_retail_spread() -> Decimal {
    Decimal::new(700, 0)
}

fn default_rtgs_discount() -> Decimal {
    Decimal::new(600, 0)
}

fn default_jewellery_premium() -> Decimal {
    Decimal::new(1200, 0)
}

fn default_tax_rate() -> Decimal {
    Decimal::new(3, 2) // 0.03
}

fn default_purity_factor_22k() -> Decimal {
    Decimal::new(9167, 4) // 0.9167
}

impl Default for ValuationConstants {
    fn default() -> Self {
        Self {
            ounce_to_gram: default_ounce_to_gram(),
            landed_multiplier: default_landed_multiplier(),
            retail_spread_10g: default_retail_spread(),
            rtgs_discount_10g: default_rtgs_discount(),
            jewellery_premium_22k_10g: default_jewellery_premium(),
            tax_rate: default_tax_rate(),
            purity_factor_22k: default_purity_factor_22k(),
        }
    }
}

/// Derive the full reference ladder from one spot price.
///
/// Pure: the same spot price and constants always yield the same ladder.
/// `SpotPrice` guarantees positive inputs, so the result is never negative
/// at the spot and landed points.
#[must_use]
pub fn derive_ladder(spot: &SpotPrice, constants: &ValuationConstants) -> ReferenceLadder {
    let gold_per_gram = spot.gold_per_troy_ounce() / constants.ounce_to_gram;
    let spot_10g = gold_per_gram * Decimal::TEN;
    let landed_10g = spot_10g * constants.landed_multiplier;
    let tax_factor = Decimal::ONE + constants.tax_rate;

    let rtgs_10g = landed_10g - constants.rtgs_discount_10g;
    let fine = FineGoldTier {
        spot_10g,
        landed_10g,
        retail_10g: landed_10g + constants.retail_spread_10g,
        rtgs_10g,
        tax_inclusive_10g: rtgs_10g * tax_factor,
    };

    let landed_22k_10g = landed_10g * constants.purity_factor_22k;
    let retail_22k_10g = landed_22k_10g + constants.jewellery_premium_22k_10g;
    let karat22 = Karat22Tier {
        spot_10g: spot_10g * constants.purity_factor_22k,
        landed_10g: landed_22k_10g,
        retail_10g: retail_22k_10g,
        tax_inclusive_10g: retail_22k_10g * tax_factor,
        coin_tax_inclusive_10g: landed_22k_10g * tax_factor,
    };

    let silver_per_gram = spot.silver_per_troy_ounce() / constants.ounce_to_gram;
    let silver = SilverTier {
        per_gram: silver_per_gram,
        per_kg: silver_per_gram * Decimal::ONE_THOUSAND,
    };

    ReferenceLadder {
        gold_per_gram,
        fine,
        karat22,
        silver,
        fetched_at: spot.fetched_at(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn spot(gold: Decimal, silver: Decimal) -> SpotPrice {
        SpotPrice::try_new(gold, silver, Utc::now()).unwrap()
    }

    #[test]
    fn worked_example_matches_reference_figures() {
        let ladder = derive_ladder(&spot(dec!(5989.4), dec!(75)), &ValuationConstants::default());

        assert_eq!(ladder.gold_per_gram.round_dp(2), dec!(192.56));
        assert_eq!(ladder.fine.spot_10g.round_dp(1), dec!(1925.6));
        assert_eq!(ladder.fine.landed_10g.round_dp(1), dec!(2137.5));
        assert_eq!(ladder.fine.retail_10g.round_dp(1), dec!(2837.5));
        assert_eq!(ladder.fine.rtgs_10g.round_dp(1), dec!(1537.5));
        assert_eq!(ladder.fine.tax_inclusive_10g.round_dp(1), dec!(1583.6));
    }

    #[test]
    fn karat22_tier_applies_purity_then_premium_then_tax() {
        let constants = ValuationConstants::default();
        let ladder = derive_ladder(&spot(dec!(5989.4), dec!(75)), &constants);

        let expected_base = ladder.fine.landed_10g * dec!(0.9167);
        assert_eq!(ladder.karat22.landed_10g, expected_base);
        assert_eq!(ladder.karat22.retail_10g, expected_base + dec!(1200));
        assert_eq!(
            ladder.karat22.tax_inclusive_10g,
            (expected_base + dec!(1200)) * dec!(1.03)
        );
        assert_eq!(ladder.karat22.coin_tax_inclusive_10g, expected_base * dec!(1.03));
    }

    #[test]
    fn silver_ladder_is_per_gram_and_per_kg() {
        let ladder = derive_ladder(&spot(dec!(5989.4), dec!(311.035)), &ValuationConstants::default());
        assert_eq!(ladder.silver.per_gram, dec!(10));
        assert_eq!(ladder.silver.per_kg, dec!(10000));
    }

    #[test]
    fn constants_default_to_documented_values() {
        let c = ValuationConstants::default();
        assert_eq!(c.ounce_to_gram, dec!(31.1035));
        assert_eq!(c.landed_multiplier, dec!(1.11));
        assert_eq!(c.retail_spread_10g, dec!(700));
        assert_eq!(c.rtgs_discount_10g, dec!(600));
        assert_eq!(c.jewellery_premium_22k_10g, dec!(1200));
        assert_eq!(c.tax_rate, dec!(0.03));
        assert_eq!(c.purity_factor_22k, dec!(0.9167));
    }

    #[test]
    fn snapshot_rounds_per_gram_to_whole_units() {
        let ladder = derive_ladder(&spot(dec!(5989.4), dec!(75)), &ValuationConstants::default());
        let snapshot = ladder.snapshot();
        assert_eq!(snapshot.gold.per_gram.spot_999, dec!(193));
        assert_eq!(snapshot.gold.per_gram.tax_inclusive_999, dec!(158));
        assert_eq!(snapshot.gold.tax_inclusive_999_10g, dec!(1583.58));
    }
}
