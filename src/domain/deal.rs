//! Deal evaluation: fair price, discount and tier for a single product.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{DomainError, InvalidProductReason};
use super::ladder::ReferenceLadder;
use super::money::Price;
use super::product::{Product, ProductId, ProductType};
use super::purity::Purity;

/// Discretised classification of a listing's discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DealTier {
    NotADeal,
    Marginal,
    Good,
    Great,
    Exceptional,
}

impl DealTier {
    /// All tiers, worst first.
    pub const ALL: [Self; 5] = [
        Self::NotADeal,
        Self::Marginal,
        Self::Good,
        Self::Great,
        Self::Exceptional,
    ];

    /// True for tiers worth alerting on.
    #[must_use]
    pub const fn is_deal(&self) -> bool {
        !matches!(self, Self::NotADeal)
    }
}

impl fmt::Display for DealTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotADeal => "not-a-deal",
            Self::Marginal => "marginal",
            Self::Good => "good",
            Self::Great => "great",
            Self::Exceptional => "exceptional",
        };
        f.write_str(label)
    }
}

/// How to value purities that have no dedicated ladder tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtherKaratPolicy {
    /// `karat / 24` applied to the landed 999 price.
    #[default]
    Linear,
    /// Refuse to value them.
    Reject,
}

/// Tier boundaries, in discount percent. Each boundary is the inclusive
/// lower edge of the next tier up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DealConfig {
    /// Lower edge of `marginal`
    #[serde(default = "default_noise")]
    pub noise: Decimal,

    /// Lower edge of `good`
    #[serde(default = "default_good")]
    pub good: Decimal,

    /// Lower edge of `great`
    #[serde(default = "default_great")]
    pub great: Decimal,

    /// Lower edge of `exceptional`
    #[serde(default = "default_exceptional")]
    pub exceptional: Decimal,

    #[serde(default)]
    pub other_karat: OtherKaratPolicy,
}

fn default_noise() -> Decimal {
    Decimal::new(-3, 0)
}

fn default_good() -> Decimal {
    Decimal::new(5, 0)
}

fn default_great() -> Decimal {
    Decimal::new(10, 0)
}

fn default_exceptional() -> Decimal {
    Decimal::new(20, 0)
}

impl Default for DealConfig {
    fn default() -> Self {
        Self {
            noise: default_noise(),
            good: default_good(),
            great: default_great(),
            exceptional: default_exceptional(),
            other_karat: OtherKaratPolicy::default(),
        }
    }
}

impl DealConfig {
    /// Classify a discount percentage. Monotone in `discount`.
    #[must_use]
    pub fn classify(&self, discount: Decimal) -> DealTier {
        if discount >= self.exceptional {
            DealTier::Exceptional
        } else if discount >= self.great {
            DealTier::Great
        } else if discount >= self.good {
            DealTier::Good
        } else if discount >= self.noise {
            DealTier::Marginal
        } else {
            DealTier::NotADeal
        }
    }

    /// True when boundaries strictly increase.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.noise < self.good && self.good < self.great && self.great < self.exceptional
    }
}

/// A product together with its computed valuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub fair_price: Price,
    /// Positive when the listing is cheaper than fair value.
    pub discount_percent: Decimal,
    pub price_per_gram: Price,
    pub reference_per_gram: Price,
    pub deal_tier: DealTier,
}

impl EvaluatedProduct {
    #[must_use]
    pub fn id(&self) -> ProductId {
        self.product.id()
    }
}

/// A product that could not be valued, kept for manual review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedProduct {
    pub product: Product,
    #[serde(rename = "reason", serialize_with = "serialize_display")]
    pub error: DomainError,
}

fn serialize_display<S: serde::Serializer>(
    value: &DomainError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Outcome of valuing a batch against one ladder.
#[derive(Debug, Clone, Default)]
pub struct BatchEvaluation {
    pub evaluated: Vec<EvaluatedProduct>,
    pub rejected: Vec<RejectedProduct>,
}

/// Compares listings against a reference ladder.
#[derive(Debug, Clone, Default)]
pub struct DealEvaluator {
    config: DealConfig,
}

impl DealEvaluator {
    #[must_use]
    pub const fn new(config: DealConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &DealConfig {
        &self.config
    }

    /// Reference price per gram for a purity and product type.
    ///
    /// | purity | coin / bar | jewellery |
    /// |---|---|---|
    /// | 999 | tax-inclusive RTGS | tax-inclusive RTGS |
    /// | 22K | landed 22K plus tax | tax-inclusive 22K retail |
    /// | other | [`OtherKaratPolicy`] | [`OtherKaratPolicy`] |
    ///
    /// Only 22K jewellery carries the making-charge premium. `purity` is
    /// normalised first, so a directly built `Karat(22)` values as 22K.
    pub fn reference_per_gram(
        &self,
        purity: Purity,
        product_type: ProductType,
        ladder: &ReferenceLadder,
    ) -> Result<Price, InvalidProductReason> {
        let canonical = purity
            .canonical()
            .map_err(|_| InvalidProductReason::UnsupportedPurity(purity))?;
        match (canonical, product_type) {
            (Purity::Fine999, _) => Ok(ladder.fine_tax_inclusive_per_gram()),
            (Purity::Karat22, ProductType::Jewellery) => {
                Ok(ladder.karat22_tax_inclusive_per_gram())
            }
            (Purity::Karat22, ProductType::Coin) => {
                Ok(ladder.karat22_coin_tax_inclusive_per_gram())
            }
            (Purity::Karat(_), _) => match self.config.other_karat {
                OtherKaratPolicy::Linear => {
                    Ok(ladder.landed_per_gram() * canonical.linear_factor())
                }
                OtherKaratPolicy::Reject => Err(InvalidProductReason::UnsupportedPurity(purity)),
            },
        }
    }

    /// Value a single product.
    pub fn evaluate(
        &self,
        product: &Product,
        ladder: &ReferenceLadder,
    ) -> Result<EvaluatedProduct, DomainError> {
        let invalid = |reason| DomainError::InvalidProduct {
            product: product.id().to_string(),
            reason,
        };

        if product.weight_grams <= Decimal::ZERO {
            return Err(invalid(InvalidProductReason::NonPositiveWeight(
                product.weight_grams,
            )));
        }
        if product.selling_price < Decimal::ZERO {
            return Err(invalid(InvalidProductReason::NegativeSellingPrice(
                product.selling_price,
            )));
        }

        let reference_per_gram = self
            .reference_per_gram(product.purity, product.product_type, ladder)
            .map_err(invalid)?;
        let fair_price = reference_per_gram * product.weight_grams;
        if fair_price <= Decimal::ZERO {
            return Err(invalid(InvalidProductReason::ZeroFairPrice));
        }

        let discount_percent =
            (fair_price - product.selling_price) / fair_price * Decimal::ONE_HUNDRED;

        Ok(EvaluatedProduct {
            product: product.clone(),
            fair_price,
            discount_percent,
            price_per_gram: product.selling_price / product.weight_grams,
            reference_per_gram,
            deal_tier: self.config.classify(discount_percent),
        })
    }

    /// Value every product. A bad product is rejected on its own and never
    /// aborts the batch.
    pub fn evaluate_batch<'a, I>(&self, products: I, ladder: &ReferenceLadder) -> BatchEvaluation
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let mut batch = BatchEvaluation::default();
        for product in products {
            match self.evaluate(product, ladder) {
                Ok(evaluated) => batch.evaluated.push(evaluated),
                Err(error) => batch.rejected.push(RejectedProduct {
                    product: product.clone(),
                    error,
                }),
            }
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::valuation::{derive_ladder, ValuationConstants};
    use crate::domain::SpotPrice;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn ladder() -> ReferenceLadder {
        let spot = SpotPrice::try_new(dec!(5989.4), dec!(75), Utc::now()).unwrap();
        derive_ladder(&spot, &ValuationConstants::default())
    }

    fn product(weight: Decimal, purity: Purity, price: Decimal) -> Product {
        Product {
            title: "Test coin".into(),
            source: "AJIO".into(),
            brand: "Test".into(),
            weight_grams: weight,
            purity,
            product_type: ProductType::Coin,
            selling_price: price,
            url: "https://example.com/p".into(),
            available: true,
            scanned_at: Utc::now(),
        }
    }

    #[test]
    fn classify_uses_inclusive_lower_edges() {
        let config = DealConfig::default();
        assert_eq!(config.classify(dec!(-3.01)), DealTier::NotADeal);
        assert_eq!(config.classify(dec!(-3)), DealTier::Marginal);
        assert_eq!(config.classify(dec!(4.99)), DealTier::Marginal);
        assert_eq!(config.classify(dec!(5)), DealTier::Good);
        assert_eq!(config.classify(dec!(10)), DealTier::Great);
        assert_eq!(config.classify(dec!(19.99)), DealTier::Great);
        assert_eq!(config.classify(dec!(20)), DealTier::Exceptional);
    }

    #[test]
    fn classify_is_monotone() {
        let config = DealConfig::default();
        let mut previous = DealTier::NotADeal;
        let mut d = dec!(-50);
        while d <= dec!(50) {
            let tier = config.classify(d);
            assert!(tier >= previous, "tier dropped at {d}");
            previous = tier;
            d += dec!(0.25);
        }
    }

    #[test]
    fn worked_example_is_a_great_deal() {
        let evaluator = DealEvaluator::default();
        let result = evaluator
            .evaluate(&product(dec!(10), Purity::Fine999, dec!(1400)), &ladder())
            .unwrap();
        assert_eq!(result.fair_price.round_dp(1), dec!(1583.6));
        assert_eq!(result.discount_percent.round_dp(1), dec!(11.6));
        assert_eq!(result.price_per_gram, dec!(140));
        assert_eq!(result.deal_tier, DealTier::Great);
    }

    #[test]
    fn priced_at_fair_value_has_zero_discount() {
        let evaluator = DealEvaluator::default();
        let ladder = ladder();
        let fair = evaluator
            .evaluate(&product(dec!(10), Purity::Karat22, dec!(0)), &ladder)
            .unwrap()
            .fair_price;
        let at_fair = evaluator
            .evaluate(&product(dec!(10), Purity::Karat22, fair), &ladder)
            .unwrap();
        assert_eq!(at_fair.discount_percent, Decimal::ZERO);
        assert_eq!(at_fair.deal_tier, DealTier::Marginal);
    }

    #[test]
    fn overpriced_listing_has_negative_discount() {
        let evaluator = DealEvaluator::default();
        let result = evaluator
            .evaluate(&product(dec!(10), Purity::Fine999, dec!(2000)), &ladder())
            .unwrap();
        assert!(result.discount_percent < Decimal::ZERO);
        assert_eq!(result.deal_tier, DealTier::NotADeal);
    }

    #[test]
    fn other_karat_interpolates_landed_price() {
        let evaluator = DealEvaluator::default();
        let ladder = ladder();
        let result = evaluator
            .evaluate(&product(dec!(10), Purity::Karat(18), dec!(1000)), &ladder)
            .unwrap();
        assert_eq!(result.reference_per_gram, ladder.landed_per_gram() * dec!(0.75));
    }

    #[test]
    fn karat22_coin_is_valued_without_jewellery_premium() {
        let evaluator = DealEvaluator::default();
        let ladder = ladder();
        let coin = evaluator
            .evaluate(&product(dec!(10), Purity::Karat22, dec!(2500)), &ladder)
            .unwrap();
        assert_eq!(coin.reference_per_gram, ladder.karat22_coin_tax_inclusive_per_gram());
        assert_eq!(coin.fair_price.round_dp(2), dec!(2018.19));
        assert!(coin.discount_percent < Decimal::ZERO);
        assert_eq!(coin.deal_tier, DealTier::NotADeal);
    }

    #[test]
    fn directly_built_karat_is_normalised() {
        let evaluator = DealEvaluator::default();
        let ladder = ladder();
        let named = evaluator
            .evaluate(&product(dec!(10), Purity::Karat22, dec!(1500)), &ladder)
            .unwrap();
        let numeric = evaluator
            .evaluate(&product(dec!(10), Purity::Karat(22), dec!(1500)), &ladder)
            .unwrap();
        assert_eq!(named.reference_per_gram, numeric.reference_per_gram);

        let err = evaluator
            .evaluate(&product(dec!(10), Purity::Karat(0), dec!(1500)), &ladder)
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidProduct {
                reason: InvalidProductReason::UnsupportedPurity(Purity::Karat(0)),
                ..
            }
        ));
    }

    #[test]
    fn reject_policy_refuses_other_karats() {
        let evaluator = DealEvaluator::new(DealConfig {
            other_karat: OtherKaratPolicy::Reject,
            ..DealConfig::default()
        });
        let err = evaluator
            .evaluate(&product(dec!(10), Purity::Karat(14), dec!(1000)), &ladder())
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidProduct {
                reason: InvalidProductReason::UnsupportedPurity(Purity::Karat(14)),
                ..
            }
        ));
    }

    #[test]
    fn zero_weight_is_rejected_without_aborting_batch() {
        let evaluator = DealEvaluator::default();
        let products = vec![
            product(dec!(0), Purity::Fine999, dec!(1400)),
            product(dec!(10), Purity::Fine999, dec!(1400)),
        ];
        let batch = evaluator.evaluate_batch(&products, &ladder());
        assert_eq!(batch.evaluated.len(), 1);
        assert_eq!(batch.rejected.len(), 1);
        assert!(matches!(
            batch.rejected[0].error,
            DomainError::InvalidProduct {
                reason: InvalidProductReason::NonPositiveWeight(_),
                ..
            }
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        let evaluator = DealEvaluator::default();
        let err = evaluator
            .evaluate(&product(dec!(1), Purity::Fine999, dec!(-1)), &ladder())
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidProduct {
                reason: InvalidProductReason::NegativeSellingPrice(_),
                ..
            }
        ));
    }
}
