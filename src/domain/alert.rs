//! Selection of evaluated products worth notifying about.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::deal::EvaluatedProduct;
use super::money::{Grams, Price};
use super::purity::Purity;

/// Criteria a deal must meet before it is handed to the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertCriteria {
    /// Minimum discount percentage.
    #[serde(default = "default_min_discount")]
    pub min_discount: Decimal,

    /// Minimum item weight.
    #[serde(default = "default_min_weight")]
    pub min_weight_grams: Grams,

    /// Listings at or below this price are ignored.
    #[serde(default = "default_min_selling_price")]
    pub min_selling_price: Price,

    /// Price-per-gram caps keyed by purity label ("24K", "22K", "750", ...).
    #[serde(default = "default_max_price_per_gram")]
    pub max_price_per_gram: BTreeMap<String, Price>,

    /// Cap for purities missing from `max_price_per_gram`.
    #[serde(default = "default_cap")]
    pub default_max_price_per_gram: Price,

    /// Maximum number of alerts per scan.
    #[serde(default = "default_max_alerts")]
    pub max_alerts: usize,
}

fn default_min_discount() -> Decimal {
    Decimal::NEGATIVE_ONE
}

fn default_min_weight() -> Decimal {
    Decimal::new(5, 1) // 0.5
}

fn default_min_selling_price() -> Decimal {
    Decimal::new(1000, 0)
}

fn default_max_price_per_gram() -> BTreeMap<String, Price> {
    [
        ("24K", 18_000),
        ("22K", 17_000),
        ("18K", 16_000),
        ("14K", 15_000),
    ]
    .into_iter()
    .map(|(label, cap)| (label.to_string(), Decimal::from(cap)))
    .collect()
}

fn default_cap() -> Decimal {
    Decimal::new(14_000, 0)
}

fn default_max_alerts() -> usize {
    4
}

impl Default for AlertCriteria {
    fn default() -> Self {
        Self {
            min_discount: default_min_discount(),
            min_weight_grams: default_min_weight(),
            min_selling_price: default_min_selling_price(),
            max_price_per_gram: default_max_price_per_gram(),
            default_max_price_per_gram: default_cap(),
            max_alerts: default_max_alerts(),
        }
    }
}

impl AlertCriteria {
    /// Price-per-gram cap for a purity.
    #[must_use]
    pub fn cap_for(&self, purity: Purity) -> Price {
        self.max_price_per_gram
            .iter()
            .find(|(label, _)| label.parse::<Purity>().is_ok_and(|p| p.same_grade(purity)))
            .map_or(self.default_max_price_per_gram, |(_, cap)| *cap)
    }

    /// True when a product passes every criterion.
    #[must_use]
    pub fn admits(&self, item: &EvaluatedProduct) -> bool {
        item.discount_percent >= self.min_discount
            && item.product.weight_grams >= self.min_weight_grams
            && item.price_per_gram <= self.cap_for(item.product.purity)
            && item.product.selling_price > self.min_selling_price
    }

    /// Admitted products, best discount first, capped at `max_alerts`.
    ///
    /// The sort is stable so equal discounts keep scan order.
    #[must_use]
    pub fn select<'a>(&self, items: &'a [EvaluatedProduct]) -> Vec<&'a EvaluatedProduct> {
        let mut selected: Vec<_> = items.iter().filter(|item| self.admits(item)).collect();
        selected.sort_by(|a, b| b.discount_percent.cmp(&a.discount_percent));
        selected.truncate(self.max_alerts);
        selected
    }
}
