//! Filtering, ordering and paging over evaluated products.
//!
//! Stateless: every call re-runs the full pipeline over the slice it is
//! given. Catalogs are expected to hold hundreds to low thousands of items.

use std::cmp::Ordering;
use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::deal::EvaluatedProduct;
use super::product::ProductId;
use super::purity::Purity;

/// Inclusive `[min, max]` bound; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Range {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl Range {
    #[must_use]
    pub const fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, value: Decimal) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Field a catalog can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Discount,
    Price,
    PricePerGram,
    Weight,
    Timestamp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    fn compare(&self, a: &EvaluatedProduct, b: &EvaluatedProduct) -> Ordering {
        let ordering = match self.field {
            SortField::Discount => a.discount_percent.cmp(&b.discount_percent),
            SortField::Price => a.product.selling_price.cmp(&b.product.selling_price),
            SortField::PricePerGram => a.price_per_gram.cmp(&b.price_per_gram),
            SortField::Weight => a.product.weight_grams.cmp(&b.product.weight_grams),
            SortField::Timestamp => a.product.scanned_at.cmp(&b.product.scanned_at),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Offset/limit window over the ordered subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub offset: usize,
    pub limit: usize,
}

/// Conjunctive filter plus optional ordering and paging.
///
/// The default spec matches everything and keeps the input order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterSortSpec {
    /// Source name, compared case-insensitively.
    pub source: Option<String>,
    pub purity: Option<Purity>,
    pub discount: Range,
    pub weight: Range,
    /// Case-insensitive substring over title, brand and purity.
    pub search: Option<String>,
    pub available: Option<bool>,
    /// Restrict to these product ids.
    pub favorites: Option<HashSet<ProductId>>,
    pub sort: Option<SortSpec>,
    pub page: Option<Page>,
}

impl FilterSortSpec {
    /// True when `item` passes every configured predicate.
    #[must_use]
    pub fn matches(&self, item: &EvaluatedProduct) -> bool {
        let product = &item.product;

        if let Some(source) = &self.source {
            if !product.source.eq_ignore_ascii_case(source) {
                return false;
            }
        }
        if self.purity.is_some_and(|purity| !purity.same_grade(product.purity)) {
            return false;
        }
        if !self.discount.contains(item.discount_percent) || !self.weight.contains(product.weight_grams)
        {
            return false;
        }
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            let hit = product.title.to_lowercase().contains(&needle)
                || product.brand.to_lowercase().contains(&needle)
                || product.purity.search_text().contains(&needle);
            if !hit {
                return false;
            }
        }
        if self.available.is_some_and(|available| available != product.available) {
            return false;
        }
        if let Some(favorites) = &self.favorites {
            if !favorites.contains(&product.id()) {
                return false;
            }
        }
        true
    }
}

/// Ordered, paged view over a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<'a> {
    /// Matching items before paging.
    pub total: usize,
    pub items: Vec<&'a EvaluatedProduct>,
}

/// Filter, order and page `products`.
///
/// Ordering is stable: items with equal keys keep their relative input
/// order, so repeated calls with the same spec page deterministically.
#[must_use]
pub fn apply<'a>(products: &'a [EvaluatedProduct], spec: &FilterSortSpec) -> CatalogPage<'a> {
    let mut items: Vec<&EvaluatedProduct> = products.iter().filter(|p| spec.matches(p)).collect();

    if let Some(sort) = spec.sort {
        items.sort_by(|a, b| sort.compare(a, b));
    }

    let total = items.len();
    if let Some(page) = spec.page {
        items = items.into_iter().skip(page.offset).take(page.limit).collect();
    }

    CatalogPage { total, items }
}
