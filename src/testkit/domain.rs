//! Builders for domain values used across tests.
//!
//! Tests set only the fields they assert on; everything else gets a
//! plausible default.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    DealConfig, EvaluatedProduct, Grams, Price, Product, ProductType, Purity,
};

/// Fluent [`Product`] builder.
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    /// A 10g 999 coin listed at 1400 on AJIO.
    pub fn coin() -> Self {
        Self {
            product: Product {
                title: "10g 24K Gold Coin".to_string(),
                source: "AJIO".to_string(),
                brand: "MMTC".to_string(),
                weight_grams: Decimal::TEN,
                purity: Purity::Fine999,
                product_type: ProductType::Coin,
                selling_price: Decimal::new(1400, 0),
                url: "https://example.com/coin".to_string(),
                available: true,
                scanned_at: Utc::now(),
            },
        }
    }

    /// An 8g 22K chain listed at 25000 on Myntra.
    pub fn jewellery() -> Self {
        Self {
            product: Product {
                title: "22K Gold Chain".to_string(),
                source: "Myntra".to_string(),
                brand: "Candere".to_string(),
                weight_grams: Decimal::new(8, 0),
                purity: Purity::Karat22,
                product_type: ProductType::Jewellery,
                selling_price: Decimal::new(25_000, 0),
                url: "https://example.com/chain".to_string(),
                available: true,
                scanned_at: Utc::now(),
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.product.title = title.to_string();
        self
    }

    pub fn source(mut self, source: &str) -> Self {
        self.product.source = source.to_string();
        self
    }

    pub fn brand(mut self, brand: &str) -> Self {
        self.product.brand = brand.to_string();
        self
    }

    pub fn weight(mut self, grams: Grams) -> Self {
        self.product.weight_grams = grams;
        self
    }

    pub fn purity(mut self, purity: Purity) -> Self {
        self.product.purity = purity;
        self
    }

    pub fn price(mut self, price: Price) -> Self {
        self.product.selling_price = price;
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.product.url = url.to_string();
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.product.available = available;
        self
    }

    pub fn scanned_at(mut self, at: DateTime<Utc>) -> Self {
        self.product.scanned_at = at;
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}

/// Wrap `product` as if it had been valued at `discount` percent.
///
/// Fair price is back-solved from the selling price, so `discount` must be
/// below 100.
pub fn evaluated(product: Product, discount: Decimal) -> EvaluatedProduct {
    let fair_price = product.selling_price / (Decimal::ONE - discount / Decimal::ONE_HUNDRED);
    EvaluatedProduct {
        price_per_gram: product.selling_price / product.weight_grams,
        reference_per_gram: fair_price / product.weight_grams,
        fair_price,
        discount_percent: discount,
        deal_tier: DealConfig::default().classify(discount),
        product,
    }
}
