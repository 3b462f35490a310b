//! Scraped product records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::{Grams, Price};
use super::purity::Purity;

/// Stable product identifier, used for favorites and rejection reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Kind of item being sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Jewellery,
    #[serde(alias = "bar")]
    Coin,
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jewellery => write!(f, "jewellery"),
            Self::Coin => write!(f, "coin"),
        }
    }
}

/// A listing supplied by the scraping collaborator.
///
/// Weight and purity are already parsed from the listing title. The engine
/// only reads products; it never modifies them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub source: String,
    #[serde(default)]
    pub brand: String,
    pub weight_grams: Grams,
    pub purity: Purity,
    pub product_type: ProductType,
    pub selling_price: Price,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_available")]
    pub available: bool,
    /// Product files without timestamps get the load instant, shared by
    /// every record in the file.
    pub scanned_at: DateTime<Utc>,
}

fn default_available() -> bool {
    true
}

impl Product {
    /// Identifier of this listing: its URL, or `source:title:weight` when the
    /// scraper supplied no URL.
    #[must_use]
    pub fn id(&self) -> ProductId {
        if self.url.is_empty() {
            ProductId::new(format!(
                "{}:{}:{}",
                self.source, self.title, self.weight_grams
            ))
        } else {
            ProductId::new(self.url.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_scraper_record_with_defaults() {
        let json = r#"{
            "title": "10g 24K Gold Coin",
            "source": "AJIO",
            "weight_grams": 10,
            "purity": "24K",
            "product_type": "coin",
            "selling_price": 1400,
            "url": "https://example.com/p/1",
            "scanned_at": "2024-05-01T09:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.purity, Purity::Fine999);
        assert_eq!(product.product_type, ProductType::Coin);
        assert!(product.available);
        assert!(product.brand.is_empty());
        assert_eq!(product.id().as_str(), "https://example.com/p/1");
    }

    #[test]
    fn id_falls_back_without_url() {
        let json = r#"{
            "title": "Chain",
            "source": "Myntra",
            "weight_grams": 5.5,
            "purity": "22K",
            "product_type": "jewellery",
            "selling_price": 30000,
            "scanned_at": "2024-05-01T09:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id().as_str(), "Myntra:Chain:5.5");
    }
}
