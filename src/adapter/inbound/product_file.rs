//! Reader for scraped product files.
//!
//! Accepts a bare JSON array of products, or a scan document carrying the
//! array under `products` or `all_products`. Records are converted one at a
//! time: a malformed record is skipped and reported, never fatal to the file.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::domain::Product;
use crate::error::Result;

#[derive(Deserialize)]
#[serde(untagged)]
enum ProductDocument {
    Bare(Vec<Value>),
    Scan {
        #[serde(alias = "all_products")]
        products: Vec<Value>,
    },
}

/// A record that could not be read as a product, kept for manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Position of the record in the file's product array.
    pub index: usize,
    pub title: Option<String>,
    pub reason: String,
}

/// Products read from one file.
#[derive(Debug, Clone, Default)]
pub struct ProductFile {
    pub products: Vec<Product>,
    pub skipped: Vec<SkippedRecord>,
}

fn read_record(
    index: usize,
    mut record: Value,
    scanned_at: DateTime<Utc>,
) -> std::result::Result<Product, SkippedRecord> {
    let title = record
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string);
    if let Value::Object(fields) = &mut record {
        fields
            .entry("scanned_at")
            .or_insert_with(|| Value::String(scanned_at.to_rfc3339()));
    }
    serde_json::from_value(record).map_err(|e| SkippedRecord {
        index,
        title,
        reason: e.to_string(),
    })
}

/// Parse products from a JSON string.
///
/// Records without a `scanned_at` field are stamped with `scanned_at`.
///
/// # Errors
///
/// Fails only when the document itself is not a product array or scan
/// document.
pub fn parse_products(content: &str, scanned_at: DateTime<Utc>) -> Result<ProductFile> {
    let document: ProductDocument = serde_json::from_str(content)?;
    let records = match document {
        ProductDocument::Bare(records) | ProductDocument::Scan { products: records } => records,
    };

    let mut file = ProductFile::default();
    for (index, record) in records.into_iter().enumerate() {
        match read_record(index, record, scanned_at) {
            Ok(product) => file.products.push(product),
            Err(skipped) => {
                warn!(
                    index = skipped.index,
                    title = skipped.title.as_deref().unwrap_or("-"),
                    reason = %skipped.reason,
                    "Skipping malformed product record"
                );
                file.skipped.push(skipped);
            }
        }
    }
    Ok(file)
}

/// Read products from a JSON file.
pub fn load_products<P: AsRef<Path>>(path: P, scanned_at: DateTime<Utc>) -> Result<ProductFile> {
    let content = fs::read_to_string(path)?;
    parse_products(&content, scanned_at)
}
