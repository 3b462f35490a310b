//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and by the deal
//! evaluator when a value breaks a domain rule.
//!
//! # Examples
//!
//! ```
//! use goldscout::domain::error::DomainError;
//! use goldscout::domain::SpotPrice;
//! use chrono::Utc;
//! use rust_decimal_macros::dec;
//!
//! let result = SpotPrice::try_new(dec!(0), dec!(75.5), Utc::now());
//! assert!(matches!(result, Err(DomainError::NonPositiveSpot { .. })));
//! ```

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use super::purity::Purity;

/// Metal a spot price refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metal {
    Gold,
    Silver,
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gold => write!(f, "gold"),
            Self::Silver => write!(f, "silver"),
        }
    }
}

/// Why a single product could not be valued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidProductReason {
    /// Weight was zero or negative.
    NonPositiveWeight(Decimal),
    /// Selling price was negative.
    NegativeSellingPrice(Decimal),
    /// No reference price exists for this purity under the active policy.
    UnsupportedPurity(Purity),
    /// The reference price resolved to zero.
    ZeroFairPrice,
}

impl fmt::Display for InvalidProductReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveWeight(weight) => write!(f, "weight must be positive, got {weight}g"),
            Self::NegativeSellingPrice(price) => {
                write!(f, "selling price must not be negative, got {price}")
            }
            Self::UnsupportedPurity(purity) => write!(f, "no reference price for purity {purity}"),
            Self::ZeroFairPrice => write!(f, "fair price resolved to zero"),
        }
    }
}

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Spot prices must be strictly positive.
    #[error("{metal} spot price must be positive, got {value}")]
    NonPositiveSpot {
        /// Which metal carried the bad value.
        metal: Metal,
        /// The rejected value.
        value: Decimal,
    },

    /// A product cannot be valued. Only that product is skipped.
    #[error("invalid product {product}: {reason}")]
    InvalidProduct {
        /// Identifier of the rejected product.
        product: String,
        /// What was wrong with it.
        reason: InvalidProductReason,
    },

    /// Karat outside the 1..=24 range.
    #[error("karat must be between 1 and 24, got {karat}")]
    InvalidKarat { karat: u32 },

    /// Purity label that could not be parsed.
    #[error("unrecognized purity label '{label}'")]
    UnknownPurity { label: String },
}
