//! Gold fineness grades.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Fineness of a gold item.
///
/// Parsing and [`Purity::from_karat`] normalise 24 karat to
/// [`Purity::Fine999`] and 22 karat to [`Purity::Karat22`]. A `Karat(k)`
/// built directly may break that; [`Purity::canonical`] restores it, and the
/// deal evaluator, catalog filter and alert caps compare canonical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Purity {
    /// 99.9% fine (24K).
    Fine999,
    /// 91.67% fine (22K, hallmark 916).
    Karat22,
    /// Any other karat value between 1 and 23, excluding 22.
    Karat(u8),
}

impl Purity {
    /// Build a purity from a karat number.
    pub fn from_karat(karat: u32) -> Result<Self, DomainError> {
        match karat {
            24 => Ok(Self::Fine999),
            22 => Ok(Self::Karat22),
            // Bounded by the match arm, the cast is lossless.
            1..=23 => Ok(Self::Karat(karat as u8)),
            _ => Err(DomainError::InvalidKarat { karat }),
        }
    }

    /// The normalised form of this grade.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidKarat`] for `Karat(k)` outside 1..=24.
    pub fn canonical(self) -> Result<Self, DomainError> {
        match self {
            Self::Karat(k) => Self::from_karat(u32::from(k)),
            named => Ok(named),
        }
    }

    /// True when both grades normalise to the same value.
    #[must_use]
    pub fn same_grade(self, other: Self) -> bool {
        self.canonical().unwrap_or(self) == other.canonical().unwrap_or(other)
    }

    /// Karat number of this grade.
    #[must_use]
    pub const fn karat(&self) -> u8 {
        match self {
            Self::Fine999 => 24,
            Self::Karat22 => 22,
            Self::Karat(k) => *k,
        }
    }

    /// Linear purity factor `karat / 24`.
    #[must_use]
    pub fn linear_factor(&self) -> Decimal {
        Decimal::from(self.karat()) / Decimal::from(24)
    }

    /// Karat-style label ("24K", "22K", "18K"), used for per-purity limits.
    #[must_use]
    pub fn karat_label(&self) -> String {
        format!("{}K", self.karat())
    }

    /// Lowercase label for substring search.
    #[must_use]
    pub fn search_text(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fine999 => write!(f, "999"),
            Self::Karat22 => write!(f, "22K"),
            Self::Karat(k) => write!(f, "{k}K"),
        }
    }
}

impl FromStr for Purity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        match label.as_str() {
            "999" | "995" | "24K" | "24KT" => return Ok(Self::Fine999),
            "916" | "22K" | "22KT" => return Ok(Self::Karat22),
            "750" => return Ok(Self::Karat(18)),
            "585" => return Ok(Self::Karat(14)),
            "375" => return Ok(Self::Karat(9)),
            _ => {}
        }

        let digits = label
            .strip_suffix("KT")
            .or_else(|| label.strip_suffix('K'))
            .ok_or_else(|| DomainError::UnknownPurity {
                label: s.to_string(),
            })?;
        let karat: u32 = digits.parse().map_err(|_| DomainError::UnknownPurity {
            label: s.to_string(),
        })?;
        Self::from_karat(karat)
    }
}

impl TryFrom<String> for Purity {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Purity> for String {
    fn from(purity: Purity) -> Self {
        purity.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn hallmark_and_karat_labels_agree() {
        assert_eq!("999".parse::<Purity>().unwrap(), Purity::Fine999);
        assert_eq!("24K".parse::<Purity>().unwrap(), Purity::Fine999);
        assert_eq!("916".parse::<Purity>().unwrap(), Purity::Karat22);
        assert_eq!("22k".parse::<Purity>().unwrap(), Purity::Karat22);
        assert_eq!("750".parse::<Purity>().unwrap(), Purity::Karat(18));
        assert_eq!("18K".parse::<Purity>().unwrap(), Purity::Karat(18));
        assert_eq!("14KT".parse::<Purity>().unwrap(), Purity::Karat(14));
    }

    #[test]
    fn from_karat_normalises_named_grades() {
        assert_eq!(Purity::from_karat(24).unwrap(), Purity::Fine999);
        assert_eq!(Purity::from_karat(22).unwrap(), Purity::Karat22);
        assert_eq!(Purity::from_karat(18).unwrap(), Purity::Karat(18));
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(matches!(
            "0K".parse::<Purity>(),
            Err(DomainError::InvalidKarat { karat: 0 })
        ));
        assert!(matches!(
            "30K".parse::<Purity>(),
            Err(DomainError::InvalidKarat { karat: 30 })
        ));
        assert!(matches!(
            "gold".parse::<Purity>(),
            Err(DomainError::UnknownPurity { .. })
        ));
    }

    #[test]
    fn canonical_folds_named_karats() {
        assert_eq!(Purity::Karat(22).canonical().unwrap(), Purity::Karat22);
        assert_eq!(Purity::Karat(24).canonical().unwrap(), Purity::Fine999);
        assert_eq!(Purity::Karat(18).canonical().unwrap(), Purity::Karat(18));
        assert!(matches!(
            Purity::Karat(0).canonical(),
            Err(DomainError::InvalidKarat { karat: 0 })
        ));
        assert!(Purity::Karat(30).canonical().is_err());
    }

    #[test]
    fn same_grade_ignores_representation() {
        assert!(Purity::Karat(22).same_grade(Purity::Karat22));
        assert!(Purity::Fine999.same_grade(Purity::Karat(24)));
        assert!(!Purity::Karat(18).same_grade(Purity::Karat22));
    }

    #[test]
    fn linear_factor_is_karat_over_24() {
        assert_eq!(Purity::Karat(18).linear_factor(), dec!(0.75));
        assert_eq!(Purity::Fine999.linear_factor(), dec!(1));
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&Purity::Karat22).unwrap();
        assert_eq!(json, "\"22K\"");
        let parsed: Purity = serde_json::from_str("\"750\"").unwrap();
        assert_eq!(parsed, Purity::Karat(18));
    }
}
