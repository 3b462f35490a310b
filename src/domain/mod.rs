//! Pure valuation domain: spot prices, reference ladders, deals and catalogs.

pub mod alert;
pub mod catalog;
pub mod deal;
pub mod error;
pub mod ladder;
mod money;
mod product;
mod purity;
mod spot;
pub mod valuation;

pub use alert::AlertCriteria;
pub use catalog::{apply, CatalogPage, FilterSortSpec, Page, Range, SortField, SortOrder, SortSpec};
pub use deal::{
    BatchEvaluation, DealConfig, DealEvaluator, DealTier, EvaluatedProduct, OtherKaratPolicy,
    RejectedProduct,
};
pub use error::{DomainError, InvalidProductReason, Metal};
pub use ladder::{LadderSnapshot, ReferenceLadder};
pub use money::{round_cents, round_whole, Grams, Price};
pub use product::{Product, ProductId, ProductType};
pub use purity::Purity;
pub use spot::SpotPrice;
pub use valuation::{derive_ladder, ValuationConstants};
