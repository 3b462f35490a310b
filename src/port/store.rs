//! Persisted spot price snapshot port.

use crate::domain::SpotPrice;
use crate::error::StoreError;

/// Durable home for the single cached spot price.
///
/// The format and location are an adapter detail.
pub trait SpotStore: Send + Sync {
    /// Load the last saved spot price, if any.
    fn load(&self) -> Result<Option<SpotPrice>, StoreError>;

    /// Replace the saved spot price.
    fn save(&self, spot: &SpotPrice) -> Result<(), StoreError>;
}
