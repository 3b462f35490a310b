//! Outbound adapters: the goldprice.org client and the JSON snapshot store.

pub mod goldprice;
pub mod snapshot;
