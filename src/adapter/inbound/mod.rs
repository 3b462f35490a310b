//! Inbound adapters: the command line and scraped product files.

pub mod cli;
pub mod product_file;
