//! Command-line interface definitions.
//!
//! Defines the CLI structure for goldscout using `clap`: printing the
//! reference ladder, valuing a file of scraped products, and validating
//! configuration.

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::domain::{Purity, SortField};

/// Bullion valuation and deal detection for gold and silver listings
#[derive(Parser, Debug)]
#[command(name = "goldscout")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the reference price ladder for the current spot price
    Ladder(ConfigPathArg),

    /// Value scraped products and list deals
    Evaluate(Box<EvaluateArgs>),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `goldscout check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
}

/// Shared `--config` argument. Without it `config.toml` is used when present,
/// defaults otherwise.
#[derive(Args, Debug, Default)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Catalog sort keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Discount,
    Price,
    PricePerGram,
    Weight,
    Timestamp,
}

impl From<SortKey> for SortField {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Discount => Self::Discount,
            SortKey::Price => Self::Price,
            SortKey::PricePerGram => Self::PricePerGram,
            SortKey::Weight => Self::Weight,
            SortKey::Timestamp => Self::Timestamp,
        }
    }
}

/// Arguments for `goldscout evaluate`.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// JSON file of scraped products
    #[arg(long, short)]
    pub input: PathBuf,

    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Only products from this source (case-insensitive)
    #[arg(long)]
    pub source: Option<String>,

    /// Only products of this purity (999, 22K, 18K, ...)
    #[arg(long)]
    pub purity: Option<Purity>,

    /// Substring match on title, brand and purity
    #[arg(long)]
    pub search: Option<String>,

    /// Minimum discount percent
    #[arg(long, allow_hyphen_values = true)]
    pub min_discount: Option<Decimal>,

    /// Maximum discount percent
    #[arg(long, allow_hyphen_values = true)]
    pub max_discount: Option<Decimal>,

    /// Minimum weight in grams
    #[arg(long)]
    pub min_weight: Option<Decimal>,

    /// Maximum weight in grams
    #[arg(long)]
    pub max_weight: Option<Decimal>,

    /// Only products currently in stock
    #[arg(long)]
    pub available: bool,

    /// Restrict to these product ids (repeatable)
    #[arg(long = "favorite")]
    pub favorites: Vec<String>,

    /// Sort field
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page size
    #[arg(long)]
    pub limit: Option<usize>,

    /// Items to skip before the page
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Also list alert candidates
    #[arg(long)]
    pub alerts: bool,
}
