//! Terminal output helpers.
//!
//! Human output goes to stdout with colored markers. In JSON mode each
//! command prints exactly one JSON document on stdout and the line helpers
//! stay silent, so the output can be piped straight into `jq`.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use crate::domain::DealTier;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit one machine-readable JSON document instead of text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// True when line output should be skipped.
fn suppressed() -> bool {
    let config = read_config();
    config.json || config.quiet
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    if suppressed() {
        return;
    }
    println!("{} {}", "goldscout".bold(), version.dimmed());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if suppressed() {
        return;
    }
    println!("  {:<16} {}", label.dimmed(), value);
}

pub fn success(message: &str) {
    if suppressed() {
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line. Shown in quiet mode too.
pub fn warning(message: &str) {
    if is_json() {
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr. Shown in every mode.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", serde_json::json!({ "error": message }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

pub fn section(title: &str) {
    if suppressed() {
        return;
    }
    println!();
    println!("{}", title.bold());
}

pub fn note(message: &str) {
    if suppressed() {
        return;
    }
    println!("  {}", message.dimmed());
}

/// Print pre-rendered multi-line content, each line indented.
pub fn lines(content: &str) {
    if suppressed() {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a JSON document.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

/// Currency amount with two decimals.
#[must_use]
pub fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Signed percentage, green when positive and red when negative.
#[must_use]
pub fn percent(value: Decimal) -> String {
    let text = format!("{:+.2}%", value.round_dp(2));
    if is_json() {
        text
    } else if value.is_sign_positive() && !value.is_zero() {
        format!("{}", text.green())
    } else if value.is_sign_negative() {
        format!("{}", text.red())
    } else {
        text
    }
}

/// Deal tier badge.
#[must_use]
pub fn tier(tier: DealTier) -> String {
    let label = tier.to_string();
    if is_json() {
        return label;
    }
    match tier {
        DealTier::Exceptional => format!("{}", label.bold().green()),
        DealTier::Great => format!("{}", label.green()),
        DealTier::Good => format!("{}", label.cyan()),
        DealTier::Marginal => format!("{}", label.yellow()),
        DealTier::NotADeal => format!("{}", label.dimmed()),
    }
}

/// Format a dimmed/muted value.
#[must_use]
pub fn muted(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.dimmed())
}
