use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures of the upstream spot price collaborator.
///
/// Any of these aborts the current refresh attempt. A still-present cached
/// value is kept and served as stale.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("spot price source unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("spot price fetch timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("spot price response missing or malformed field: {field}")]
    Malformed { field: &'static str },

    #[error("spot price source returned status {status}")]
    Status { status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors from the persisted cache snapshot.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid snapshot contents: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when no spot price could be obtained at all.
    #[must_use]
    pub const fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}
