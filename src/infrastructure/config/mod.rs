//! Infrastructure configuration modules.

pub mod cache;
pub mod logging;
pub mod settings;
pub mod source;

pub use cache::CacheConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use settings::Config;
pub use source::SourceConfig;
