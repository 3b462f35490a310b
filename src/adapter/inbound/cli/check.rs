//! `goldscout check config`: validate configuration without fetching.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Load and validate `path`, then print the effective settings.
pub fn execute_config(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "valid": true,
            "config": path.display().to_string(),
            "source_url": config.source.url,
            "ttl_secs": config.cache.ttl_secs,
            "max_stale_secs": config.cache.max_stale_secs,
            "snapshot_path": config.cache.snapshot_path.as_ref().map(|p| p.display().to_string()),
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Source", &config.source.url);
    output::field("Timeout", format!("{}ms", config.source.timeout_ms));
    output::field("Cache TTL", format!("{}s", config.cache.ttl_secs));
    output::field("Max stale", format!("{}s", config.cache.max_stale_secs));
    match &config.cache.snapshot_path {
        Some(snapshot) => output::field("Snapshot", snapshot.display()),
        None => output::field("Snapshot", output::muted("disabled")),
    }
    output::field(
        "Deal tiers",
        format!(
            "noise {}%, good {}%, great {}%, exceptional {}%",
            config.deals.noise, config.deals.good, config.deals.great, config.deals.exceptional
        ),
    );
    output::field("Max alerts", config.alerts.max_alerts);

    Ok(())
}
