mod support;

use std::time::Duration;

use goldscout::domain::OtherKaratPolicy;
use goldscout::error::{ConfigError, Error};
use goldscout::infrastructure::config::logging::LogFormat;
use goldscout::infrastructure::config::settings::Config;
use rust_decimal_macros::dec;
use support::fixtures::write_temp;

fn expect_invalid(toml: &str, expected: &str) {
    let (_dir, path) = write_temp("config.toml", toml);
    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) if field == expected => {}
        Err(err) => panic!("Expected invalid {expected}, got {err}"),
        Ok(_) => panic!("Expected {expected} to be rejected"),
    }
}

#[test]
fn config_loads_full_document() {
    let toml = r#"
[logging]
level = "debug"
format = "json"

[source]
url = "https://rates.example.com/INR"
timeout_ms = 2500

[cache]
ttl_secs = 30
max_stale_secs = 600
snapshot_path = "/var/lib/goldscout/spot.json"

[valuation]
tax_rate = 0.05
retail_spread_10g = 650

[deals]
good = 6
other_karat = "reject"

[alerts]
max_alerts = 10
min_discount = 5

[alerts.max_price_per_gram]
"24K" = 9000
"22K" = 8500
"#;
    let (_dir, path) = write_temp("config.toml", toml);
    let config = Config::load(&path).expect("load config");

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.source.url, "https://rates.example.com/INR");
    assert_eq!(config.valuation.tax_rate, dec!(0.05));
    assert_eq!(config.valuation.retail_spread_10g, dec!(650));
    assert_eq!(config.valuation.ounce_to_gram, dec!(31.1035));
    assert_eq!(config.deals.good, dec!(6));
    assert_eq!(config.deals.great, dec!(10));
    assert_eq!(config.deals.other_karat, OtherKaratPolicy::Reject);
    assert_eq!(config.alerts.max_alerts, 10);
    assert_eq!(config.alerts.max_price_per_gram.len(), 2);

    let policy = config.refresh_policy();
    assert_eq!(policy.ttl, Duration::from_secs(30));
    assert_eq!(policy.fetch_timeout, Duration::from_millis(2500));
    assert_eq!(policy.max_stale, Duration::from_secs(600));
}

#[test]
fn config_rejects_tax_rate_of_one() {
    expect_invalid("[valuation]\ntax_rate = 1.0\n", "valuation.tax_rate");
}

#[test]
fn config_rejects_unordered_deal_tiers() {
    expect_invalid("[deals]\ngood = 12\ngreat = 10\n", "deals");
}

#[test]
fn config_rejects_zero_ttl() {
    expect_invalid("[cache]\nttl_secs = 0\n", "cache.ttl_secs");
}

#[test]
fn config_rejects_zero_timeout() {
    expect_invalid("[source]\ntimeout_ms = 0\n", "source.timeout_ms");
}

#[test]
fn config_rejects_unparseable_url() {
    expect_invalid("[source]\nurl = \"not a url\"\n", "source.url");
}

#[test]
fn config_rejects_zero_alert_cap() {
    expect_invalid("[alerts]\nmax_alerts = 0\n", "alerts.max_alerts");
}

#[test]
fn config_rejects_malformed_toml() {
    let (_dir, path) = write_temp("config.toml", "[cache\nttl_secs = 5");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn config_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Config::load(dir.path().join("absent.toml")),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}
