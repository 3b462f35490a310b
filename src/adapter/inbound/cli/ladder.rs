//! `goldscout ladder`: current spot price and the reference ladder.

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::output;
use crate::application::Freshness;
use crate::domain::LadderSnapshot;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct GoldRow {
    #[tabled(rename = "Price point")]
    point: &'static str,
    #[tabled(rename = "999 / 10g")]
    fine_10g: String,
    #[tabled(rename = "999 / g")]
    fine_1g: String,
    #[tabled(rename = "22K / 10g")]
    karat22_10g: String,
    #[tabled(rename = "22K / g")]
    karat22_1g: String,
}

fn gold_rows(snapshot: &LadderSnapshot) -> Vec<GoldRow> {
    let gold = &snapshot.gold;
    let per_gram = &gold.per_gram;
    let dash = || "-".to_string();
    vec![
        GoldRow {
            point: "Spot",
            fine_10g: output::money(gold.spot_10g),
            fine_1g: per_gram.spot_999.to_string(),
            karat22_10g: dash(),
            karat22_1g: per_gram.spot_22k.to_string(),
        },
        GoldRow {
            point: "Landed",
            fine_10g: output::money(gold.landed_10g),
            fine_1g: per_gram.landed_999.to_string(),
            karat22_10g: output::money(gold.landed_22k_10g),
            karat22_1g: per_gram.landed_22k.to_string(),
        },
        GoldRow {
            point: "Retail",
            fine_10g: output::money(gold.retail_999_10g),
            fine_1g: per_gram.retail_999.to_string(),
            karat22_10g: output::money(gold.retail_22k_10g),
            karat22_1g: per_gram.retail_22k.to_string(),
        },
        GoldRow {
            point: "RTGS",
            fine_10g: output::money(gold.rtgs_999_10g),
            fine_1g: per_gram.rtgs_999.to_string(),
            karat22_10g: dash(),
            karat22_1g: dash(),
        },
        GoldRow {
            point: "Tax-inclusive",
            fine_10g: output::money(gold.tax_inclusive_999_10g),
            fine_1g: per_gram.tax_inclusive_999.to_string(),
            karat22_10g: output::money(gold.tax_inclusive_22k_10g),
            karat22_1g: per_gram.tax_inclusive_22k.to_string(),
        },
        GoldRow {
            point: "Coin, tax-inclusive",
            fine_10g: output::money(gold.tax_inclusive_999_10g),
            fine_1g: per_gram.tax_inclusive_999.to_string(),
            karat22_10g: output::money(gold.tax_inclusive_22k_coin_10g),
            karat22_1g: per_gram.tax_inclusive_22k_coin.to_string(),
        },
    ]
}

pub(super) fn print_freshness(freshness: Freshness) {
    match freshness {
        Freshness::Fresh => output::field("Freshness", "fresh"),
        Freshness::Stale { age_secs } => {
            output::warning(&format!(
                "Spot price is stale ({age_secs}s old); upstream refresh failed"
            ));
        }
    }
}

pub async fn execute(config: &Config) -> Result<()> {
    let engine = bootstrap::build_engine(config);
    let (reading, ladder) = engine.ladder().await?;
    let snapshot = ladder.snapshot();

    if output::is_json() {
        output::json_output(json!({
            "command": "ladder",
            "source": engine.spot_service().source_name(),
            "currency": config.source.currency,
            "freshness": reading.freshness,
            "ladder": snapshot,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Spot price");
    output::field("Source", engine.spot_service().source_name());
    output::field("Fetched at", snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"));
    output::field(
        "Gold / oz",
        format!("{} {}", output::money(reading.spot.gold_per_troy_ounce()), config.source.currency),
    );
    output::field("Gold / g", output::money(snapshot.spot_price_per_gram));
    print_freshness(reading.freshness);

    output::section("Gold");
    let mut table = Table::new(gold_rows(&snapshot));
    table.with(Style::rounded());
    output::lines(&table.to_string());

    output::section("Silver");
    output::field("Per gram", output::money(snapshot.silver.per_gram));
    output::field("Per kg", output::money(snapshot.silver.per_kg));

    Ok(())
}
