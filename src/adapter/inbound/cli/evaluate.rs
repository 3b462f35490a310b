//! `goldscout evaluate`: value a product file and list the filtered catalog.

use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::command::EvaluateArgs;
use super::{ladder, output};
use crate::adapter::inbound::product_file::{self, SkippedRecord};
use crate::application::{ScanOutcome, ScanReport};
use crate::domain::{
    apply, EvaluatedProduct, FilterSortSpec, Page, ProductId, Range, SortOrder, SortSpec,
};
use crate::error::{Result, SourceError};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Purity")]
    purity: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Fair")]
    fair: String,
    #[tabled(rename = "Discount")]
    discount: String,
    #[tabled(rename = "Tier")]
    tier: String,
}

impl From<&EvaluatedProduct> for ProductRow {
    fn from(item: &EvaluatedProduct) -> Self {
        let title: String = item.product.title.chars().take(40).collect();
        Self {
            title,
            source: item.product.source.clone(),
            purity: item.product.purity.to_string(),
            weight: format!("{}g", item.product.weight_grams.normalize()),
            price: output::money(item.product.selling_price),
            fair: output::money(item.fair_price),
            discount: output::percent(item.discount_percent),
            tier: output::tier(item.deal_tier),
        }
    }
}

/// Translate command-line filters into a catalog spec.
#[must_use]
pub fn filter_spec(args: &EvaluateArgs) -> FilterSortSpec {
    FilterSortSpec {
        source: args.source.clone(),
        purity: args.purity,
        discount: Range::new(args.min_discount, args.max_discount),
        weight: Range::new(args.min_weight, args.max_weight),
        search: args.search.clone(),
        available: args.available.then_some(true),
        favorites: (!args.favorites.is_empty()).then(|| {
            args.favorites
                .iter()
                .map(|id| ProductId::new(id.as_str()))
                .collect::<HashSet<_>>()
        }),
        sort: args.sort.map(|key| {
            let order = if args.desc {
                SortOrder::Desc
            } else {
                SortOrder::Asc
            };
            SortSpec::new(key.into(), order)
        }),
        page: args.limit.map(|limit| Page {
            offset: args.offset,
            limit,
        }),
    }
}

fn table(items: &[&EvaluatedProduct]) -> String {
    let rows: Vec<ProductRow> = items.iter().map(|item| ProductRow::from(*item)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn print_report(
    report: &ScanReport,
    skipped: &[SkippedRecord],
    spec: &FilterSortSpec,
    show_alerts: bool,
) {
    let page = apply(&report.evaluated, spec);

    if output::is_json() {
        let mut document = json!({
            "command": "evaluate",
            "outcome": "completed",
            "freshness": report.freshness,
            "ladder": report.ladder,
            "tier_counts": report.tier_counts,
            "total": page.total,
            "items": page.items,
            "rejected": report.rejected,
            "skipped": skipped,
            "duration_ms": report.duration_ms,
        });
        if show_alerts {
            document["alerts"] = json!(report.alerts);
        }
        output::json_output(document);
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Reference");
    output::field(
        "999 / g",
        output::money(report.ladder.gold.tax_inclusive_999_10g / Decimal::TEN),
    );
    output::field(
        "22K / g",
        output::money(report.ladder.gold.tax_inclusive_22k_10g / Decimal::TEN),
    );
    output::field("Fetched at", report.ladder.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"));
    ladder::print_freshness(report.freshness);

    output::section(&format!(
        "Products ({} of {} matching, {} evaluated)",
        page.items.len(),
        page.total,
        report.evaluated.len()
    ));
    if page.items.is_empty() {
        output::note("No products match the filters");
    } else {
        output::lines(&table(&page.items));
    }

    let tiers: Vec<String> = report
        .tier_counts
        .iter()
        .rev()
        .map(|(tier, count)| format!("{}: {count}", output::tier(*tier)))
        .collect();
    output::field("Tiers", tiers.join("  "));

    if !report.rejected.is_empty() {
        output::section("Rejected");
        for rejected in &report.rejected {
            output::warning(&format!("{}: {}", rejected.product.title, rejected.error));
        }
    }

    if !skipped.is_empty() {
        output::section("Skipped");
        for record in skipped {
            let title = record.title.as_deref().unwrap_or("(untitled)");
            output::warning(&format!("#{} {title}: {}", record.index, record.reason));
        }
    }

    if show_alerts {
        output::section("Alerts");
        if report.alerts.is_empty() {
            output::note("No products meet the alert criteria");
        } else {
            let alerts: Vec<&EvaluatedProduct> = report.alerts.iter().collect();
            output::lines(&table(&alerts));
        }
    }

    output::note(&format!("Scan took {}ms", report.duration_ms));
}

pub async fn execute(args: &EvaluateArgs, config: &Config) -> Result<()> {
    let file = product_file::load_products(&args.input, Utc::now())?;
    let spec = filter_spec(args);
    let engine = bootstrap::build_engine(config);

    match engine.scan(&file.products).await {
        ScanOutcome::Completed(report) => {
            print_report(&report, &file.skipped, &spec, args.alerts);
            Ok(())
        }
        ScanOutcome::Unavailable { reason } => {
            if output::is_json() {
                output::json_output(json!({
                    "command": "evaluate",
                    "outcome": "unavailable",
                    "reason": reason,
                }));
            } else {
                output::warning("Deal detection disabled: no spot price available");
            }
            Err(SourceError::Unavailable { reason }.into())
        }
    }
}
