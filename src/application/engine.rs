//! Valuation use case.
//!
//! One scan reads the spot price once, derives the ladder once and values
//! every product against that same ladder. Evaluated products are never
//! kept across scans.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::spot::{Freshness, SpotPriceService, SpotReading};
use crate::domain::{
    derive_ladder, AlertCriteria, DealConfig, DealEvaluator, DealTier, EvaluatedProduct,
    LadderSnapshot, Product, ReferenceLadder, RejectedProduct, ValuationConstants,
};
use crate::error::Result;

/// Result of one batch valuation.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub ladder: LadderSnapshot,
    pub freshness: Freshness,
    pub evaluated: Vec<EvaluatedProduct>,
    /// Products that could not be valued, for manual review.
    pub rejected: Vec<RejectedProduct>,
    pub tier_counts: BTreeMap<DealTier, usize>,
    /// Alert candidates, best discount first.
    pub alerts: Vec<EvaluatedProduct>,
    pub duration_ms: u64,
}

impl ScanReport {
    /// Evaluated products classified above `not-a-deal`.
    pub fn deals(&self) -> impl Iterator<Item = &EvaluatedProduct> {
        self.evaluated.iter().filter(|p| p.deal_tier.is_deal())
    }
}

/// Outcome of a scan request.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ScanOutcome {
    Completed(ScanReport),
    /// No usable spot price; deal detection is disabled for this scan.
    Unavailable { reason: String },
}

/// Ties the spot price service to the pure valuation and deal logic.
pub struct ValuationEngine {
    spot: Arc<SpotPriceService>,
    constants: ValuationConstants,
    evaluator: DealEvaluator,
    alerts: AlertCriteria,
}

impl ValuationEngine {
    #[must_use]
    pub fn new(
        spot: Arc<SpotPriceService>,
        constants: ValuationConstants,
        deals: DealConfig,
        alerts: AlertCriteria,
    ) -> Self {
        Self {
            spot,
            constants,
            evaluator: DealEvaluator::new(deals),
            alerts,
        }
    }

    #[must_use]
    pub fn spot_service(&self) -> &Arc<SpotPriceService> {
        &self.spot
    }

    #[must_use]
    pub const fn constants(&self) -> &ValuationConstants {
        &self.constants
    }

    /// Current reading and the ladder derived from it.
    ///
    /// # Errors
    ///
    /// Fails when no spot price is available.
    pub async fn ladder(&self) -> Result<(SpotReading, ReferenceLadder)> {
        let reading = self.spot.current().await?;
        let ladder = derive_ladder(&reading.spot, &self.constants);
        Ok((reading, ladder))
    }

    /// Value a batch of products against the current spot price.
    ///
    /// When no spot price can be obtained the outcome is
    /// [`ScanOutcome::Unavailable`] and no discounts are computed.
    pub async fn scan(&self, products: &[Product]) -> ScanOutcome {
        let started = Instant::now();
        let reading = match self.spot.current().await {
            Ok(reading) => reading,
            Err(e) => {
                warn!(error = %e, products = products.len(), "Deal detection disabled");
                return ScanOutcome::Unavailable {
                    reason: e.to_string(),
                };
            }
        };

        let mut report = self.report(&reading, products);
        report.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            evaluated = report.evaluated.len(),
            rejected = report.rejected.len(),
            alerts = report.alerts.len(),
            stale = report.freshness.is_stale(),
            duration_ms = report.duration_ms,
            "Scan complete"
        );
        ScanOutcome::Completed(report)
    }

    /// Value `products` against an already obtained reading.
    #[must_use]
    pub fn report(&self, reading: &SpotReading, products: &[Product]) -> ScanReport {
        let started = Instant::now();
        let ladder = derive_ladder(&reading.spot, &self.constants);
        let batch = self.evaluator.evaluate_batch(products, &ladder);

        for rejected in &batch.rejected {
            warn!(
                product = %rejected.product.id(),
                reason = %rejected.error,
                "Product rejected"
            );
        }

        let mut tier_counts: BTreeMap<DealTier, usize> =
            DealTier::ALL.iter().map(|tier| (*tier, 0)).collect();
        for item in &batch.evaluated {
            *tier_counts.entry(item.deal_tier).or_default() += 1;
            if item.deal_tier.is_deal() {
                debug!(
                    product = %item.id(),
                    tier = %item.deal_tier,
                    discount = %item.discount_percent.round_dp(2),
                    "Deal detected"
                );
            }
        }

        let alerts: Vec<EvaluatedProduct> = self
            .alerts
            .select(&batch.evaluated)
            .into_iter()
            .cloned()
            .collect();
        for alert in &alerts {
            info!(
                product = %alert.id(),
                tier = %alert.deal_tier,
                discount = %alert.discount_percent.round_dp(2),
                price_per_gram = %alert.price_per_gram.round_dp(2),
                "Alert candidate"
            );
        }

        ScanReport {
            ladder: ladder.snapshot(),
            freshness: reading.freshness,
            evaluated: batch.evaluated,
            rejected: batch.rejected,
            tier_counts,
            alerts,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::spot::RefreshPolicy;
    use crate::domain::Purity;
    use crate::testkit::clock::ManualClock;
    use crate::testkit::domain::ProductBuilder;
    use crate::testkit::source::StubSpotSource;
    use rust_decimal_macros::dec;

    fn engine(source: StubSpotSource) -> ValuationEngine {
        let spot = SpotPriceService::new(Arc::new(source), RefreshPolicy::default())
            .with_clock(Arc::new(ManualClock::default()));
        ValuationEngine::new(
            Arc::new(spot),
            ValuationConstants::default(),
            DealConfig::default(),
            AlertCriteria::default(),
        )
    }

    #[tokio::test]
    async fn counts_every_tier() {
        let engine = engine(StubSpotSource::new(dec!(5989.4), dec!(75)));
        let products = vec![
            ProductBuilder::coin().price(dec!(1400)).build(),
            ProductBuilder::coin().price(dec!(5000)).build(),
        ];

        let ScanOutcome::Completed(report) = engine.scan(&products).await else {
            panic!("expected a completed scan");
        };
        assert_eq!(report.tier_counts.len(), DealTier::ALL.len());
        assert_eq!(report.tier_counts[&DealTier::Great], 1);
        assert_eq!(report.tier_counts[&DealTier::NotADeal], 1);
        assert_eq!(report.deals().count(), 1);
    }

    #[tokio::test]
    async fn unavailable_source_disables_detection() {
        let source = StubSpotSource::new(dec!(5989.4), dec!(75));
        source.fail_with("connection refused");
        let engine = engine(source);

        let outcome = engine
            .scan(&[ProductBuilder::coin().purity(Purity::Fine999).build()])
            .await;
        match outcome {
            ScanOutcome::Unavailable { reason } => assert!(reason.contains("connection refused")),
            ScanOutcome::Completed(_) => panic!("scan must not complete without a spot price"),
        }
    }
}
