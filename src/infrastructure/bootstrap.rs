//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::goldprice::GoldPriceClient;
use crate::adapter::outbound::snapshot::JsonFileSpotStore;
use crate::application::{SpotPriceService, ValuationEngine};
use crate::infrastructure::config::settings::Config;
use crate::port::SpotPriceSource;

/// Build the spot price service over an explicit source.
pub fn build_spot_service(config: &Config, source: Arc<dyn SpotPriceSource>) -> SpotPriceService {
    let service = SpotPriceService::new(source, config.refresh_policy());
    match &config.cache.snapshot_path {
        Some(path) => {
            info!(path = %path.display(), "Spot price snapshot enabled");
            service.with_store(Arc::new(JsonFileSpotStore::new(path.clone())))
        }
        None => service,
    }
}

/// Build the valuation engine over an explicit source.
pub fn build_engine_with_source(
    config: &Config,
    source: Arc<dyn SpotPriceSource>,
) -> ValuationEngine {
    ValuationEngine::new(
        Arc::new(build_spot_service(config, source)),
        config.valuation.clone(),
        config.deals.clone(),
        config.alerts.clone(),
    )
}

/// Build the valuation engine against the configured HTTP source.
pub fn build_engine(config: &Config) -> ValuationEngine {
    let client = GoldPriceClient::from_config(&config.source);
    info!(url = client.url(), currency = %config.source.currency, "Spot price source");
    build_engine_with_source(config, Arc::new(client))
}
