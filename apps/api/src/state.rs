use std::sync::Arc;

use crate::config::Config;
use crate::keywords::extractor::KeywordExtractor;
use crate::metrics::service::MetricsService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Delegated-then-rules extractor. Rules only when no API key is configured.
    pub extractor: Arc<KeywordExtractor>,
    pub metrics: Arc<MetricsService>,
}

impl AppState {
    pub fn new(config: Config, extractor: KeywordExtractor) -> Self {
        let extractor = Arc::new(extractor);
        let metrics = Arc::new(MetricsService::new(
            Arc::clone(&extractor),
            config.metrics_config(),
        ));
        Self {
            config,
            extractor,
            metrics,
        }
    }
}
