use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matchscore::config::Config;
use matchscore::keywords::extractor::{DelegatedStrategy, KeywordExtractor};
use matchscore::llm_client::{self, LlmClient};
use matchscore::routes::build_router;
use matchscore::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matchscore v{}", env!("CARGO_PKG_VERSION"));

    // Keyword extractor: delegated first when an API key is configured
    let extractor = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!(
                "Delegated keyword extraction enabled (model: {}, timeout: {:?})",
                llm_client::MODEL,
                config.extraction_timeout
            );
            KeywordExtractor::with_primary(
                Arc::new(DelegatedStrategy::new(llm)),
                config.extraction_timeout,
            )
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; keyword extraction is rule-based only");
            KeywordExtractor::rule_based()
        }
    };

    let state = AppState::new(config.clone(), extractor);
    info!(
        "Length target: {} pages (±{})",
        config.target_pages, config.page_tolerance
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
