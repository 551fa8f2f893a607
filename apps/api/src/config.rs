use std::time::Duration;

use anyhow::{Context, Result};

use crate::metrics::base::MetricsConfig;

/// Application configuration loaded from environment variables.
/// Everything has a default; without `ANTHROPIC_API_KEY` keyword extraction
/// runs on rules alone.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub extraction_timeout: Duration,
    /// Per-field limit on request text.
    pub max_text_bytes: usize,
    pub max_batch_pairs: usize,
    pub target_pages: f64,
    pub page_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
            extraction_timeout: Duration::from_millis(4000),
            max_text_bytes: 200_000,
            max_batch_pairs: 50,
            target_pages: 2.0,
            page_tolerance: 0.5,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            extraction_timeout: Duration::from_millis(parse_env(
                "EXTRACTION_TIMEOUT_MS",
                defaults.extraction_timeout.as_millis() as u64,
            )?),
            max_text_bytes: parse_env("MAX_TEXT_BYTES", defaults.max_text_bytes)?,
            max_batch_pairs: parse_env("MAX_BATCH_PAIRS", defaults.max_batch_pairs)?,
            target_pages: parse_env("TARGET_PAGES", defaults.target_pages)?,
            page_tolerance: parse_env("PAGE_TOLERANCE", defaults.page_tolerance)?,
        })
    }

    /// Engine defaults with the length target taken from the environment.
    pub fn metrics_config(&self) -> MetricsConfig {
        MetricsConfig {
            target_pages: self.target_pages,
            page_tolerance: self.page_tolerance,
            ..MetricsConfig::default()
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
