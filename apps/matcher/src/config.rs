use std::time::Duration;

use anyhow::{Context, Result};

use crate::matching::orchestrator::{DEFAULT_JOB_SCAN_LIMIT, DEFAULT_THRESHOLD};

/// Worker configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Shared extraction cache. Falls back to an in-process cache when unset.
    pub redis_url: Option<String>,
    /// Without a key the extractor yields nothing and every job is skipped as unscorable.
    pub anthropic_api_key: Option<String>,
    pub match_threshold: f64,
    pub sweep_interval: Duration,
    /// Every n-th sweep re-matches all users; the rest only match newly ingested jobs.
    pub full_sweep_every: u32,
    pub job_scan_limit: i64,
    pub extraction_cache_ttl: Duration,
    pub extraction_cache_capacity: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: optional_env("REDIS_URL"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            match_threshold: parse_env("MATCH_THRESHOLD", DEFAULT_THRESHOLD)?,
            sweep_interval: Duration::from_secs(parse_env("SWEEP_INTERVAL_SECS", 900)?),
            full_sweep_every: parse_env("FULL_SWEEP_EVERY", 24)?,
            job_scan_limit: parse_env("JOB_SCAN_LIMIT", DEFAULT_JOB_SCAN_LIMIT)?,
            extraction_cache_ttl: Duration::from_secs(parse_env(
                "EXTRACTION_CACHE_TTL_SECS",
                86_400,
            )?),
            extraction_cache_capacity: parse_env("EXTRACTION_CACHE_CAPACITY", 1024)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are the same thing.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        None => Ok(default),
    }
}
