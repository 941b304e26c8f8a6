mod cli;
mod config;
mod db;
mod errors;
mod extraction;
mod llm_client;
mod matching;
mod models;
mod skills;
mod store;
mod sweep;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::{
    CachedExtractor, InMemoryRequirementsCache, LlmRequirementExtractor, RedisRequirementsCache,
    RequirementsCache,
};
use crate::llm_client::LlmClient;
use crate::matching::{MatchEngine, MatchingConfig, DEFAULT_WEIGHTS};
use crate::models::matches::MatchRow;
use crate::store::PgMatchStore;
use crate::sweep::Sweeper;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Extraction cache: Redis when configured, otherwise in-process
    let cache: Arc<dyn RequirementsCache> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Extraction cache: Redis");
            Arc::new(RedisRequirementsCache::new(client, config.extraction_cache_ttl))
        }
        None => {
            info!(
                capacity = config.extraction_cache_capacity,
                "Extraction cache: in-memory"
            );
            Arc::new(InMemoryRequirementsCache::new(
                config.extraction_cache_capacity,
                config.extraction_cache_ttl,
            ))
        }
    };

    // Initialize LLM client
    let llm = config.anthropic_api_key.clone().map(LlmClient::new);
    match &llm {
        Some(_) => info!("LLM client initialized (model: {})", llm_client::MODEL),
        None => warn!("ANTHROPIC_API_KEY not set; jobs will be skipped as unscorable"),
    }
    let extractor = Arc::new(CachedExtractor::new(
        Arc::new(LlmRequirementExtractor::new(llm)),
        cache,
    ));

    let engine = Arc::new(MatchEngine::new(
        Arc::new(PgMatchStore::new(db)),
        extractor,
        MatchingConfig {
            threshold: config.match_threshold,
            weights: DEFAULT_WEIGHTS,
            job_scan_limit: config.job_scan_limit,
        },
    ));

    match cli.command {
        Some(Command::Pair { user, job }) => {
            let outcome = engine.evaluate_pair(user, job).await?;
            println!("{outcome}");
        }
        Some(Command::User { id }) => print_matches(&engine.match_user_with_all_jobs(id).await?),
        Some(Command::Job { id }) => print_matches(&engine.match_job_with_all_users(id).await?),
        Some(Command::Sweep) | None => run_sweeps(engine, &config).await,
    }

    Ok(())
}

async fn run_sweeps(engine: Arc<MatchEngine>, config: &Config) {
    let mut sweeper = Sweeper::new(engine, config.full_sweep_every);
    let mut interval = tokio::time::interval(config.sweep_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    info!(
        interval_secs = config.sweep_interval.as_secs(),
        threshold = config.match_threshold,
        "Sweep loop started"
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = sweeper.tick().await {
                    error!(error = %e, "sweep failed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }
}

fn print_matches(matches: &[MatchRow]) {
    for row in matches {
        println!(
            "{:>6.2}  user {}  job {}  {}",
            row.score,
            row.user_id,
            row.job_id,
            row.analysis.as_deref().unwrap_or("")
        );
    }
    println!("{} admitted", matches.len());
}
