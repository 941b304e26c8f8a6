//! Extraction cache — requirements keyed by posting content hash.
//!
//! The cache is injected; the matcher itself never owns one. Failures are logged and
//! treated as misses so a broken cache only costs an extra extractor call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::extraction::{content_hash, JobRequirements, RequirementExtractor};

const REDIS_KEY_PREFIX: &str = "matcher:requirements:";

#[async_trait]
pub trait RequirementsCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<JobRequirements>, AppError>;
    async fn put(&self, key: &str, value: &JobRequirements) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-process cache (bounded, TTL)
// ────────────────────────────────────────────────────────────────────────────

struct CacheEntry {
    stored_at: Instant,
    value: JobRequirements,
}

pub struct InMemoryRequirementsCache {
    capacity: usize,
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl InMemoryRequirementsCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        // A poisoned map is still a valid map.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RequirementsCache for InMemoryRequirementsCache {
    async fn get(&self, key: &str) -> Result<Option<JobRequirements>, AppError> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &JobRequirements) -> Result<(), AppError> {
        let mut entries = self.lock();
        if !entries.contains_key(key) && entries.len() >= self.capacity {
            let ttl = self.ttl;
            entries.retain(|_, e| e.stored_at.elapsed() < ttl);
            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, e)| e.stored_at)
                    .map(|(k, _)| k.clone());
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
        }
        entries.insert(
            key.to_string(),
            CacheEntry {
                stored_at: Instant::now(),
                value: value.clone(),
            },
        );
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Redis cache
// ────────────────────────────────────────────────────────────────────────────

pub struct RedisRequirementsCache {
    client: redis::Client,
    ttl: Duration,
}

impl RedisRequirementsCache {
    pub fn new(client: redis::Client, ttl: Duration) -> Self {
        Self { client, ttl }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, AppError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Cache(format!("redis connect failed: {e}")))
    }
}

#[async_trait]
impl RequirementsCache for RedisRequirementsCache {
    async fn get(&self, key: &str) -> Result<Option<JobRequirements>, AppError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn
            .get(format!("{REDIS_KEY_PREFIX}{key}"))
            .await
            .map_err(|e| AppError::Cache(format!("redis GET failed: {e}")))?;
        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| AppError::Cache(format!("corrupt cached requirements: {e}"))),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &JobRequirements) -> Result<(), AppError> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Cache(format!("serialize requirements: {e}")))?;
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(
            format!("{REDIS_KEY_PREFIX}{key}"),
            json,
            self.ttl.as_secs().max(1),
        )
        .await
        .map_err(|e| AppError::Cache(format!("redis SETEX failed: {e}")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Caching decorator
// ────────────────────────────────────────────────────────────────────────────

/// Serves requirements from the cache when the posting content is unchanged.
/// Failed extractions are not cached, so they are retried on the next sweep.
pub struct CachedExtractor {
    inner: Arc<dyn RequirementExtractor>,
    cache: Arc<dyn RequirementsCache>,
}

impl CachedExtractor {
    pub fn new(inner: Arc<dyn RequirementExtractor>, cache: Arc<dyn RequirementsCache>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl RequirementExtractor for CachedExtractor {
    async fn extract(
        &self,
        title: &str,
        company: &str,
        description: &str,
    ) -> Option<JobRequirements> {
        let key = content_hash(title, company, description);

        match self.cache.get(&key).await {
            Ok(Some(hit)) => {
                debug!(key = %key, "requirements cache hit");
                return Some(hit);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "requirements cache read failed, treating as miss"),
        }

        let extracted = self.inner.extract(title, company, description).await?;
        if let Err(e) = self.cache.put(&key, &extracted).await {
            warn!(error = %e, "requirements cache write failed");
        }
        Some(extracted)
    }
}
