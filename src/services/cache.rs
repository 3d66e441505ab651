use moka::future::{Cache, CacheBuilder};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::models::Match;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Invalidation error: {0}")]
    Invalidation(String),
}

/// Cache of scored pairs
///
/// Keys carry both record versions, so a write to either record makes older
/// entries unreachable. Upserts additionally drop them eagerly.
pub struct MatchCache {
    inner: Cache<String, Match>,
}

impl MatchCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let inner = CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .support_invalidation_closures()
            .build();

        Self { inner }
    }

    pub async fn get(&self, key: &str) -> Option<Match> {
        let hit = self.inner.get(key).await;
        if hit.is_some() {
            tracing::trace!("Match cache hit: {}", key);
        } else {
            tracing::trace!("Match cache miss: {}", key);
        }
        hit
    }

    pub async fn insert(&self, key: String, value: Match) {
        self.inner.insert(key, value).await;
    }

    /// Drop every cached match of an opportunity
    pub fn invalidate_opportunity(&self, opportunity_id: &str) -> Result<(), CacheError> {
        let id = opportunity_id.to_string();
        self.inner
            .invalidate_entries_if(move |_, cached| cached.opportunity_id == id)
            .map_err(|e| CacheError::Invalidation(format!("{:?}", e)))?;
        tracing::debug!("Invalidated cached matches for opportunity {}", opportunity_id);
        Ok(())
    }

    /// Drop every cached match of a property
    pub fn invalidate_property(&self, property_id: &str) -> Result<(), CacheError> {
        let id = property_id.to_string();
        self.inner
            .invalidate_entries_if(move |_, cached| cached.property_id == id)
            .map_err(|e| CacheError::Invalidation(format!("{:?}", e)))?;
        tracing::debug!("Invalidated cached matches for property {}", property_id);
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.inner.entry_count(),
        }
    }

    /// Apply pending evictions and invalidations
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
    }
}

/// Summary text cache keyed by (record id, content version)
///
/// Decoupled from scoring. The caller supplies the generator; a forced refresh always
/// regenerates and overwrites.
pub struct SummaryCache {
    inner: Cache<String, String>,
}

impl SummaryCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let inner = CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    /// Return the cached summary, or generate and store one
    ///
    /// Generator errors are returned unchanged and nothing is cached.
    pub async fn get_or_generate<F, Fut, E>(
        &self,
        record_id: &str,
        version: u64,
        force_refresh: bool,
        generate: F,
    ) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String, E>>,
    {
        let key = CacheKey::summary(record_id, version);

        if !force_refresh {
            if let Some(summary) = self.inner.get(&key).await {
                tracing::trace!("Summary cache hit: {}", key);
                return Ok(summary);
            }
        }

        let summary = generate().await?;
        self.inner.insert(key, summary.clone()).await;
        Ok(summary)
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a scored pair
    pub fn pair(
        opportunity_id: &str,
        opportunity_version: u64,
        property_id: &str,
        property_version: u64,
    ) -> String {
        format!(
            "match:{}:{}:{}:{}",
            opportunity_id, opportunity_version, property_id, property_version
        )
    }

    /// Build a cache key for a record summary
    pub fn summary(record_id: &str, version: u64) -> String {
        format!("summary:{}:{}", record_id, version)
    }
}
