//! Caching layer for route searches.
//!
//! Results are keyed by graph revision as well as the query, so a graph
//! refresh makes every earlier entry unreachable without an explicit flush.
//! Stale revisions age out through the TTL and capacity bound.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::TeraId;
use crate::graph::GraphSnapshot;
use crate::planner::{OptimizeBy, PathResult, Planner, SearchConfig};

/// Cache key for searches: (graph revision, source, target, mode).
type SearchKey = (u64, TeraId, TeraId, OptimizeBy);

/// Configuration for the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// Memoized route searches.
pub struct SearchCache {
    results: MokaCache<SearchKey, Arc<PathResult>>,
}

impl SearchCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let results = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { results }
    }

    /// Search `snapshot`, reusing an earlier result for the same revision
    /// and query when one is cached.
    pub async fn search(
        &self,
        snapshot: &GraphSnapshot,
        source: &TeraId,
        target: &TeraId,
        mode: OptimizeBy,
        config: &SearchConfig,
    ) -> Arc<PathResult> {
        let key = (snapshot.revision(), source.clone(), target.clone(), mode);
        let entry = self
            .results
            .entry(key)
            .or_insert_with(async {
                Arc::new(Planner::new(snapshot.graph(), config).find_path(source, target, mode))
            })
            .await;

        trace!(
            %source,
            %target,
            %mode,
            revision = snapshot.revision(),
            hit = !entry.is_fresh(),
            "search cache lookup"
        );

        entry.into_value()
    }

    /// Approximate number of cached results.
    pub fn entry_count(&self) -> u64 {
        self.results.entry_count()
    }

    /// Drop every cached result.
    pub fn invalidate_all(&self) {
        self.results.invalidate_all();
    }
}
