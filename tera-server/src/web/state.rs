//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, SearchCache};
use crate::graph::{GraphSnapshot, GraphStore};
use crate::planner::SearchConfig;
use crate::teras::{JsonFileSource, SourceError};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Current graph snapshot
    pub store: GraphStore,

    /// Where refreshes load the dataset from
    pub source: Arc<JsonFileSource>,

    /// Memoized search results
    pub cache: Arc<SearchCache>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        store: GraphStore,
        source: JsonFileSource,
        cache_config: &CacheConfig,
        config: SearchConfig,
    ) -> Self {
        Self {
            store,
            source: Arc::new(source),
            cache: Arc::new(SearchCache::new(cache_config)),
            config: Arc::new(config),
        }
    }

    /// Reload the dataset, swap in the new graph and drop cached results.
    ///
    /// Shared by the admin endpoint and the periodic refresh task.
    pub async fn refresh_graph(&self) -> Result<Arc<GraphSnapshot>, SourceError> {
        let snapshot = self.store.refresh_from(self.source.as_ref()).await?;
        // Older revisions can no longer be looked up; free the space now.
        self.cache.invalidate_all();
        Ok(snapshot)
    }
}
