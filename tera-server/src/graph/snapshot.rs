//! The current graph snapshot and its atomic replacement.
//!
//! Searches never see a half-built graph: a refresh builds a complete new
//! snapshot off to the side and only then swaps the shared pointer. Readers
//! that grabbed the old snapshot keep using it until they drop it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::domain::TeraId;
use crate::teras::{Dataset, SourceError, TeraDirectory, TeraSource};

use super::{BuildWarning, Graph, build_with_report};

/// An immutable graph plus the tera lookup built from the same data.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    graph: Graph,
    directory: TeraDirectory,
    revision: u64,
    built_at: DateTime<Utc>,
    route_count: usize,
    warnings: Vec<BuildWarning>,
}

impl GraphSnapshot {
    /// A snapshot with no teras (revision 0).
    pub fn empty() -> Self {
        Self {
            graph: Graph::new(),
            directory: TeraDirectory::default(),
            revision: 0,
            built_at: Utc::now(),
            route_count: 0,
            warnings: Vec::new(),
        }
    }

    /// Build a snapshot from a dataset.
    pub fn build(dataset: &Dataset, revision: u64) -> Self {
        let built = build_with_report(&dataset.routes, &dataset.teras);
        Self {
            graph: built.graph,
            directory: TeraDirectory::new(&dataset.teras),
            revision,
            built_at: Utc::now(),
            route_count: built.routes_used,
            warnings: built.warnings,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn directory(&self) -> &TeraDirectory {
        &self.directory
    }

    /// Increases by one with every replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Number of approved routes in the graph.
    pub fn route_count(&self) -> usize {
        self.route_count
    }

    /// Route weights that were zeroed during the build.
    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    /// Resolve a tera given either its id or its name.
    ///
    /// The key is taken as an id if the graph has such a node; otherwise
    /// it is matched against tera names, ignoring case.
    pub fn resolve(&self, key: &str) -> Option<TeraId> {
        if let Ok(id) = TeraId::parse(key)
            && self.graph.contains(&id)
        {
            return Some(id);
        }
        self.directory.resolve_name(key).cloned()
    }
}

/// Shared holder of the current snapshot.
///
/// Cloning is cheap; all clones see the same snapshot.
#[derive(Debug, Clone)]
pub struct GraphStore {
    current: Arc<RwLock<Arc<GraphSnapshot>>>,
    /// Held from load to swap so revisions follow load order.
    refresh: Arc<Mutex<()>>,
}

impl GraphStore {
    /// Create a store holding an empty snapshot.
    pub fn new() -> Self {
        Self::with_snapshot(GraphSnapshot::empty())
    }

    /// Create a store holding `snapshot`.
    pub fn with_snapshot(snapshot: GraphSnapshot) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(snapshot))),
            refresh: Arc::new(Mutex::new(())),
        }
    }

    /// The snapshot searches should run against.
    pub async fn current(&self) -> Arc<GraphSnapshot> {
        self.current.read().await.clone()
    }

    /// Build a new snapshot from `dataset` and make it current.
    pub async fn replace(&self, dataset: &Dataset) -> Arc<GraphSnapshot> {
        let _refresh = self.refresh.lock().await;
        self.install(dataset).await
    }

    async fn install(&self, dataset: &Dataset) -> Arc<GraphSnapshot> {
        let mut snapshot = GraphSnapshot::build(dataset, 0);

        let mut guard = self.current.write().await;
        snapshot.revision = guard.revision + 1;
        let snapshot = Arc::new(snapshot);
        *guard = snapshot.clone();
        drop(guard);

        info!(
            revision = snapshot.revision,
            teras = dataset.teras.len(),
            routes = snapshot.route_count,
            edges = snapshot.graph.edge_count(),
            warnings = snapshot.warnings.len(),
            "graph refreshed"
        );

        snapshot
    }

    /// Reload from `source` and make the result current.
    ///
    /// On failure the existing snapshot stays current and the error is
    /// returned. Overlapping refreshes run one after another, so a slow load
    /// can never overwrite a newer one.
    pub async fn refresh_from<S: TeraSource>(
        &self,
        source: &S,
    ) -> Result<Arc<GraphSnapshot>, SourceError> {
        let _refresh = self.refresh.lock().await;
        let dataset = source.load().await?;
        Ok(self.install(&dataset).await)
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
