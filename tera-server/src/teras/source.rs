//! Loading teras and routes from the data layer.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{RouteRecord, Tera};

use super::error::SourceError;

/// A full copy of the tera and route records.
///
/// When read from JSON, records that cannot be understood are skipped with a
/// warning; the rest of the dataset still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "lenient_teras")]
    pub teras: Vec<Tera>,
    #[serde(default, deserialize_with = "lenient_routes")]
    pub routes: Vec<RouteRecord>,
}

fn lenient_teras<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Tera>, D::Error> {
    Ok(keep_readable(Option::deserialize(deserializer)?, "tera"))
}

fn lenient_routes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<RouteRecord>, D::Error> {
    Ok(keep_readable(Option::deserialize(deserializer)?, "route"))
}

/// Decode each record on its own, dropping the ones that fail.
fn keep_readable<T: DeserializeOwned>(records: Option<Vec<Value>>, kind: &str) -> Vec<T> {
    records
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(kind, index, error = %e, "skipping unreadable record");
                None
            }
        })
        .collect()
}

impl Dataset {
    pub fn new(teras: Vec<Tera>, routes: Vec<RouteRecord>) -> Self {
        Self { teras, routes }
    }
}

/// Trait for loading the current tera and route records.
///
/// This abstraction lets the snapshot store be refreshed from a file in
/// production and from fixed data in tests.
pub trait TeraSource {
    /// Load every tera and route.
    fn load(&self) -> impl Future<Output = Result<Dataset, SourceError>> + Send;
}

/// Reads a JSON dataset `{"teras": [...], "routes": [...]}` from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the dataset file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TeraSource for JsonFileSource {
    async fn load(&self) -> Result<Dataset, SourceError> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| SourceError::Io {
                    path: self.path.clone(),
                    source: e,
                })?;

        let dataset: Dataset =
            serde_json::from_str(&contents).map_err(|e| SourceError::Json {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        debug!(
            path = %self.path.display(),
            teras = dataset.teras.len(),
            routes = dataset.routes.len(),
            "loaded dataset"
        );

        Ok(dataset)
    }
}

/// Serves a fixed dataset.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    dataset: Dataset,
}

impl InMemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl TeraSource for InMemorySource {
    async fn load(&self) -> Result<Dataset, SourceError> {
        Ok(self.dataset.clone())
    }
}
