//! Tera name lookup.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::domain::{Coordinate, Tera, TeraId};

/// An `{id, name}` projection of a tera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeraSummary {
    pub id: TeraId,
    pub name: String,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    coordinate: Option<Coordinate>,
}

/// Id ↔ name lookup for the teras of one snapshot.
///
/// Name lookups are case-insensitive exact matches. If two teras share a
/// name (ignoring case), the first one listed keeps it.
#[derive(Debug, Clone, Default)]
pub struct TeraDirectory {
    by_id: HashMap<TeraId, Entry>,
    by_name: HashMap<String, TeraId>,
}

impl TeraDirectory {
    /// Build the directory from a tera list.
    pub fn new(teras: &[Tera]) -> Self {
        let mut by_id = HashMap::with_capacity(teras.len());
        let mut by_name = HashMap::with_capacity(teras.len());

        for tera in teras {
            if by_id.contains_key(&tera.id) {
                warn!(id = %tera.id, ignored = %tera.name, "duplicate tera id");
                continue;
            }
            by_id.insert(
                tera.id.clone(),
                Entry {
                    name: tera.name.clone(),
                    coordinate: tera.coordinate,
                },
            );

            let key = normalize(&tera.name);
            match by_name.get(&key) {
                Some(existing) => {
                    warn!(
                        name = %tera.name,
                        kept = %existing,
                        ignored = %tera.id,
                        "duplicate tera name"
                    );
                }
                None => {
                    by_name.insert(key, tera.id.clone());
                }
            }
        }

        Self { by_id, by_name }
    }

    /// Display name of a tera.
    pub fn name_of(&self, id: &TeraId) -> Option<&str> {
        self.by_id.get(id).map(|e| e.name.as_str())
    }

    /// Position of a tera, if known.
    pub fn coordinate_of(&self, id: &TeraId) -> Option<Coordinate> {
        self.by_id.get(id).and_then(|e| e.coordinate)
    }

    /// Look up a tera id by name, ignoring case and surrounding whitespace.
    pub fn resolve_name(&self, name: &str) -> Option<&TeraId> {
        self.by_name.get(&normalize(name))
    }

    /// All teras, sorted by name.
    pub fn list(&self) -> Vec<TeraSummary> {
        let mut all: Vec<TeraSummary> = self
            .by_id
            .iter()
            .map(|(id, e)| TeraSummary {
                id: id.clone(),
                name: e.name.clone(),
            })
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        all
    }

    /// Teras whose name contains `query` (case-insensitive).
    ///
    /// Names starting with the query come first, then alphabetical order.
    /// A blank query matches nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<TeraSummary> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(bool, TeraSummary)> = self
            .by_id
            .iter()
            .filter_map(|(id, e)| {
                let haystack = e.name.to_lowercase();
                haystack.find(&needle).map(|pos| {
                    (
                        pos != 0,
                        TeraSummary {
                            id: id.clone(),
                            name: e.name.clone(),
                        },
                    )
                })
            })
            .collect();

        matches.sort_by(|(a_later, a), (b_later, b)| {
            a_later
                .cmp(b_later)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });

        matches.into_iter().take(limit).map(|(_, s)| s).collect()
    }

    /// Number of teras.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if there are no teras.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
