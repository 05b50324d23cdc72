//! Search results.

use serde::Serialize;

use crate::domain::TeraId;

/// A path through the graph with its aggregate fare and time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Teras from origin to destination, both inclusive.
    pub path: Vec<TeraId>,
    /// Sum of the edge fares along the path.
    pub total_fare: f64,
    /// Sum of the edge times along the path, in minutes.
    pub total_time: f64,
}

impl Itinerary {
    pub fn new(path: Vec<TeraId>, total_fare: f64, total_time: f64) -> Self {
        Self {
            path,
            total_fare,
            total_time,
        }
    }

    pub fn origin(&self) -> Option<&TeraId> {
        self.path.first()
    }

    pub fn destination(&self) -> Option<&TeraId> {
        self.path.last()
    }

    /// Number of edges travelled.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Outcome of a route search.
///
/// Either nothing was found (unknown endpoint or no connection), or there
/// is a best itinerary and possibly a second-best one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathResult {
    best: Option<Itinerary>,
    second_best: Option<Itinerary>,
}

impl PathResult {
    /// No route between the endpoints.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Origin and destination are the same tera.
    pub fn trivial(id: TeraId) -> Self {
        Self {
            best: Some(Itinerary::new(vec![id], 0.0, 0.0)),
            second_best: None,
        }
    }

    pub fn found(best: Itinerary, second_best: Option<Itinerary>) -> Self {
        Self {
            best: Some(best),
            second_best,
        }
    }

    pub fn is_found(&self) -> bool {
        self.best.is_some()
    }

    pub fn best(&self) -> Option<&Itinerary> {
        self.best.as_ref()
    }

    pub fn second_best(&self) -> Option<&Itinerary> {
        self.second_best.as_ref()
    }

    /// The best path; empty when nothing was found.
    pub fn path(&self) -> &[TeraId] {
        self.best.as_ref().map(|b| b.path.as_slice()).unwrap_or(&[])
    }

    pub fn total_fare(&self) -> Option<f64> {
        self.best.as_ref().map(|b| b.total_fare)
    }

    pub fn total_time(&self) -> Option<f64> {
        self.best.as_ref().map(|b| b.total_time)
    }
}
