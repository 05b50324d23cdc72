//! Optimization modes and the edge metrics they rank by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::Edge;

use super::path::Itinerary;

/// Error returned when parsing an unknown optimization mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("optimizeBy must be fare, time, or stops (got {value:?})")]
pub struct InvalidMode {
    value: String,
}

/// What the best route minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizeBy {
    /// Lowest total fare.
    #[default]
    Fare,
    /// Lowest total travel time.
    Time,
    /// Fewest hops; cheaper fare breaks ties.
    Stops,
}

impl OptimizeBy {
    /// Returns the mode's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizeBy::Fare => "fare",
            OptimizeBy::Time => "time",
            OptimizeBy::Stops => "stops",
        }
    }

    /// The edge weight a weighted search should minimize, or `None` for
    /// hop counting.
    pub fn metric(&self) -> Option<Metric> {
        match self {
            OptimizeBy::Fare => Some(Metric::Fare),
            OptimizeBy::Time => Some(Metric::Time),
            OptimizeBy::Stops => None,
        }
    }
}

impl FromStr for OptimizeBy {
    type Err = InvalidMode;

    /// Parse a mode name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fare" => Ok(OptimizeBy::Fare),
            "time" => Ok(OptimizeBy::Time),
            "stops" => Ok(OptimizeBy::Stops),
            _ => Err(InvalidMode {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptimizeBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A summable edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Fare,
    Time,
}

impl Metric {
    /// Weight of a single edge.
    pub fn weight(&self, edge: &Edge) -> f64 {
        match self {
            Metric::Fare => edge.fare,
            Metric::Time => edge.time,
        }
    }

    /// The itinerary's total under this metric.
    pub fn primary(&self, itinerary: &Itinerary) -> f64 {
        match self {
            Metric::Fare => itinerary.total_fare,
            Metric::Time => itinerary.total_time,
        }
    }

    /// The itinerary's total under the other metric.
    pub fn secondary(&self, itinerary: &Itinerary) -> f64 {
        match self {
            Metric::Fare => itinerary.total_time,
            Metric::Time => itinerary.total_fare,
        }
    }
}
