//! Route records as supplied by the data layer.
//!
//! A route is an undirected connection between two teras with a fare and an
//! estimated travel time. Records arrive from an external store that does
//! not guarantee clean numbers, so the weights are kept as raw JSON values
//! and coerced when the graph is built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TeraId;

/// Moderation status of a route.
///
/// Only approved routes take part in route finding. Parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RouteStatus {
    #[default]
    Approved,
    Pending,
    Rejected,
}

/// Error returned when parsing an unknown route status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route status {0:?}")]
pub struct UnknownStatus(String);

impl FromStr for RouteStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approved" => Ok(RouteStatus::Approved),
            "pending" => Ok(RouteStatus::Pending),
            "rejected" => Ok(RouteStatus::Rejected),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for RouteStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An undirected route between two teras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    #[serde(alias = "fromTera", alias = "fromId", alias = "from_id")]
    pub from: TeraId,

    #[serde(alias = "toTera", alias = "toId", alias = "to_id")]
    pub to: TeraId,

    /// Raw fare value.
    #[serde(default)]
    pub fare: Option<Value>,

    /// Raw travel time estimate in minutes.
    #[serde(default, rename = "estimatedTimeMin", alias = "time", alias = "duration")]
    pub estimated_time: Option<Value>,

    #[serde(default)]
    pub status: RouteStatus,
}

impl RouteRecord {
    /// Create an approved route with numeric weights.
    pub fn new(from: TeraId, to: TeraId, fare: f64, time_mins: f64) -> Self {
        Self {
            from,
            to,
            fare: Some(Value::from(fare)),
            estimated_time: Some(Value::from(time_mins)),
            status: RouteStatus::Approved,
        }
    }

    /// Set the moderation status.
    pub fn with_status(mut self, status: RouteStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns true if this route participates in the graph.
    pub fn is_approved(&self) -> bool {
        self.status == RouteStatus::Approved
    }

    /// The fare, coerced to a usable edge weight.
    pub fn fare(&self) -> Coerced {
        coerce_weight(self.fare.as_ref())
    }

    /// The travel time in minutes, coerced to a usable edge weight.
    pub fn estimated_time(&self) -> Coerced {
        coerce_weight(self.estimated_time.as_ref())
    }
}

/// Why a raw weight could not be used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightIssue {
    /// Absent, null, or a blank string.
    Missing,
    /// Not a number and not a numeric string.
    NotNumeric,
    /// NaN or infinite.
    NotFinite,
    /// Below zero.
    Negative,
}

impl fmt::Display for WeightIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WeightIssue::Missing => "missing",
            WeightIssue::NotNumeric => "not numeric",
            WeightIssue::NotFinite => "not finite",
            WeightIssue::Negative => "negative",
        };
        f.write_str(s)
    }
}

/// A weight after coercion.
///
/// `value` is always finite and non-negative. When the raw value had to be
/// replaced, `value` is zero and `issue` says why.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coerced {
    pub value: f64,
    pub issue: Option<WeightIssue>,
}

impl Coerced {
    fn ok(value: f64) -> Self {
        Self { value, issue: None }
    }

    fn zeroed(issue: WeightIssue) -> Self {
        Self {
            value: 0.0,
            issue: Some(issue),
        }
    }
}

/// Coerce a raw JSON weight into a finite, non-negative number.
///
/// Numbers pass through, numeric strings are parsed, and everything else
/// becomes zero. Never fails.
pub fn coerce_weight(raw: Option<&Value>) -> Coerced {
    let parsed = match raw {
        None | Some(Value::Null) => return Coerced::zeroed(WeightIssue::Missing),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => v,
            None => return Coerced::zeroed(WeightIssue::NotNumeric),
        },
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Coerced::zeroed(WeightIssue::Missing);
            }
            match s.parse::<f64>() {
                Ok(v) => v,
                Err(_) => return Coerced::zeroed(WeightIssue::NotNumeric),
            }
        }
        Some(_) => return Coerced::zeroed(WeightIssue::NotNumeric),
    };

    if !parsed.is_finite() {
        Coerced::zeroed(WeightIssue::NotFinite)
    } else if parsed < 0.0 {
        Coerced::zeroed(WeightIssue::Negative)
    } else {
        // Normalizes -0.0 as well.
        Coerced::ok(parsed + 0.0)
    }
}
