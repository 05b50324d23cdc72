//! Tera (taxi stand) identity and location types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Error returned when parsing an invalid tera identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tera id: {reason}")]
pub struct InvalidTeraId {
    reason: &'static str,
}

/// An opaque, non-empty tera identifier.
///
/// Identifiers come from the external data layer (database object ids,
/// slugs, ...). The graph and the planner only ever compare them for
/// equality and order, so any non-blank string is accepted. Numeric ids
/// in data files are read as their decimal text.
///
/// # Examples
///
/// ```
/// use tera_server::domain::TeraId;
///
/// let piassa = TeraId::parse("piassa").unwrap();
/// assert_eq!(piassa.as_str(), "piassa");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(TeraId::parse("  bole ").unwrap().as_str(), "bole");
///
/// // Blank ids are rejected
/// assert!(TeraId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct TeraId(String);

/// An id as it may appear in a data file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl TeraId {
    /// Parse a tera id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidTeraId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidTeraId {
                reason: "must not be blank",
            });
        }
        Ok(TeraId(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for TeraId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        };
        TeraId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl From<TeraId> for String {
    fn from(id: TeraId) -> Self {
        id.0
    }
}

impl fmt::Debug for TeraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TeraId({})", self.0)
    }
}

impl fmt::Display for TeraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `[lat, lng]` pair, the shape map widgets expect.
    pub fn as_pair(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    /// Read a position from either `{"lat", "lng"}` or a GeoJSON point
    /// (`{"type": "Point", "coordinates": [lng, lat]}`).
    pub fn from_json(value: &Value) -> Option<Self> {
        if let Some([lng, lat]) = value
            .get("coordinates")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
        {
            return Some(Self::new(lat.as_f64()?, lng.as_f64()?)).filter(Self::is_finite);
        }
        let lat = value.get("lat")?.as_f64()?;
        let lng = value.get("lng")?.as_f64()?;
        Some(Self::new(lat, lng)).filter(Self::is_finite)
    }

    fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A named taxi stand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tera {
    #[serde(alias = "_id")]
    pub id: TeraId,
    pub name: String,
    /// Unreadable positions are dropped rather than failing the record.
    #[serde(default, alias = "location", deserialize_with = "lenient_coordinate")]
    pub coordinate: Option<Coordinate>,
}

fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<Coordinate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        let coordinate = Coordinate::from_json(&value);
        if coordinate.is_none() && !value.is_null() {
            warn!(%value, "ignoring unreadable tera location");
        }
        coordinate
    }))
}

impl Tera {
    /// Create a tera without a known position.
    pub fn new(id: TeraId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate: None,
        }
    }

    /// Attach a position.
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }
}
