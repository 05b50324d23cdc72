//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::TeraId;
use crate::graph::GraphSnapshot;
use crate::planner::{Itinerary, OptimizeBy};
use crate::teras::TeraDirectory;

/// Query string for `/api/search`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Origin tera id or name
    pub from: Option<String>,

    /// Destination tera id or name
    pub to: Option<String>,

    /// `fare`, `time` or `stops` (defaults to `fare`)
    pub optimize_by: Option<String>,

    /// Include the resolved ids and raw path in the response
    #[serde(default)]
    pub debug: bool,
}

/// A route rendered for display: names and map coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteView {
    /// Tera names in travel order
    pub path: Vec<String>,

    /// `[lat, lng]` of every tera on the path that has a location
    pub coordinates: Vec<[f64; 2]>,

    pub total_fare: f64,
    pub total_time: f64,
}

impl RouteView {
    /// Render an itinerary, falling back to the id for unnamed teras.
    pub fn from_itinerary(itinerary: &Itinerary, directory: &TeraDirectory) -> Self {
        let path = itinerary
            .path
            .iter()
            .map(|id| {
                directory
                    .name_of(id)
                    .map_or_else(|| id.to_string(), str::to_string)
            })
            .collect();
        let coordinates = itinerary
            .path
            .iter()
            .filter_map(|id| directory.coordinate_of(id))
            .map(|c| c.as_pair())
            .collect();

        Self {
            path,
            coordinates,
            total_fare: itinerary.total_fare,
            total_time: itinerary.total_time,
        }
    }
}

/// Resolved ids and the raw id path, for `debug=true`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub from_id: TeraId,
    pub to_id: TeraId,
    pub raw_path: Vec<TeraId>,
}

/// Response from `/api/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(flatten)]
    pub route: RouteView,

    pub optimize_by: OptimizeBy,

    /// Always present; `null` when there is no alternative
    pub second_best: Option<RouteView>,

    #[serde(rename = "_debug", skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

/// Query string for `/api/search/teras`.
#[derive(Debug, Default, Deserialize)]
pub struct TeraListQuery {
    /// Name fragment; lists every tera when absent
    pub q: Option<String>,

    /// Maximum results
    pub limit: Option<usize>,
}

/// Response from `/api/_admin/refresh-graph`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub message: String,
    pub revision: u64,
    pub built_at: DateTime<Utc>,
    pub teras: usize,
    pub routes: usize,
    pub edges: usize,

    /// Route weights that were replaced with zero
    pub warnings: Vec<String>,
}

impl RefreshResponse {
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        Self {
            message: "Graph refreshed".to_string(),
            revision: snapshot.revision(),
            built_at: snapshot.built_at(),
            teras: snapshot.directory().len(),
            routes: snapshot.route_count(),
            edges: snapshot.graph().edge_count(),
            warnings: snapshot.warnings().iter().map(ToString::to_string).collect(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, RouteRecord, Tera};
    use crate::teras::Dataset;

    fn id(s: &str) -> TeraId {
        TeraId::parse(s).unwrap()
    }

    fn directory() -> TeraDirectory {
        TeraDirectory::new(&[
            Tera::new(id("t1"), "Piassa").with_coordinate(Coordinate::new(9.03, 38.75)),
            Tera::new(id("t2"), "Mexico"),
        ])
    }

    #[test]
    fn route_view_uses_names_and_known_coordinates() {
        let it = Itinerary::new(vec![id("t1"), id("t2"), id("t9")], 12.0, 20.0);
        let view = RouteView::from_itinerary(&it, &directory());

        assert_eq!(view.path, vec!["Piassa", "Mexico", "t9"]);
        assert_eq!(view.coordinates, vec![[9.03, 38.75]]);
        assert_eq!((view.total_fare, view.total_time), (12.0, 20.0));
    }

    #[test]
    fn search_response_shape() {
        let it = Itinerary::new(vec![id("t1"), id("t2")], 5.0, 7.0);
        let response = SearchResponse {
            route: RouteView::from_itinerary(&it, &directory()),
            optimize_by: OptimizeBy::Time,
            second_best: None,
            debug: None,
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "path": ["Piassa", "Mexico"],
                "coordinates": [[9.03, 38.75]],
                "totalFare": 5.0,
                "totalTime": 7.0,
                "optimizeBy": "time",
                "secondBest": null,
            })
        );
    }

    #[test]
    fn debug_info_is_underscored() {
        let it = Itinerary::new(vec![id("t1"), id("t2")], 5.0, 7.0);
        let response = SearchResponse {
            route: RouteView::from_itinerary(&it, &directory()),
            optimize_by: OptimizeBy::Fare,
            second_best: None,
            debug: Some(DebugInfo {
                from_id: id("t1"),
                to_id: id("t2"),
                raw_path: it.path.clone(),
            }),
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json["_debug"],
            serde_json::json!({ "fromId": "t1", "toId": "t2", "rawPath": ["t1", "t2"] })
        );
    }

    #[test]
    fn refresh_response_shape() {
        let data = Dataset::new(
            vec![Tera::new(id("t1"), "Piassa"), Tera::new(id("t2"), "Mexico")],
            vec![RouteRecord::new(id("t1"), id("t2"), -4.0, 9.0)],
        );
        let snapshot = GraphSnapshot::build(&data, 3);
        let json = serde_json::to_value(RefreshResponse::from_snapshot(&snapshot)).unwrap();

        assert_eq!(json["revision"], 3);
        assert_eq!(json["teras"], 2);
        assert_eq!(json["routes"], 1);
        assert_eq!(json["edges"], 2);
        assert_eq!(
            json["warnings"],
            serde_json::json!(["route t1 - t2: fare is negative, using 0"])
        );
        let built_at: DateTime<Utc> =
            serde_json::from_value(json["builtAt"].clone()).unwrap();
        assert_eq!(built_at, snapshot.built_at());
    }

    #[test]
    fn search_query_defaults() {
        let q: SearchQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(q.from.is_none());
        assert!(q.optimize_by.is_none());
        assert!(!q.debug);
    }
}
