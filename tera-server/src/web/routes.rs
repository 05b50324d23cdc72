//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::planner::OptimizeBy;
use crate::teras::{SourceError, TeraSummary};

use super::dto::*;
use super::state::AppState;

const DEFAULT_LIST_LIMIT: usize = 10;
const MAX_LIST_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search", get(search_route))
        .route("/api/search/teras", get(list_teras))
        .route("/api/_admin/refresh-graph", post(refresh_graph))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Find the best and second-best route between two teras.
///
/// `from` and `to` may be tera ids or names.
async fn search_route(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let (Some(from), Some(to)) = (non_blank(&query.from), non_blank(&query.to)) else {
        return Err(AppError::BadRequest {
            message: "from and to query params required".to_string(),
        });
    };

    let mode = match query.optimize_by.as_deref() {
        Some(raw) => raw.parse::<OptimizeBy>().map_err(|_| AppError::BadRequest {
            message: "optimizeBy must be fare, time, or stops".to_string(),
        })?,
        None => OptimizeBy::default(),
    };

    let snapshot = state.store.current().await;
    let (Some(from_id), Some(to_id)) = (snapshot.resolve(from), snapshot.resolve(to)) else {
        return Err(AppError::NotFound {
            message: "Unknown from or to tera".to_string(),
        });
    };

    let result = state
        .cache
        .search(&snapshot, &from_id, &to_id, mode, &state.config)
        .await;
    let Some(best) = result.best() else {
        return Err(AppError::NotFound {
            message: "No route found".to_string(),
        });
    };

    let directory = snapshot.directory();
    let response = SearchResponse {
        route: RouteView::from_itinerary(best, directory),
        optimize_by: mode,
        second_best: result
            .second_best()
            .map(|alt| RouteView::from_itinerary(alt, directory)),
        debug: query.debug.then(|| DebugInfo {
            from_id,
            to_id,
            raw_path: best.path.clone(),
        }),
    };

    Ok(Json(response))
}

/// List teras, optionally filtered by a name fragment.
async fn list_teras(
    State(state): State<AppState>,
    Query(query): Query<TeraListQuery>,
) -> Json<Vec<TeraSummary>> {
    let snapshot = state.store.current().await;
    let directory = snapshot.directory();

    let teras = match non_blank(&query.q) {
        Some(q) => {
            let limit = query
                .limit
                .unwrap_or(DEFAULT_LIST_LIMIT)
                .min(MAX_LIST_LIMIT);
            directory.search(q, limit)
        }
        None => {
            let mut all = directory.list();
            if let Some(limit) = query.limit {
                all.truncate(limit);
            }
            all
        }
    };

    Json(teras)
}

/// Reload the dataset and rebuild the graph.
async fn refresh_graph(State(state): State<AppState>) -> Result<Json<RefreshResponse>, AppError> {
    let snapshot = state.refresh_graph().await?;
    Ok(Json(RefreshResponse::from_snapshot(&snapshot)))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::cache::CacheConfig;
    use crate::domain::{Coordinate, RouteRecord, Tera, TeraId};
    use crate::graph::{GraphSnapshot, GraphStore};
    use crate::planner::SearchConfig;
    use crate::teras::{Dataset, JsonFileSource};

    fn id(s: &str) -> TeraId {
        TeraId::parse(s).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                Tera::new(id("x"), "Piassa").with_coordinate(Coordinate::new(9.03, 38.75)),
                Tera::new(id("y"), "Arat Kilo").with_coordinate(Coordinate::new(9.04, 38.76)),
                Tera::new(id("z"), "Sidist Kilo"),
                Tera::new(id("w"), "Lonely"),
            ],
            vec![
                RouteRecord::new(id("x"), id("y"), 10.0, 5.0),
                RouteRecord::new(id("y"), id("z"), 10.0, 5.0),
                RouteRecord::new(id("x"), id("z"), 25.0, 8.0),
            ],
        )
    }

    fn state_with(source: JsonFileSource) -> AppState {
        let store = GraphStore::with_snapshot(GraphSnapshot::build(&dataset(), 1));
        AppState::new(
            store,
            source,
            &CacheConfig::default(),
            SearchConfig::default(),
        )
    }

    fn state() -> AppState {
        state_with(JsonFileSource::new("/nonexistent/teras.json"))
    }

    fn query(from: Option<&str>, to: Option<&str>, mode: Option<&str>) -> SearchQuery {
        SearchQuery {
            from: from.map(String::from),
            to: to.map(String::from),
            optimize_by: mode.map(String::from),
            debug: false,
        }
    }

    async fn search_err(q: SearchQuery) -> (StatusCode, String) {
        let err = search_route(State(state()), Query(q)).await.unwrap_err();
        let message = match &err {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Internal { message } => message.clone(),
        };
        (err.into_response().status(), message)
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn search_by_name_defaults_to_fare() {
        let Json(response) = search_route(
            State(state()),
            Query(query(Some("piassa"), Some("SIDIST KILO"), None)),
        )
        .await
        .unwrap();

        assert_eq!(response.optimize_by, OptimizeBy::Fare);
        assert_eq!(response.route.path, vec!["Piassa", "Arat Kilo", "Sidist Kilo"]);
        assert_eq!(response.route.coordinates, vec![[9.03, 38.75], [9.04, 38.76]]);
        assert_eq!(response.route.total_fare, 20.0);
        assert_eq!(response.route.total_time, 10.0);

        let alt = response.second_best.unwrap();
        assert_eq!(alt.path, vec!["Piassa", "Sidist Kilo"]);
        assert_eq!((alt.total_fare, alt.total_time), (25.0, 8.0));
        assert!(response.debug.is_none());
    }

    #[tokio::test]
    async fn search_by_id_in_stops_mode_with_debug() {
        let mut q = query(Some("x"), Some("z"), Some("stops"));
        q.debug = true;
        let Json(response) = search_route(State(state()), Query(q)).await.unwrap();

        assert_eq!(response.optimize_by, OptimizeBy::Stops);
        assert_eq!(response.route.path, vec!["Piassa", "Sidist Kilo"]);
        assert!(response.second_best.is_none());

        let debug = response.debug.unwrap();
        assert_eq!(debug.from_id, id("x"));
        assert_eq!(debug.to_id, id("z"));
        assert_eq!(debug.raw_path, vec![id("x"), id("z")]);
    }

    #[tokio::test]
    async fn missing_endpoints_are_bad_request() {
        for q in [
            query(None, Some("z"), None),
            query(Some("x"), None, None),
            query(Some("  "), Some("z"), None),
        ] {
            let (status, message) = search_err(q).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "from and to query params required");
        }
    }

    #[tokio::test]
    async fn invalid_mode_is_bad_request() {
        let (status, message) = search_err(query(Some("x"), Some("z"), Some("cheapest"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "optimizeBy must be fare, time, or stops");
    }

    #[tokio::test]
    async fn unknown_tera_is_not_found() {
        let (status, message) = search_err(query(Some("x"), Some("Atlantis"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Unknown from or to tera");
    }

    #[tokio::test]
    async fn unreachable_tera_is_not_found() {
        let (status, message) = search_err(query(Some("x"), Some("lonely"), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "No route found");
    }

    #[tokio::test]
    async fn list_teras_sorted_or_filtered() {
        let Json(all) = list_teras(State(state()), Query(TeraListQuery::default())).await;
        let names: Vec<&str> = all.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Arat Kilo", "Lonely", "Piassa", "Sidist Kilo"]);

        let Json(filtered) = list_teras(
            State(state()),
            Query(TeraListQuery {
                q: Some("kilo".to_string()),
                limit: Some(1),
            }),
        )
        .await;
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Arat Kilo");

        // A bare array of {id, name}.
        let json = serde_json::to_value(&filtered).unwrap();
        assert_eq!(json, serde_json::json!([{ "id": "y", "name": "Arat Kilo" }]));
    }

    #[tokio::test]
    async fn refresh_rebuilds_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "teras": [{{"id": "a", "name": "A"}}, {{"id": "b", "name": "B"}}],
                "routes": [{{"from": "a", "to": "b", "fare": 3, "estimatedTimeMin": "soon"}}]
            }}"#
        )
        .unwrap();
        let state = state_with(JsonFileSource::new(file.path()));
        let before = state.store.current().await.built_at();

        let Json(response) = refresh_graph(State(state.clone())).await.unwrap();
        assert_eq!(response.revision, 2);
        assert_eq!(response.teras, 2);
        assert_eq!(response.routes, 1);
        assert_eq!(response.edges, 2);
        assert_eq!(
            response.warnings,
            vec!["route a - b: time is not numeric, using 0"]
        );
        assert!(response.built_at >= before);

        let Json(found) = search_route(State(state), Query(query(Some("A"), Some("b"), None)))
            .await
            .unwrap();
        assert_eq!(found.route.total_fare, 3.0);
    }

    #[tokio::test]
    async fn refresh_drops_cached_results() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"teras": [{{"id": "a", "name": "A"}}]}}"#).unwrap();
        let state = state_with(JsonFileSource::new(file.path()));
        let old = state.store.current().await;

        let cached = state
            .cache
            .search(&old, &id("x"), &id("z"), OptimizeBy::Fare, &state.config)
            .await;
        state.refresh_graph().await.unwrap();
        let recomputed = state
            .cache
            .search(&old, &id("x"), &id("z"), OptimizeBy::Fare, &state.config)
            .await;

        assert!(!std::sync::Arc::ptr_eq(&cached, &recomputed));
        assert_eq!(cached, recomputed);
    }

    #[tokio::test]
    async fn failed_refresh_is_internal_error_and_keeps_graph() {
        let state = state();
        let err = refresh_graph(State(state.clone())).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(state.store.current().await.revision(), 1);
    }
}
