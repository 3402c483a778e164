use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use cityfinder_core::{City, Connection};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod citylist;

/// Hard cap on name-search results; part of the public API contract.
pub const MAX_RESULTS: usize = 100;

#[derive(Clone)]
pub struct AppState {
    pub conn: Arc<Connection>,
}

pub fn build_app(conn: Arc<Connection>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/city/:id", get(city_by_id))
        .route("/city", get(city_by_name))
        .with_state(AppState { conn })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[derive(Deserialize)]
pub struct NameQuery {
    pub query: Option<String>,
}

async fn city_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<City>, StatusCode> {
    match state.conn.find_by_id(id) {
        Some(city) => Ok(Json(city.clone())),
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn city_by_name(
    State(state): State<AppState>,
    Query(params): Query<NameQuery>,
) -> Result<Json<Vec<City>>, (StatusCode, String)> {
    let query = params.query.unwrap_or_default();
    // Blank input means "no results" at this boundary; only a query handed
    // straight to the engine would be rejected.
    if query.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }
    match state.conn.find_by_name(&query, MAX_RESULTS) {
        Ok(cities) => Ok(Json(cities)),
        Err(e) => {
            tracing::error!(error = %e, "name search failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
