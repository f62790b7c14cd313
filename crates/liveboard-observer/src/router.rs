//! Axum router construction for the read API.
//!
//! Assembles the REST routes into a single [`Router`] with CORS
//! middleware enabled so the dashboard can poll from another origin.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the read API.
///
/// - `GET /api/stats` -- leaderboard projection
/// - `GET /db` -- full ledger dump
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/stats", get(handlers::get_stats))
        .route("/db", get(handlers::get_db))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
