//! REST endpoint handlers for the read API.
//!
//! All handlers read from the shared in-memory ledger via [`AppState`];
//! nothing here mutates. Both endpoints are infallible by design: a
//! fresh or empty ledger produces zero totals and an empty leaderboard,
//! never an error.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/stats` | Top-5 leaderboard + aggregate totals |
//! | `GET` | `/db` | Full ledger dump (debug/admin) |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use liveboard_ledger::{DEFAULT_TOP_N, project};
use liveboard_types::{Leaderboard, LedgerSnapshot};

use crate::state::AppState;

/// Return the ranked leaderboard projection.
///
/// Top 5 descending by points, ties broken by first-seen order;
/// `pointsMined` and `totalMiners` cover every qualifying participant.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<Leaderboard> {
    let ledger = state.ledger.read().await;
    Json(project(&ledger, DEFAULT_TOP_N))
}

/// Return the full ledger as the persisted document shape.
///
/// Debug/admin view: no filtering, placeholder and zero-point records
/// included.
pub async fn get_db(State(state): State<Arc<AppState>>) -> Json<LedgerSnapshot> {
    let ledger = state.ledger.read().await;
    Json(ledger.to_snapshot())
}
