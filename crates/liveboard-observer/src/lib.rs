//! Read API server for the Liveboard score ledger.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`GET /api/stats`** -- the ranked top-5 leaderboard plus aggregate
//!   totals, in the shape the dashboard consumes
//! - **`GET /db`** -- the full ledger dump (debug/admin, unfiltered)
//!
//! # Architecture
//!
//! Handlers read the shared in-memory [`ScoreLedger`] behind a
//! [`tokio::sync::RwLock`]; the single writer task holds the write lock
//! only for the duration of one event apply, so reads observe either a
//! fully pre-event or fully post-event ledger, never a torn record.
//! Handlers are infallible: the read API always returns best-effort
//! current state (zeros on a fresh ledger) and never surfaces transport
//! or persistence faults to consumers.
//!
//! [`ScoreLedger`]: liveboard_ledger::ScoreLedger

pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
