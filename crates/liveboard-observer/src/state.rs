//! Shared application state for the read API server.

use std::sync::Arc;

use liveboard_ledger::ScoreLedger;
use tokio::sync::RwLock;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// ledger handle is the same one the writer task mutates; handlers take
/// read locks scoped to a single projection or dump.
#[derive(Clone)]
pub struct AppState {
    /// The authoritative in-memory ledger, shared with the writer task.
    pub ledger: Arc<RwLock<ScoreLedger>>,
}

impl AppState {
    /// Create application state around an existing shared ledger.
    pub const fn new(ledger: Arc<RwLock<ScoreLedger>>) -> Self {
        Self { ledger }
    }

    /// Create application state with a fresh empty ledger.
    ///
    /// Convenience for tests; the server wires in the loaded ledger.
    pub fn empty() -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ScoreLedger::new())),
        }
    }
}
