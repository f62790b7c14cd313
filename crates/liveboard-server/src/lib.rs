//! Liveboard service wiring: event channel, apply loop, and configuration.
//!
//! The binary in `main.rs` assembles these pieces:
//!
//! ```text
//! connector --> EventSink --> mpsc --> ApplyWorker --> ScoreLedger
//!                                           |               |
//!                                     SnapshotStore    read API (axum)
//! ```
//!
//! The upstream live-event connector is an external collaborator; it is
//! handed an [`EventSink`] and everything downstream of that sink is this
//! workspace's responsibility. One [`worker::ApplyWorker`] task is the
//! single writer; all other tasks only ever read the ledger.

pub mod config;
pub mod sink;
pub mod worker;

// Re-export primary types for convenience.
pub use config::{ConfigError, ServerSettings};
pub use sink::EventSink;
pub use worker::ApplyWorker;
