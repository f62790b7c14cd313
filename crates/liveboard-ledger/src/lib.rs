//! Authoritative score ledger and leaderboard projection for Liveboard.
//!
//! Every engagement event in the system is accounted for through this
//! crate. Points are only ever added, never removed, and every mutation
//! flows through [`ScoreLedger::apply`] so there is exactly one place
//! where the weight table lives.
//!
//! # Architecture
//!
//! - [`ledger`] -- The [`ScoreLedger`]: participant map plus the apply
//!   operation that folds events into records.
//! - [`project`] -- The read-only leaderboard projection.
//!
//! # Weight Table
//!
//! Fixed at compile time, not configurable at runtime:
//!
//! | Kind | Points | Counter |
//! |------|--------|---------|
//! | Like | `+magnitude` | `likes += magnitude` |
//! | Gift | `+1000 * magnitude` | `gifts_sent += magnitude` |
//! | Comment | `+100` (flat) | `comments += 1` |
//! | Share | `+300` (flat) | `shares += 1` |
//!
//! # Deduplication
//!
//! The ledger performs none. Applying the same event twice double-counts;
//! upstream delivery is at-least-once and this boundary is deliberate.
//! Idempotency exists only at snapshot-reload granularity.

pub mod ledger;
pub mod project;

// Re-export primary types at crate root.
pub use ledger::ScoreLedger;
pub use project::{DEFAULT_TOP_N, project};
