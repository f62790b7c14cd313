//! Shared type definitions for the Liveboard engagement ledger.
//!
//! This crate is the single source of truth for all types used across the
//! Liveboard workspace: canonical engagement events, participant score
//! records, the persisted snapshot document, and the leaderboard projection
//! served by the read API.
//!
//! # Modules
//!
//! - [`events`] -- Canonical [`EngagementEvent`] and its [`EventKind`] tag
//! - [`participant`] -- The per-participant [`ParticipantRecord`] aggregate
//! - [`snapshot`] -- The persisted [`LedgerSnapshot`] document
//! - [`leaderboard`] -- The derived [`Leaderboard`] read projection

pub mod events;
pub mod leaderboard;
pub mod participant;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use events::{EngagementEvent, EventKind};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use participant::{ANONYMOUS_NICKNAME, ParticipantRecord, SENTINEL_PARTICIPANT_ID};
pub use snapshot::LedgerSnapshot;
