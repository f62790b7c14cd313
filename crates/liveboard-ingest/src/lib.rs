//! Event normalization and throttled diagnostics for Liveboard.
//!
//! The upstream connector delivers one raw JSON payload per engagement,
//! tagged with the wire event name (`like`, `gift`, `chat`, `share`).
//! Payload shapes vary across connector versions: identity fields moved
//! between the event root and a nested `user` object, and avatar URLs
//! changed representation entirely. This crate flattens all of that into
//! the canonical [`EngagementEvent`] the ledger consumes.
//!
//! # Modules
//!
//! - [`normalize`] -- The [`normalize`](normalize::normalize) operation and
//!   its legacy field candidate chains.
//! - [`throttle`] -- The [`LikeLogThrottle`] rate limiter for per-participant
//!   like progress diagnostics.

pub mod normalize;
pub mod throttle;

// Re-export primary types at crate root.
pub use normalize::{NormalizeError, normalize};
pub use throttle::{LIKE_LOG_DELTA, LIKE_LOG_INTERVAL, LikeLogThrottle, LikeProgress};
