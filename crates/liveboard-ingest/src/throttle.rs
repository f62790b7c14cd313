//! Rate-limited like-progress diagnostics.
//!
//! Like events arrive far too frequently to log individually. The
//! throttle tracks, per participant, the like count at the last emitted
//! line and emits again only after a large enough delta or a long enough
//! silence. State is in-memory only and resets on restart; it is purely
//! advisory and never feeds back into scoring.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::{Duration, Instant};

/// Cumulative like delta that forces an emission.
pub const LIKE_LOG_DELTA: u64 = 100;

/// Silence after which the next like event emits regardless of delta.
pub const LIKE_LOG_INTERVAL: Duration = Duration::from_secs(30);

/// A like-progress line the caller should log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeProgress {
    /// Current cumulative like count for the participant.
    pub likes: u64,
    /// Current cumulative points for the participant.
    pub points: u64,
    /// Likes accumulated since the previous emission.
    pub since_last: u64,
}

/// Per-participant tracking state.
#[derive(Debug, Clone)]
struct TrackingState {
    /// Like count at the last emitted line.
    last_logged_likes: u64,
    /// When the last line was emitted (or tracking began).
    last_logged_at: Instant,
}

/// Per-participant rate limiter for like progress logging.
///
/// The first event for a participant only initializes tracking; nothing
/// is emitted until the delta or elapsed threshold is crossed.
#[derive(Debug, Clone, Default)]
pub struct LikeLogThrottle {
    states: HashMap<String, TrackingState>,
}

impl LikeLogThrottle {
    /// Create an empty throttle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the participant's current totals and decide whether to emit.
    ///
    /// Returns `Some` at most once per threshold crossing; emitting resets
    /// the tracking state to the current totals.
    pub fn maybe_log(
        &mut self,
        participant_id: &str,
        likes: u64,
        points: u64,
    ) -> Option<LikeProgress> {
        self.maybe_log_at(participant_id, likes, points, Instant::now())
    }

    /// [`maybe_log`](Self::maybe_log) with an injected clock, for tests.
    pub fn maybe_log_at(
        &mut self,
        participant_id: &str,
        likes: u64,
        points: u64,
        now: Instant,
    ) -> Option<LikeProgress> {
        match self.states.entry(participant_id.to_owned()) {
            Entry::Vacant(vacant) => {
                vacant.insert(TrackingState {
                    last_logged_likes: likes,
                    last_logged_at: now,
                });
                None
            }
            Entry::Occupied(mut occupied) => {
                let state = occupied.get_mut();
                let since_last = likes.saturating_sub(state.last_logged_likes);
                let elapsed = now.saturating_duration_since(state.last_logged_at);

                if since_last >= LIKE_LOG_DELTA || elapsed > LIKE_LOG_INTERVAL {
                    state.last_logged_likes = likes;
                    state.last_logged_at = now;
                    Some(LikeProgress {
                        likes,
                        points,
                        since_last,
                    })
                } else {
                    None
                }
            }
        }
    }

    /// Number of participants currently tracked.
    pub fn tracked(&self) -> usize {
        self.states.len()
    }
}
