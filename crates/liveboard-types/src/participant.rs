//! The per-participant aggregate score record.

use serde::{Deserialize, Serialize};

/// Sentinel participant identifier assigned when no identity field in an
/// upstream payload resolves.
///
/// Known risk: every id-less event pools onto this one record. The
/// alternative (dropping such events) was rejected because
/// malformed-but-recoverable events should still contribute.
pub const SENTINEL_PARTICIPANT_ID: &str = "unknown";

/// Placeholder display name assigned when no name field resolves.
///
/// The leaderboard projection filters records still carrying this
/// placeholder, so anonymous contributions count toward nothing visible.
pub const ANONYMOUS_NICKNAME: &str = "Anonymous";

/// Aggregate engagement state for one participant.
///
/// One record exists per distinct participant identifier; the identifier
/// itself is the map key in the ledger and the snapshot document, not a
/// field of the record.
///
/// # Invariants
///
/// - `points` never decreases across the record's lifetime.
/// - Each kind counter never decreases.
/// - `first_seen_seq` is assigned once at creation and never changes.
///
/// All fields default to zero/empty so records written by older snapshot
/// variants (which omitted counters they had never incremented) load
/// cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantRecord {
    /// Display name, last-write-wins from incoming events.
    pub nickname: String,
    /// Avatar URL, last-write-wins from incoming events.
    pub avatar: String,
    /// Cumulative like count (weighted by batch magnitude).
    pub likes: u64,
    /// Cumulative gift count (weighted by repeat count).
    pub gifts_sent: u64,
    /// Cumulative comment count.
    pub comments: u64,
    /// Cumulative share count.
    pub shares: u64,
    /// Sum of all weighted point contributions ever applied.
    pub points: u64,
    /// Creation order within the ledger, used for deterministic
    /// leaderboard tie-breaking. Persisted so ordering survives restart.
    pub first_seen_seq: u64,
}

impl ParticipantRecord {
    /// Create a zeroed record with the given creation sequence number.
    pub const fn new(first_seen_seq: u64) -> Self {
        Self {
            nickname: String::new(),
            avatar: String::new(),
            likes: 0,
            gifts_sent: 0,
            comments: 0,
            shares: 0,
            points: 0,
            first_seen_seq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_record_without_counters_deserializes() {
        // Older snapshot variants only wrote the counters they had touched.
        let json = r#"{"nickname":"Ada","avatar":"","likes":12,"points":12}"#;
        let record: ParticipantRecord = serde_json::from_str(json).unwrap_or_default();
        assert_eq!(record.nickname, "Ada");
        assert_eq!(record.likes, 12);
        assert_eq!(record.points, 12);
        assert_eq!(record.comments, 0);
        assert_eq!(record.first_seen_seq, 0);
    }

    #[test]
    fn record_round_trips_camel_case() {
        let mut record = ParticipantRecord::new(3);
        record.nickname = String::from("Ada");
        record.gifts_sent = 2;
        let json = serde_json::to_value(&record).unwrap_or_default();
        assert_eq!(json.get("giftsSent").and_then(serde_json::Value::as_u64), Some(2));
        assert_eq!(json.get("firstSeenSeq").and_then(serde_json::Value::as_u64), Some(3));
    }
}
