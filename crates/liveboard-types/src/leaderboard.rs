//! The derived leaderboard projection served by the read API.

use serde::{Deserialize, Serialize};

use crate::participant::ParticipantRecord;

/// One ranked row of the leaderboard.
///
/// A flattened copy of a [`ParticipantRecord`] with its map key attached,
/// in the field names the dashboard consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// External participant identifier.
    pub user_id: String,
    /// Display name.
    pub nickname: String,
    /// Avatar URL (may be empty).
    pub avatar: String,
    /// Total weighted points.
    pub points: u64,
    /// Cumulative like count.
    pub likes: u64,
    /// Cumulative gift count.
    pub gifts_sent: u64,
    /// Cumulative comment count.
    pub comments: u64,
    /// Cumulative share count.
    pub shares: u64,
}

impl LeaderboardEntry {
    /// Flatten a participant record into a leaderboard row.
    pub fn from_record(user_id: &str, record: &ParticipantRecord) -> Self {
        Self {
            user_id: user_id.to_owned(),
            nickname: record.nickname.clone(),
            avatar: record.avatar.clone(),
            points: record.points,
            likes: record.likes,
            gifts_sent: record.gifts_sent,
            comments: record.comments,
            shares: record.shares,
        }
    }
}

/// The ranked read projection returned by `GET /api/stats`.
///
/// `points_mined` and `total_miners` are computed over the full filtered
/// participant set, not just the truncated top rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    /// Sum of points across every qualifying participant.
    pub points_mined: u64,
    /// Number of qualifying participants.
    pub total_miners: u64,
    /// Top rows, descending by points, at most the requested length.
    #[serde(rename = "leaderboard")]
    pub entries: Vec<LeaderboardEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_document_uses_dashboard_field_names() {
        let board = Leaderboard {
            points_mined: 1300,
            total_miners: 2,
            entries: vec![LeaderboardEntry::from_record(
                "u1",
                &ParticipantRecord::new(0),
            )],
        };
        let json = serde_json::to_value(&board).unwrap_or_default();
        assert!(json.get("pointsMined").is_some());
        assert!(json.get("totalMiners").is_some());
        assert!(
            json.get("leaderboard")
                .and_then(serde_json::Value::as_array)
                .is_some()
        );
    }
}
