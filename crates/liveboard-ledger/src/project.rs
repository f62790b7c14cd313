//! Read-only leaderboard projection over the score ledger.
//!
//! Projection never mutates the ledger; the server calls it while holding
//! only a read lock, concurrently with the single writer.

use liveboard_types::{ANONYMOUS_NICKNAME, Leaderboard, LeaderboardEntry, ParticipantRecord};

use crate::ledger::ScoreLedger;

/// Leaderboard length requested by the current dashboard.
pub const DEFAULT_TOP_N: usize = 5;

/// Whether a record qualifies for the public leaderboard.
///
/// Zero-point records and records still carrying an empty or placeholder
/// display name are invisible to readers; they keep accumulating in the
/// ledger and surface as soon as a later event fills in a real name.
fn qualifies(record: &ParticipantRecord) -> bool {
    record.points > 0
        && !record.nickname.trim().is_empty()
        && record.nickname != ANONYMOUS_NICKNAME
}

/// Compute the ranked leaderboard projection.
///
/// Qualifying records are ordered by descending points; ties break by
/// ascending creation sequence (first seen ranks first), which is stable
/// across repeated calls and across restarts. `points_mined` and
/// `total_miners` cover the whole qualifying set, not just the top `n`
/// rows returned.
pub fn project(ledger: &ScoreLedger, n: usize) -> Leaderboard {
    let mut qualifying: Vec<(&String, &ParticipantRecord)> = ledger
        .users()
        .iter()
        .filter(|(_, record)| qualifies(record))
        .collect();

    qualifying.sort_by(|a, b| {
        b.1.points
            .cmp(&a.1.points)
            .then_with(|| a.1.first_seen_seq.cmp(&b.1.first_seen_seq))
    });

    let points_mined = qualifying
        .iter()
        .fold(0_u64, |sum, (_, record)| sum.saturating_add(record.points));
    let total_miners = u64::try_from(qualifying.len()).unwrap_or(u64::MAX);

    let entries = qualifying
        .iter()
        .take(n)
        .map(|(id, record)| LeaderboardEntry::from_record(id, record))
        .collect();

    Leaderboard {
        points_mined,
        total_miners,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use liveboard_types::{EngagementEvent, EventKind};

    use super::*;

    fn ledger_with(events: &[EngagementEvent]) -> ScoreLedger {
        let mut ledger = ScoreLedger::new();
        for event in events {
            ledger.apply(event);
        }
        ledger
    }

    #[test]
    fn empty_ledger_projects_zeros() {
        let board = project(&ScoreLedger::new(), DEFAULT_TOP_N);
        assert_eq!(board.points_mined, 0);
        assert_eq!(board.total_miners, 0);
        assert!(board.entries.is_empty());
    }

    #[test]
    fn entries_are_descending_by_points() {
        let ledger = ledger_with(&[
            EngagementEvent::simple(EventKind::Like, "low", "Low").with_magnitude(10),
            EngagementEvent::simple(EventKind::Gift, "high", "High"),
            EngagementEvent::simple(EventKind::Comment, "mid", "Mid"),
        ]);

        let board = project(&ledger, DEFAULT_TOP_N);
        let points: Vec<u64> = board.entries.iter().map(|e| e.points).collect();
        assert_eq!(points, vec![1000, 100, 10]);
    }

    #[test]
    fn ties_break_by_first_seen_order() {
        let ledger = ledger_with(&[
            EngagementEvent::simple(EventKind::Comment, "second", "Second"),
            EngagementEvent::simple(EventKind::Comment, "first", "First"),
        ]);

        // Both have 100 points; "second" arrived first so it ranks first,
        // regardless of key order.
        let board = project(&ledger, DEFAULT_TOP_N);
        let ids: Vec<&str> = board.entries.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(ids, vec!["second", "first"]);

        // Repeated calls do not reshuffle.
        let again = project(&ledger, DEFAULT_TOP_N);
        assert_eq!(board, again);
    }

    #[test]
    fn zero_point_and_placeholder_records_are_filtered() {
        let mut ledger = ScoreLedger::new();
        ledger.apply(&EngagementEvent::simple(EventKind::Like, "anon", "Anonymous"));
        let mut nameless = EngagementEvent::simple(EventKind::Like, "ghost", "");
        nameless.nickname = String::from("   ");
        ledger.apply(&nameless);
        ledger.apply(&EngagementEvent::simple(EventKind::Like, "real", "Ada"));

        let board = project(&ledger, DEFAULT_TOP_N);
        assert_eq!(board.total_miners, 1);
        assert_eq!(board.points_mined, 1);
        assert_eq!(
            board.entries.first().map(|e| e.user_id.as_str()),
            Some("real")
        );
    }

    #[test]
    fn totals_cover_the_full_qualifying_set_not_just_top_n() {
        let mut events = Vec::new();
        for i in 0..8_u64 {
            events.push(
                EngagementEvent::simple(EventKind::Like, &format!("u{i}"), &format!("User{i}"))
                    .with_magnitude(i.saturating_add(1)),
            );
        }
        let ledger = ledger_with(&events);

        let board = project(&ledger, DEFAULT_TOP_N);
        assert_eq!(board.entries.len(), DEFAULT_TOP_N);
        assert_eq!(board.total_miners, 8);
        // 1 + 2 + ... + 8
        assert_eq!(board.points_mined, 36);
    }

    #[test]
    fn projection_after_snapshot_reload_is_identical() {
        let ledger = ledger_with(&[
            EngagementEvent::simple(EventKind::Gift, "g", "Giver").with_magnitude(2),
            EngagementEvent::simple(EventKind::Comment, "c", "Chatty"),
            EngagementEvent::simple(EventKind::Comment, "c2", "Chattier"),
        ]);

        let before = project(&ledger, DEFAULT_TOP_N);
        let restored = ScoreLedger::from_snapshot(ledger.to_snapshot());
        let after = project(&restored, DEFAULT_TOP_N);
        assert_eq!(before, after);
    }
}
