//! The score ledger: the single owner of all participant mutation.
//!
//! # Design
//!
//! - **Single writer**: `apply` takes `&mut self`; the server funnels all
//!   events through one consumer task so applies are strictly ordered.
//! - **Monotonic**: points and counters only grow, with saturating math.
//! - **Atomic per event**: one record is updated in place under the
//!   mutable borrow; readers never observe a half-applied event because
//!   access is mediated by a lock around the whole ledger.
//! - **No deduplication**: replayed upstream events double-count.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use liveboard_types::{EngagementEvent, EventKind, LedgerSnapshot, ParticipantRecord};

/// Flat points awarded per comment, regardless of magnitude.
const COMMENT_POINTS: u64 = 100;
/// Flat points awarded per share, regardless of magnitude.
const SHARE_POINTS: u64 = 300;
/// Points awarded per gift unit, multiplied by the repeat count.
const GIFT_POINTS: u64 = 1000;

/// The authoritative mapping of participant id to aggregate record.
///
/// Created once at process start (from the persisted snapshot or empty),
/// mutated only through [`apply`](Self::apply), and never destroyed during
/// the process lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreLedger {
    /// All participant records keyed by external identifier.
    users: BTreeMap<String, ParticipantRecord>,
    /// Next creation sequence number handed to an unseen participant.
    next_seen_seq: u64,
}

impl ScoreLedger {
    /// Create a new empty ledger.
    pub const fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            next_seen_seq: 0,
        }
    }

    /// Number of participant records.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the ledger has no records.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up a participant record by id.
    pub fn get(&self, participant_id: &str) -> Option<&ParticipantRecord> {
        self.users.get(participant_id)
    }

    /// All records keyed by participant id, in key order.
    pub const fn users(&self) -> &BTreeMap<String, ParticipantRecord> {
        &self.users
    }

    /// Apply one normalized event to the ledger.
    ///
    /// Always succeeds for a well-typed event: an unseen participant gets
    /// a zeroed record (with the next creation sequence number) before the
    /// event is folded in. Identity fields are last-write-wins, except an
    /// empty incoming value never erases a non-empty stored one. Returns
    /// the updated record.
    pub fn apply(&mut self, event: &EngagementEvent) -> &ParticipantRecord {
        let seq = self.next_seen_seq;
        let record = match self.users.entry(event.participant_id.clone()) {
            Entry::Vacant(vacant) => {
                self.next_seen_seq = seq.saturating_add(1);
                vacant.insert(ParticipantRecord::new(seq))
            }
            Entry::Occupied(occupied) => occupied.into_mut(),
        };

        if !event.nickname.is_empty() {
            record.nickname.clone_from(&event.nickname);
        }
        if !event.avatar.is_empty() {
            record.avatar.clone_from(&event.avatar);
        }

        // Magnitude is guaranteed >= 1 by the normalizer; clamp anyway so
        // a hand-built event cannot zero out a contribution.
        let magnitude = event.magnitude.max(1);

        match event.kind {
            EventKind::Like => {
                record.points = record.points.saturating_add(magnitude);
                record.likes = record.likes.saturating_add(magnitude);
            }
            EventKind::Gift => {
                record.points = record
                    .points
                    .saturating_add(GIFT_POINTS.saturating_mul(magnitude));
                record.gifts_sent = record.gifts_sent.saturating_add(magnitude);
            }
            EventKind::Comment => {
                record.points = record.points.saturating_add(COMMENT_POINTS);
                record.comments = record.comments.saturating_add(1);
            }
            EventKind::Share => {
                record.points = record.points.saturating_add(SHARE_POINTS);
                record.shares = record.shares.saturating_add(1);
            }
        }

        record
    }

    /// Rebuild a ledger from a persisted snapshot.
    ///
    /// Creation sequence numbers are renumbered densely in (stored seq,
    /// participant id) order. Snapshots written by this build come back
    /// unchanged; legacy documents where every record carried seq 0 get a
    /// deterministic ordering by participant id instead of whatever the
    /// old store happened to iterate.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let mut ordered: Vec<(String, ParticipantRecord)> = snapshot.users.into_iter().collect();
        ordered.sort_by(|a, b| {
            a.1.first_seen_seq
                .cmp(&b.1.first_seen_seq)
                .then_with(|| a.0.cmp(&b.0))
        });

        let mut users = BTreeMap::new();
        let mut next_seen_seq: u64 = 0;
        for (id, mut record) in ordered {
            record.first_seen_seq = next_seen_seq;
            next_seen_seq = next_seen_seq.saturating_add(1);
            users.insert(id, record);
        }

        Self {
            users,
            next_seen_seq,
        }
    }

    /// Export the current state as a snapshot document.
    ///
    /// The caller (the persistence layer) stamps `saved_at`.
    pub fn to_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            users: self.users.clone(),
            saved_at: None,
        }
    }
}
