//! Canonical engagement event types.
//!
//! Upstream live-event payloads arrive in several historical shapes with
//! inconsistent field names. The ingest layer normalizes all of them into
//! one [`EngagementEvent`] carrying an [`EventKind`] tag, a participant
//! identity, and a magnitude. Everything downstream of the normalizer
//! (ledger, projector, diagnostics) speaks only this shape.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// The four engagement kinds the ledger scores.
///
/// The wire tags delivered by the upstream connector are `like`, `gift`,
/// `chat` (mapped to [`EventKind::Comment`]), and `share`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A like tap. May arrive batched with a count greater than one.
    Like,
    /// A virtual gift. May arrive with a repeat count greater than one.
    Gift,
    /// A chat comment.
    Comment,
    /// A rebroadcast/share of the stream.
    Share,
}

impl EventKind {
    /// Resolve an upstream wire tag to a kind.
    ///
    /// Returns `None` for tags the system does not score; callers drop
    /// such events with a diagnostic and they never reach the ledger.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "like" => Some(Self::Like),
            "gift" => Some(Self::Gift),
            "chat" | "comment" => Some(Self::Comment),
            "share" => Some(Self::Share),
            _ => None,
        }
    }

    /// The canonical lowercase name, used in log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Gift => "gift",
            Self::Comment => "comment",
            Self::Share => "share",
        }
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EngagementEvent
// ---------------------------------------------------------------------------

/// One normalized audience action, ready to be applied to the ledger.
///
/// Produced exclusively by the normalizer. Identity fields carry the
/// placeholder values the normalizer assigns when the upstream payload
/// omits them; `magnitude` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementEvent {
    /// Which engagement kind this event represents.
    pub kind: EventKind,
    /// Stable external participant identifier (sentinel when unresolvable).
    pub participant_id: String,
    /// Display name as reported by this event (placeholder when absent).
    pub nickname: String,
    /// Avatar URL as reported by this event (empty when absent).
    pub avatar: String,
    /// Batched multiplier: like count or gift repeat count. Always >= 1.
    /// Comment and Share scoring ignores it.
    pub magnitude: u64,
    /// Gift label, present only on [`EventKind::Gift`] events. Used in
    /// diagnostics, never in scoring.
    pub gift_name: Option<String>,
}

impl EngagementEvent {
    /// Build an event with placeholder-free identity and magnitude 1.
    ///
    /// Convenience for tests and synthetic traffic; real events come from
    /// the normalizer.
    pub fn simple(kind: EventKind, participant_id: &str, nickname: &str) -> Self {
        Self {
            kind,
            participant_id: participant_id.to_owned(),
            nickname: nickname.to_owned(),
            avatar: String::new(),
            magnitude: 1,
            gift_name: None,
        }
    }

    /// Set the magnitude, clamping non-positive values to 1.
    #[must_use]
    pub const fn with_magnitude(mut self, magnitude: u64) -> Self {
        self.magnitude = if magnitude == 0 { 1 } else { magnitude };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_resolution_accepts_known_kinds() {
        assert_eq!(EventKind::from_tag("like"), Some(EventKind::Like));
        assert_eq!(EventKind::from_tag("GIFT"), Some(EventKind::Gift));
        assert_eq!(EventKind::from_tag("chat"), Some(EventKind::Comment));
        assert_eq!(EventKind::from_tag("share"), Some(EventKind::Share));
    }

    #[test]
    fn tag_resolution_rejects_unknown_kinds() {
        assert_eq!(EventKind::from_tag("follow"), None);
        assert_eq!(EventKind::from_tag(""), None);
    }

    #[test]
    fn with_magnitude_clamps_zero_to_one() {
        let event = EngagementEvent::simple(EventKind::Like, "u1", "Ada").with_magnitude(0);
        assert_eq!(event.magnitude, 1);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&EventKind::Comment).unwrap_or_default();
        assert_eq!(json, "\"comment\"");
    }
}
