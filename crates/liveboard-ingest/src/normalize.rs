//! Normalization of heterogeneous upstream payloads.
//!
//! Each field of the canonical event is resolved through an explicit,
//! ordered list of legacy field paths, tried in priority order until one
//! yields a usable value. Missing optional fields fall back to documented
//! placeholders; only an unrecognized event kind is an error.

use liveboard_types::{
    ANONYMOUS_NICKNAME, EngagementEvent, EventKind, SENTINEL_PARTICIPANT_ID,
};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Legacy field candidate chains
// ---------------------------------------------------------------------------
//
// Newer connector versions wrap identity in a `user` object; older ones
// put it at the event root. Chains list the newest shape first. A path
// segment that parses as an integer indexes into an array.

/// Participant identifier candidates.
const ID_PATHS: &[&[&str]] = &[&["user", "userId"], &["userId"]];

/// Display name candidates.
const NICKNAME_PATHS: &[&[&str]] = &[
    &["user", "uniqueId"],
    &["uniqueId"],
    &["user", "nickname"],
    &["nickname"],
];

/// Avatar URL candidates.
const AVATAR_PATHS: &[&[&str]] = &[
    &["user", "profilePicture", "urls", "0"],
    &["profilePictureUrl"],
    &["user", "avatarUrl"],
];

/// Batched like count candidates.
const LIKE_COUNT_PATHS: &[&[&str]] = &[&["likeCount"]];

/// Gift repeat count candidates.
const REPEAT_COUNT_PATHS: &[&[&str]] = &[&["repeatCount"]];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The single failure mode of normalization.
///
/// Everything else degrades to a placeholder; an event whose kind cannot
/// be determined carries no scorable meaning and is dropped by the caller
/// with a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// The wire tag did not match any scored engagement kind.
    #[error("unrecognized event kind tag: {0:?}")]
    UnknownKind(String),
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Convert one raw upstream payload into a canonical [`EngagementEvent`].
///
/// # Resolution rules
///
/// - Participant id: first non-empty hit in [`ID_PATHS`]; numeric ids are
///   stringified. Full miss assigns the fixed sentinel id, so the event
///   still contributes rather than being lost.
/// - Nickname: first non-empty hit in [`NICKNAME_PATHS`], else the
///   `"Anonymous"` placeholder.
/// - Avatar: first non-empty hit in [`AVATAR_PATHS`], else empty.
/// - Magnitude: per-kind count field (like count, gift repeat count);
///   absent, non-numeric, or non-positive values clamp to 1. Comments and
///   shares always carry magnitude 1.
///
/// # Errors
///
/// Returns [`NormalizeError::UnknownKind`] when `kind_tag` is not one of
/// the scored wire tags.
pub fn normalize(kind_tag: &str, payload: &Value) -> Result<EngagementEvent, NormalizeError> {
    let kind = EventKind::from_tag(kind_tag)
        .ok_or_else(|| NormalizeError::UnknownKind(kind_tag.to_owned()))?;

    let participant_id =
        first_scalar(payload, ID_PATHS).unwrap_or_else(|| SENTINEL_PARTICIPANT_ID.to_owned());
    let nickname =
        first_text(payload, NICKNAME_PATHS).unwrap_or_else(|| ANONYMOUS_NICKNAME.to_owned());
    let avatar = first_text(payload, AVATAR_PATHS).unwrap_or_default();

    let magnitude = match kind {
        EventKind::Like => count_at(payload, LIKE_COUNT_PATHS),
        EventKind::Gift => count_at(payload, REPEAT_COUNT_PATHS),
        EventKind::Comment | EventKind::Share => 1,
    };

    let gift_name = match kind {
        EventKind::Gift => resolve_gift_name(payload),
        _ => None,
    };

    Ok(EngagementEvent {
        kind,
        participant_id,
        nickname,
        avatar,
        magnitude,
        gift_name,
    })
}

/// Gift label: explicit `giftName`, else derived from a numeric `giftId`.
fn resolve_gift_name(payload: &Value) -> Option<String> {
    if let Some(name) = first_text(payload, &[&["giftName"]]) {
        return Some(name);
    }
    value_at(payload, &["giftId"])
        .and_then(Value::as_u64)
        .map(|id| format!("Gift#{id}"))
}

// ---------------------------------------------------------------------------
// Path walking
// ---------------------------------------------------------------------------

/// Walk a path of object keys (or array indices) into a payload.
fn value_at<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(payload, |current, segment| {
        segment.parse::<usize>().map_or_else(
            |_| current.get(*segment),
            |index| current.get(index),
        )
    })
}

/// First candidate path that resolves to a non-empty string.
fn first_text(payload: &Value, candidates: &[&[&str]]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|path| value_at(payload, path))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_owned)
}

/// First candidate path that resolves to a non-empty string or a number.
///
/// Some connector versions deliver numeric participant ids; those are
/// stringified so the map key stays stable across versions.
fn first_scalar(payload: &Value, candidates: &[&[&str]]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|path| value_at(payload, path))
        .find_map(|value| match value {
            Value::String(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
}

/// Resolve a count field, clamping absent or non-positive values to 1.
fn count_at(payload: &Value, candidates: &[&[&str]]) -> u64 {
    candidates
        .iter()
        .filter_map(|path| value_at(payload, path))
        .find_map(Value::as_u64)
        .filter(|count| *count > 0)
        .unwrap_or(1)
}
