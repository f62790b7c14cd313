//! The JSON snapshot store.
//!
//! One document, `{ "users": { <participantId>: record }, "saved_at": ts }`,
//! pretty-printed for painless inspection during a live show. Writes are
//! full-document replacements; the ledger is small enough that delta
//! encoding is not worth the recovery complexity.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use liveboard_ledger::ScoreLedger;
use liveboard_types::LedgerSnapshot;
use tracing::{debug, info, warn};

/// Suffix of the temporary file written before the atomic rename.
const TMP_SUFFIX: &str = ".tmp";

/// Errors that can occur while writing a snapshot.
///
/// Load has no error type by design: every failure mode degrades to an
/// empty ledger.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure while writing or renaming the snapshot.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The ledger could not be serialized.
    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed persistence for the score ledger.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    /// Path of the snapshot document.
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store backed by the given snapshot path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted ledger, degrading to empty on any failure.
    ///
    /// A missing file is the normal first-run case; an unreadable or
    /// unparseable file is logged and treated as "no prior state" so a
    /// corrupt snapshot can never hold the process hostage at startup.
    pub fn load(&self) -> ScoreLedger {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no snapshot found, starting empty");
                return ScoreLedger::new();
            }
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    %error,
                    "snapshot unreadable, starting empty"
                );
                return ScoreLedger::new();
            }
        };

        match serde_json::from_slice::<LedgerSnapshot>(&bytes) {
            Ok(snapshot) => {
                info!(
                    path = %self.path.display(),
                    participants = snapshot.len(),
                    "snapshot loaded"
                );
                ScoreLedger::from_snapshot(snapshot)
            }
            Err(error) => {
                warn!(
                    path = %self.path.display(),
                    %error,
                    "snapshot corrupt, starting empty"
                );
                ScoreLedger::new()
            }
        }
    }

    /// Durably write the full ledger.
    ///
    /// The document is written to a sibling temporary file, flushed, and
    /// renamed over the target, so readers of the path always see either
    /// the previous snapshot or the new one, never a torn write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on serialization or filesystem failure. The
    /// caller logs and keeps serving from memory; the next flush retries.
    pub fn save(&self, ledger: &ScoreLedger) -> Result<(), StoreError> {
        let mut snapshot = ledger.to_snapshot();
        snapshot.saved_at = Some(Utc::now());
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        let tmp_path = self.tmp_path();
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        debug!(
            path = %self.path.display(),
            participants = ledger.len(),
            bytes = bytes.len(),
            "snapshot written"
        );
        Ok(())
    }

    /// Sibling temporary path used for the atomic replace.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(TMP_SUFFIX);
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use liveboard_types::{EngagementEvent, EventKind};

    use super::*;

    fn populated_ledger() -> ScoreLedger {
        let mut ledger = ScoreLedger::new();
        ledger.apply(&EngagementEvent::simple(EventKind::Like, "u1", "Ada").with_magnitude(5));
        ledger.apply(&EngagementEvent::simple(EventKind::Gift, "u2", "Bea").with_magnitude(2));
        ledger
    }

    #[test]
    fn load_on_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_on_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let _ = fs::write(&path, b"{ not json");
        let store = SnapshotStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data.json"));

        let ledger = populated_ledger();
        assert!(store.save(&ledger).is_ok());

        let restored = store.load();
        assert_eq!(restored, ledger);
    }

    #[test]
    fn save_replaces_rather_than_appends() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data.json"));

        let mut ledger = populated_ledger();
        assert!(store.save(&ledger).is_ok());
        ledger.apply(&EngagementEvent::simple(EventKind::Comment, "u1", "Ada"));
        assert!(store.save(&ledger).is_ok());

        let restored = store.load();
        assert_eq!(restored.get("u1").map(|r| r.points), Some(105));
    }

    #[test]
    fn temp_file_does_not_linger_after_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data.json"));
        assert!(store.save(&populated_ledger()).is_ok());
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn document_uses_users_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data.json"));
        assert!(store.save(&populated_ledger()).is_ok());

        let text = fs::read_to_string(store.path()).unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap_or_default();
        assert!(value.get("users").and_then(|u| u.get("u1")).is_some());
        assert!(value.get("saved_at").is_some());
    }
}
