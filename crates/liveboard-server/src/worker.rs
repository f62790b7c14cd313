//! The single-writer apply loop.
//!
//! Exactly one [`ApplyWorker`] task consumes the event channel, so all
//! ledger mutations happen in arrival order with no interleaving. The
//! worker holds the write lock only while folding one event in; HTTP
//! readers interleave freely between events.
//!
//! Persistence runs on this task as well: either synchronously after
//! every apply, or deferred behind the debounce timer. A failed write is
//! logged and retried on the next flush; the in-memory ledger stays
//! authoritative throughout. Shutdown (channel close) drains remaining
//! events and always performs a final flush.

use std::sync::Arc;

use liveboard_ingest::LikeLogThrottle;
use liveboard_ledger::ScoreLedger;
use liveboard_store::{FlushPolicy, SnapshotStore};
use liveboard_types::{EngagementEvent, EventKind};
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{info, warn};

/// The consumer side of the event pipeline.
pub struct ApplyWorker {
    /// The authoritative ledger, shared read-only with the HTTP layer.
    ledger: Arc<RwLock<ScoreLedger>>,
    /// Snapshot persistence.
    store: SnapshotStore,
    /// When to write snapshots.
    policy: FlushPolicy,
    /// The single-consumer event channel.
    rx: mpsc::Receiver<EngagementEvent>,
    /// Like-progress rate limiter (in-memory, advisory).
    throttle: LikeLogThrottle,
    /// Events applied since startup.
    applied: u64,
}

impl ApplyWorker {
    /// Create a worker over an existing shared ledger and store.
    pub fn new(
        ledger: Arc<RwLock<ScoreLedger>>,
        store: SnapshotStore,
        policy: FlushPolicy,
        rx: mpsc::Receiver<EngagementEvent>,
    ) -> Self {
        Self {
            ledger,
            store,
            policy,
            rx,
            throttle: LikeLogThrottle::new(),
            applied: 0,
        }
    }

    /// Spawn the apply loop on a background task.
    ///
    /// The task runs until every sender is dropped, then drains the
    /// channel, flushes, and exits. The returned handle lets the binary
    /// await a clean shutdown.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run the apply loop to completion.
    pub async fn run(mut self) {
        let mut ticker = self.policy.interval().map(|interval| {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        let mut dirty = false;

        loop {
            tokio::select! {
                maybe_event = self.rx.recv() => match maybe_event {
                    Some(event) => {
                        self.apply_one(&event).await;
                        if self.policy.flush_on_mutation() {
                            self.flush().await;
                        } else {
                            dirty = true;
                        }
                    }
                    None => break,
                },
                () = tick_next(ticker.as_mut()), if dirty => {
                    self.flush().await;
                    dirty = false;
                }
            }
        }

        // Channel closed: bound crash-window loss to zero on the way out.
        self.flush().await;
        info!(applied = self.applied, "apply loop stopped");
    }

    /// Fold one event into the ledger and emit its diagnostics.
    async fn apply_one(&mut self, event: &EngagementEvent) {
        let (points, likes, gifts_sent, comments, shares) = {
            let mut ledger = self.ledger.write().await;
            let record = ledger.apply(event);
            (
                record.points,
                record.likes,
                record.gifts_sent,
                record.comments,
                record.shares,
            )
        };
        self.applied = self.applied.saturating_add(1);

        // Diagnostics only below this point; a lost log line never
        // affects the applied state.
        match event.kind {
            EventKind::Like => {
                if let Some(progress) =
                    self.throttle.maybe_log(&event.participant_id, likes, points)
                {
                    info!(
                        nickname = %event.nickname,
                        likes = progress.likes,
                        since_last = progress.since_last,
                        points = progress.points,
                        "like progress"
                    );
                }
            }
            EventKind::Gift => {
                info!(
                    nickname = %event.nickname,
                    gift = event.gift_name.as_deref().unwrap_or("unnamed"),
                    count = event.magnitude,
                    gifts_sent,
                    points,
                    "gift received"
                );
            }
            EventKind::Comment => {
                info!(nickname = %event.nickname, comments, points, "comment received");
            }
            EventKind::Share => {
                info!(nickname = %event.nickname, shares, points, "share received");
            }
        }
    }

    /// Write the snapshot, keeping the in-memory ledger authoritative on
    /// failure.
    async fn flush(&self) {
        let ledger = self.ledger.read().await;
        if let Err(error) = self.store.save(&ledger) {
            warn!(%error, "snapshot write failed, will retry on next flush");
        }
    }
}

/// Await the next debounce tick, or forever when no timer is configured.
async fn tick_next(ticker: Option<&mut Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => core::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn like(id: &str, magnitude: u64) -> EngagementEvent {
        EngagementEvent::simple(EventKind::Like, id, "Ada").with_magnitude(magnitude)
    }

    async fn run_to_completion(
        policy: FlushPolicy,
        events: Vec<EngagementEvent>,
        store: &SnapshotStore,
    ) -> Arc<RwLock<ScoreLedger>> {
        let ledger = Arc::new(RwLock::new(store.load()));
        let (tx, rx) = mpsc::channel(16);
        let handle = ApplyWorker::new(Arc::clone(&ledger), store.clone(), policy, rx).spawn();

        for event in events {
            let _ = tx.send(event).await;
        }
        drop(tx);
        let _ = handle.await;
        ledger
    }

    #[tokio::test]
    async fn every_mutation_policy_persists_each_apply() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data.json"));

        let ledger = run_to_completion(
            FlushPolicy::EveryMutation,
            vec![like("u1", 5), like("u1", 5)],
            &store,
        )
        .await;

        assert_eq!(ledger.read().await.get("u1").map(|r| r.points), Some(10));
        assert_eq!(store.load().get("u1").map(|r| r.points), Some(10));
    }

    #[tokio::test]
    async fn shutdown_flushes_even_with_long_debounce() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data.json"));

        // An hour-long debounce: only the shutdown flush can have written.
        let policy = FlushPolicy::from_interval_ms(3_600_000);
        let _ = run_to_completion(policy, vec![like("u1", 7)], &store).await;

        assert_eq!(store.load().get("u1").map(|r| r.likes), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_timer_flushes_while_channel_stays_open() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data.json"));
        let ledger = Arc::new(RwLock::new(ScoreLedger::new()));
        let (tx, rx) = mpsc::channel(16);
        let policy = FlushPolicy::from_interval_ms(1000);
        let handle = ApplyWorker::new(Arc::clone(&ledger), store.clone(), policy, rx).spawn();

        let _ = tx.send(like("u1", 3)).await;
        // Paused time fast-forwards through the debounce interval.
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;

        assert_eq!(store.load().get("u1").map(|r| r.likes), Some(3));
        drop(tx);
        let _ = handle.await;
    }

    #[tokio::test]
    async fn worker_resumes_from_persisted_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("data.json"));

        let _ = run_to_completion(FlushPolicy::EveryMutation, vec![like("u1", 10)], &store).await;
        let ledger =
            run_to_completion(FlushPolicy::EveryMutation, vec![like("u1", 1)], &store).await;

        assert_eq!(ledger.read().await.get("u1").map(|r| r.points), Some(11));
    }
}
