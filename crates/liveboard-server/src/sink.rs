//! The inbound event surface handed to the upstream connector.
//!
//! The connector calls [`EventSink::submit`] once per raw upstream
//! occurrence, tagged with the wire event name. The sink normalizes,
//! drops unscorable events with a diagnostic, and enqueues the rest on
//! the bounded channel feeding the single apply worker. Submission
//! never fails from the connector's point of view: every failure mode
//! is logged and absorbed here.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use liveboard_ingest::normalize;
use liveboard_types::EngagementEvent;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::warn;

/// Cloneable producer handle for the event channel.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<EngagementEvent>,
    dropped: Arc<AtomicU64>,
}

impl EventSink {
    /// Create a sink and the consumer half of its bounded channel.
    ///
    /// The channel bound is the system's explicit backpressure point:
    /// when the apply worker falls behind, `submit` awaits capacity,
    /// slowing the producer instead of buffering without limit.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<EngagementEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            rx,
        )
    }

    /// Normalize and enqueue one raw upstream event.
    ///
    /// Unrecognized kinds are dropped with a warning and counted; a
    /// closed channel (shutdown in progress) drops with a warning. The
    /// ledger is never affected by either case.
    pub async fn submit(&self, kind_tag: &str, payload: &Value) {
        match normalize(kind_tag, payload) {
            Ok(event) => {
                if self.tx.send(event).await.is_err() {
                    warn!(kind = kind_tag, "event channel closed, discarding event");
                }
            }
            Err(error) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed).saturating_add(1);
                warn!(%error, dropped_total = total, "dropping unscorable event");
            }
        }
    }

    /// Number of events dropped because their kind was unrecognized.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn known_kinds_are_enqueued() {
        let (sink, mut rx) = EventSink::channel(4);
        sink.submit("like", &json!({ "userId": "u1", "likeCount": 2 }))
            .await;

        let event = rx.recv().await;
        assert!(matches!(
            event,
            Some(ref e) if e.participant_id == "u1" && e.magnitude == 2
        ));
        assert_eq!(sink.dropped(), 0);
    }

    #[tokio::test]
    async fn unknown_kinds_are_counted_not_enqueued() {
        let (sink, mut rx) = EventSink::channel(4);
        sink.submit("follow", &json!({ "userId": "u1" })).await;
        sink.submit("subscribe", &json!({ "userId": "u1" })).await;

        assert_eq!(sink.dropped(), 2);
        drop(sink);
        assert_eq!(rx.recv().await, None);
    }
}
