//! Progress events and broadcast bus for batch runs.
//!
//! The pipeline's sole externally observable progress signal: one event per
//! finished record, plus one summary event at end of run. Downstream
//! consumers (UI log panes, telemetry) subscribe independently; the pipeline
//! never blocks on a slow consumer.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::defaults;
use crate::models::RunSummary;

/// One structured progress emission.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ProgressEvent {
    /// A record finished processing.
    Record {
        /// 1-based position within the run.
        index: usize,
        total: usize,
        record_id: String,
        /// `success`, `failed`, or `skipped`.
        outcome: &'static str,
        /// Reason tag for failed/skipped records, detail for diagnostics.
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// The whole run finished.
    Finished { summary: RunSummary },
}

/// Broadcast bus carrying [`ProgressEvent`]s to any number of subscribers.
#[derive(Clone)]
pub struct ProgressBus {
    tx: broadcast::Sender<ProgressEvent>,
}

impl ProgressBus {
    /// Create a bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all subscribers. With no active subscribers the
    /// event is silently dropped.
    pub fn emit(&self, event: ProgressEvent) {
        tracing::debug!(
            subscriber_count = self.tx.receiver_count(),
            "progress event emit"
        );
        let _ = self.tx.send(event);
    }

    /// Subscribe to events. Each subscriber gets its own independent stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.tx.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ProgressBus {
    fn default() -> Self {
        Self::new(defaults::PROGRESS_BUS_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_events() {
        let bus = ProgressBus::new(8);
        let mut rx = bus.subscribe();

        bus.emit(ProgressEvent::Record {
            index: 1,
            total: 2,
            record_id: "rec1".to_string(),
            outcome: "success",
            reason: None,
        });

        let event = rx.recv().await.unwrap();
        match event {
            ProgressEvent::Record { index, total, .. } => {
                assert_eq!(index, 1);
                assert_eq!(total, 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_emit_without_subscribers_is_dropped() {
        let bus = ProgressBus::new(8);
        assert_eq!(bus.subscriber_count(), 0);
        bus.emit(ProgressEvent::Finished {
            summary: RunSummary::default(),
        });
    }

    #[test]
    fn test_record_event_serializes_with_tags() {
        let event = ProgressEvent::Record {
            index: 3,
            total: 5,
            record_id: "rec3".to_string(),
            outcome: "failed",
            reason: Some("invalid-url".to_string()),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "record");
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["reason"], "invalid-url");
    }
}
