//! Audit sink interface and implementations.
//!
//! Sinks are shared as `Arc<dyn AuditSink>` and injected into whatever needs
//! to record events. [`NoopAuditSink`] is the default.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::event::AuditEvent;

// ---------------------------------------------------------------------------
// AuditSink
// ---------------------------------------------------------------------------

/// Best-effort recorder for diagnostic and analytics events.
///
/// Implementations must never panic or block for long: recording happens in
/// the middle of user actions.
pub trait AuditSink: Send + Sync {
    fn record(&self, event: AuditEvent);
}

impl dyn AuditSink {
    /// Record `event_name` with a JSON payload, stamped now.
    pub fn record_event(&self, event_name: &str, payload: serde_json::Value) {
        self.record(AuditEvent::new(event_name).with_payload(payload));
    }
}

// ---------------------------------------------------------------------------
// NoopAuditSink
// ---------------------------------------------------------------------------

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: AuditEvent) {}
}

// ---------------------------------------------------------------------------
// BufferedAuditSink
// ---------------------------------------------------------------------------

/// Default number of events held before the buffer is cleared.
pub const DEFAULT_BUFFER_CAPACITY: usize = 100;

/// Keeps events in memory.
///
/// When an append takes the buffer past its capacity the whole buffer is
/// cleared. There is no remote flush.
pub struct BufferedAuditSink {
    capacity: usize,
    buffer: Mutex<Vec<AuditEvent>>,
}

impl BufferedAuditSink {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            buffer: Mutex::new(Vec::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy of the currently buffered events, oldest first.
    pub fn snapshot(&self) -> Vec<AuditEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned lock still holds a usable buffer; recording carries on.
    fn lock(&self) -> MutexGuard<'_, Vec<AuditEvent>> {
        self.buffer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for BufferedAuditSink {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}

impl AuditSink for BufferedAuditSink {
    fn record(&self, event: AuditEvent) {
        let mut buffer = self.lock();
        buffer.push(event);
        if buffer.len() > self.capacity {
            tracing::debug!(
                dropped = buffer.len(),
                capacity = self.capacity,
                "Audit buffer full, clearing"
            );
            buffer.clear();
        }
    }
}

// ---------------------------------------------------------------------------
// TracingAuditSink
// ---------------------------------------------------------------------------

/// Emits every event as a structured `tracing` record on the
/// `applica::audit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) {
        let payload = serde_json::Value::Object(event.payload);
        tracing::info!(
            target: "applica::audit",
            event_name = %event.event_name,
            timestamp = %event.timestamp.to_rfc3339(),
            payload = %payload,
            "Audit event"
        );
    }
}

// ---------------------------------------------------------------------------
// FanoutAuditSink
// ---------------------------------------------------------------------------

/// Records every event into each of its sinks, in order.
#[derive(Default, Clone)]
pub struct FanoutAuditSink {
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl FanoutAuditSink {
    pub fn new(sinks: Vec<Arc<dyn AuditSink>>) -> Self {
        Self { sinks }
    }

    pub fn with_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl AuditSink for FanoutAuditSink {
    fn record(&self, event: AuditEvent) {
        if let Some((last, rest)) = self.sinks.split_last() {
            for sink in rest {
                sink.record(event.clone());
            }
            last.record(event);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_appends_in_order() {
        let sink = BufferedAuditSink::new(10);
        sink.record(AuditEvent::new("a"));
        sink.record(AuditEvent::new("b"));

        let names: Vec<_> = sink.snapshot().into_iter().map(|e| e.event_name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn poisoned_buffer_still_records() {
        let sink = BufferedAuditSink::new(10);
        sink.record(AuditEvent::new("before"));
        std::thread::scope(|s| {
            let result = s
                .spawn(|| {
                    let _guard = sink.buffer.lock().unwrap();
                    panic!("recorder crashed while holding the lock");
                })
                .join();
            assert!(result.is_err());
        });
        assert!(sink.buffer.is_poisoned());

        sink.record(AuditEvent::new("after"));
        assert_eq!(sink.len(), 2);
        let names: Vec<_> = sink.snapshot().into_iter().map(|e| e.event_name).collect();
        assert_eq!(names, vec!["before", "after"]);
    }

    #[test]
    fn buffer_clears_when_capacity_exceeded() {
        let sink = BufferedAuditSink::new(2);
        sink.record(AuditEvent::new("one"));
        sink.record(AuditEvent::new("two"));
        assert_eq!(sink.len(), 2);

        sink.record(AuditEvent::new("three"));
        assert!(sink.is_empty());

        sink.record(AuditEvent::new("four"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn record_event_merges_payload() {
        let buffered = Arc::new(BufferedAuditSink::default());
        let sink: Arc<dyn AuditSink> = buffered.clone();
        sink.record_event("mission_complete", serde_json::json!({"missionId": 1}));

        let events = buffered.snapshot();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].field("missionId").unwrap(), 1);
    }

    #[test]
    fn noop_sink_accepts_events() {
        let sink: Arc<dyn AuditSink> = Arc::new(NoopAuditSink);
        sink.record_event("anything", serde_json::Value::Null);
    }

    #[test]
    fn fanout_delivers_to_every_sink() {
        let first = Arc::new(BufferedAuditSink::default());
        let second = Arc::new(BufferedAuditSink::default());
        let fanout = FanoutAuditSink::default()
            .with_sink(first.clone())
            .with_sink(Arc::new(TracingAuditSink))
            .with_sink(second.clone());

        fanout.record(AuditEvent::new("route_change"));

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn empty_fanout_is_a_no_op() {
        FanoutAuditSink::default().record(AuditEvent::new("x"));
    }
}
