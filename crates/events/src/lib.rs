//! Applica audit sink.
//!
//! - [`AuditEvent`]: the `{eventName, ...payload, timestamp}` record.
//! - [`AuditSink`]: the injected recording interface.
//! - [`BufferedAuditSink`], [`TracingAuditSink`], [`NoopAuditSink`] and
//!   [`FanoutAuditSink`]: the provided implementations.
//!
//! Recording is best-effort everywhere: no sink may fail or block a caller.

pub mod event;
pub mod sink;

pub use event::AuditEvent;
pub use sink::{AuditSink, BufferedAuditSink, FanoutAuditSink, NoopAuditSink, TracingAuditSink};
