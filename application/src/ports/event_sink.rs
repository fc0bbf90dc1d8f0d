//! Event sink port
//!
//! The ordered output channel the scheduler and round engine emit lifecycle
//! events into. The transport adapter (WebSocket writer, test collector)
//! lives behind this trait.

use async_trait::async_trait;
use roundtable_domain::DiscussionEvent;
use thiserror::Error;

/// The consumer of the event channel has gone away
///
/// Treated as a transport disconnect: the session's remaining rounds are
/// abandoned at the next safe boundary, committed history stays intact.
#[derive(Error, Debug, Default)]
#[error("event sink closed")]
pub struct SinkClosed;

/// Ordered sink for discussion lifecycle events
///
/// Implementations must preserve emission order (FIFO); the callers guarantee
/// an event for a turn is only emitted after that turn's log commit.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: DiscussionEvent) -> Result<(), SinkClosed>;
}

/// Sink that drops every event, for the single-shot flow and tests
#[derive(Debug, Clone, Default)]
pub struct NullSink;

#[async_trait]
impl EventSink for NullSink {
    async fn emit(&self, _event: DiscussionEvent) -> Result<(), SinkClosed> {
        Ok(())
    }
}
