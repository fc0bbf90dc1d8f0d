//! Application layer for roundtable
//!
//! This crate contains the use cases that drive a discussion session and the
//! ports they talk through. The scheduler and round engine live here; the
//! generation backend, transport, and config adapters live in infrastructure
//! and presentation.

pub mod log_handle;
pub mod pacing;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use log_handle::SharedLog;
pub use pacing::PacingPolicy;
pub use ports::{
    event_sink::{EventSink, NullSink, SinkClosed},
    generation::{GatewayError, GenerationGateway, GenerationParams},
    transcript::{NoTranscript, TranscriptLogger},
};
pub use use_cases::{
    exchange::{RunExchangeError, RunExchangeUseCase},
    round::{RoundEngine, RoundOutcome, RoundPlan},
    schedule::{DiscussionScheduler, ScheduleError, SchedulerSettings, clamp_rounds},
    turn::TurnGenerator,
};
