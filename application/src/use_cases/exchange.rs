//! Single-shot exchange use case
//!
//! The synchronous interface: one external message in, exactly one initial
//! round out (one reply per persona, roster order, no autonomous rounds),
//! and the full updated history back to the caller.

use crate::log_handle::SharedLog;
use crate::ports::event_sink::NullSink;
use crate::use_cases::round::{RoundEngine, RoundPlan};
use crate::use_cases::schedule::ScheduleError;
use roundtable_domain::{
    AgentRoster, DiscussionEntry, ExternalInput, RoundState, Speaker, TurnPhase,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors from the single-shot flow
#[derive(Error, Debug)]
pub enum RunExchangeError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Use case for the single-shot request shape
pub struct RunExchangeUseCase {
    engine: RoundEngine,
    log: SharedLog,
    roster: Arc<AgentRoster>,
}

impl RunExchangeUseCase {
    pub fn new(engine: RoundEngine, log: SharedLog, roster: Arc<AgentRoster>) -> Self {
        Self { engine, log, roster }
    }

    /// Commit the input, run one initial round in roster order, and return
    /// the full updated history.
    pub async fn execute(
        &self,
        input: ExternalInput,
        base_temperature: f32,
    ) -> Result<Vec<DiscussionEntry>, RunExchangeError> {
        self.log.append(Speaker::External, input.into_text()).await;

        let plan = RoundPlan::new(
            RoundState::with_order(0, self.roster.ids()),
            TurnPhase::InitialResponse,
            base_temperature,
        )
        .without_handoff_check();

        self.engine
            .run(plan, &self.log, &NullSink, &CancellationToken::new())
            .await?;

        Ok(self.log.snapshot().await)
    }
}
