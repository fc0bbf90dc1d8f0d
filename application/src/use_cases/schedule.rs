//! Discussion scheduler
//!
//! The session-phase state machine: fresh external input triggers an initial
//! round where every persona reacts once, then a bounded run of autonomous
//! rounds, then the session idles until the participant speaks again. The
//! same accumulating log carries across cycles.

use crate::log_handle::SharedLog;
use crate::pacing::PacingPolicy;
use crate::ports::event_sink::{EventSink, SinkClosed};
use crate::ports::transcript::{NoTranscript, TranscriptLogger};
use crate::use_cases::round::{RoundEngine, RoundOutcome, RoundPlan};
use rand::SeedableRng;
use rand::rngs::StdRng;
use roundtable_domain::{
    AgentRoster, DiscussionEvent, DomainError, ExternalInput, RoundState, SessionPhase, Speaker,
    TurnPhase,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Autonomous rounds are clamped into this range
pub const MIN_AUTONOMOUS_ROUNDS: usize = 2;
pub const MAX_AUTONOMOUS_ROUNDS: usize = 8;
/// Used when the caller doesn't ask for a specific bound
pub const DEFAULT_AUTONOMOUS_ROUNDS: usize = 3;

/// Clamp a requested autonomous-round bound into the safe range,
/// falling back to the default when nothing was requested
pub fn clamp_rounds(requested: Option<usize>) -> usize {
    match requested {
        Some(n) => n.clamp(MIN_AUTONOMOUS_ROUNDS, MAX_AUTONOMOUS_ROUNDS),
        None => DEFAULT_AUTONOMOUS_ROUNDS,
    }
}

/// Errors that can abort a scheduled discussion cycle
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Miswired roster lookup; fatal at the call site, the log stays valid
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The event channel's consumer went away; the session loop ends,
    /// committed history stays inspectable
    #[error("client disconnected")]
    Disconnected(#[from] SinkClosed),
}

/// Tunables for a discussion session
#[derive(Debug, Clone)]
pub struct SchedulerSettings {
    /// Autonomous-round bound when the client doesn't supply one
    pub default_rounds: usize,
    /// Text carried by the waiting event
    pub waiting_prompt: String,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            default_rounds: DEFAULT_AUTONOMOUS_ROUNDS,
            waiting_prompt: "The table is quiet. What would you like to add?".to_string(),
        }
    }
}

/// Drives one discussion session over its phases
pub struct DiscussionScheduler {
    engine: RoundEngine,
    log: SharedLog,
    roster: Arc<AgentRoster>,
    settings: SchedulerSettings,
    transcript: Arc<dyn TranscriptLogger>,
    pacing: PacingPolicy,
    phase: SessionPhase,
    rng: StdRng,
    cancel: CancellationToken,
}

impl DiscussionScheduler {
    pub fn new(engine: RoundEngine, log: SharedLog, roster: Arc<AgentRoster>) -> Self {
        Self {
            engine,
            log,
            roster,
            settings: SchedulerSettings::default(),
            transcript: Arc::new(NoTranscript),
            pacing: PacingPolicy::zero(),
            phase: SessionPhase::Idle,
            rng: StdRng::from_entropy(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_settings(mut self, settings: SchedulerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    /// Fix the turn-order randomness, for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Cancellation observed at turn boundaries
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Run one full cycle for freshly received external input.
    ///
    /// Commits the input, runs the initial round (everyone reacts, no
    /// handoff checks), then up to the clamped number of autonomous rounds,
    /// each over a fresh permutation. A handoff ends the autonomous loop,
    /// not just the round it happened in. Ends by emitting a single waiting
    /// event and parking in `AwaitingExternalInput`.
    pub async fn handle_input(
        &mut self,
        input: ExternalInput,
        base_temperature: f32,
        max_rounds: Option<usize>,
        sink: &dyn EventSink,
    ) -> Result<(), ScheduleError> {
        self.phase = SessionPhase::InitialRound;

        let entry = self.log.append(Speaker::External, input.into_text()).await;
        self.transcript.record(&entry);
        sink.emit(DiscussionEvent::received(&entry)).await?;
        self.pacing.pause_after_input().await;

        // Everyone reacts to fresh input exactly once, whatever the
        // handoff detector thinks of the replies.
        let initial = RoundPlan::new(
            RoundState::permuted(0, &self.roster, &mut self.rng),
            TurnPhase::InitialResponse,
            base_temperature,
        )
        .without_handoff_check();

        if self.run_round(initial, sink).await? == RoundOutcome::Cancelled {
            self.phase = SessionPhase::Idle;
            return Ok(());
        }

        self.phase = SessionPhase::AutonomousRounds;
        let rounds = clamp_rounds(max_rounds.or(Some(self.settings.default_rounds)));
        info!(rounds, "autonomous discussion starting");

        for index in 1..=rounds {
            let plan = RoundPlan::new(
                RoundState::permuted(index, &self.roster, &mut self.rng),
                TurnPhase::AutonomousDiscussion,
                base_temperature,
            );
            let plan = if index == rounds {
                plan.as_final_round()
            } else {
                plan
            };

            match self.run_round(plan, sink).await? {
                RoundOutcome::Completed => {}
                RoundOutcome::EndedByHandoff => {
                    info!(round = index, "autonomous rounds ended by handoff");
                    break;
                }
                RoundOutcome::Cancelled => {
                    self.phase = SessionPhase::Idle;
                    return Ok(());
                }
            }
        }

        self.phase = SessionPhase::AwaitingExternalInput;
        sink.emit(DiscussionEvent::waiting(self.settings.waiting_prompt.clone()))
            .await?;
        Ok(())
    }

    async fn run_round(
        &mut self,
        plan: RoundPlan,
        sink: &dyn EventSink,
    ) -> Result<RoundOutcome, ScheduleError> {
        self.engine.run(plan, &self.log, sink, &self.cancel).await
    }
}
