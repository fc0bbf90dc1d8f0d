//! Application state shared across handlers

use roundtable_application::{
    DiscussionScheduler, GenerationGateway, PacingPolicy, RoundEngine, RunExchangeUseCase,
    SchedulerSettings, SharedLog, TranscriptLogger, TurnGenerator,
};
use roundtable_domain::{AgentRoster, ContextWindow, HandoffPolicy};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Shared state behind the router
///
/// Holds the one global discussion log plus everything needed to assemble a
/// scheduler per WebSocket session or an exchange per single-shot request.
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<AgentRoster>,
    pub gateway: Arc<dyn GenerationGateway>,
    pub log: SharedLog,
    pub window: ContextWindow,
    pub handoff: Arc<dyn HandoffPolicy>,
    pub transcript: Arc<dyn TranscriptLogger>,
    pub pacing: PacingPolicy,
    pub settings: SchedulerSettings,
}

impl AppState {
    pub fn new(roster: Arc<AgentRoster>, gateway: Arc<dyn GenerationGateway>) -> Self {
        Self {
            roster,
            gateway,
            log: SharedLog::new(),
            window: ContextWindow::default(),
            handoff: Arc::new(roundtable_domain::LexicalHandoff::default()),
            transcript: Arc::new(roundtable_application::NoTranscript),
            pacing: PacingPolicy::default(),
            settings: SchedulerSettings::default(),
        }
    }

    pub fn with_window(mut self, window: ContextWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_handoff(mut self, handoff: Arc<dyn HandoffPolicy>) -> Self {
        self.handoff = handoff;
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

    pub fn with_settings(mut self, settings: SchedulerSettings) -> Self {
        self.settings = settings;
        self
    }

    fn round_engine(&self, pacing: PacingPolicy) -> RoundEngine {
        RoundEngine::new(
            self.roster.clone(),
            TurnGenerator::new(self.gateway.clone()),
        )
        .with_window(self.window.clone())
        .with_handoff(self.handoff.clone())
        .with_transcript(self.transcript.clone())
        .with_pacing(pacing)
    }

    /// Single-shot use case: replies are returned in one response, so no
    /// pacing is applied.
    pub fn exchange(&self) -> RunExchangeUseCase {
        RunExchangeUseCase::new(
            self.round_engine(PacingPolicy::zero()),
            self.log.clone(),
            self.roster.clone(),
        )
    }

    /// Scheduler for one streaming session over the shared log
    pub fn scheduler(&self, cancel: CancellationToken) -> DiscussionScheduler {
        DiscussionScheduler::new(
            self.round_engine(self.pacing),
            self.log.clone(),
            self.roster.clone(),
        )
        .with_settings(self.settings.clone())
        .with_transcript(self.transcript.clone())
        .with_pacing(self.pacing)
        .with_cancellation(cancel)
    }
}
