//! Session and turn phases

use serde::{Deserialize, Serialize};

/// Phase tag for a single turn's prompt
///
/// Selects which instruction suffix the context window builder appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// First reaction to fresh external input
    InitialResponse,
    /// Agent-to-agent discussion rounds
    AutonomousDiscussion,
    /// Wrap-up turn before handing control back to the external participant
    FinalRound,
}

impl TurnPhase {
    pub fn as_str(&self) -> &str {
        match self {
            TurnPhase::InitialResponse => "initial_response",
            TurnPhase::AutonomousDiscussion => "autonomous_discussion",
            TurnPhase::FinalRound => "final_round",
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of one discussion session
///
/// Exactly one value is active at a time; transitions are the scheduler's
/// sole responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No input received yet
    Idle,
    /// Every persona reacts once to fresh external input
    InitialRound,
    /// Bounded agent-to-agent rounds
    AutonomousRounds,
    /// Idle until the external participant speaks again
    AwaitingExternalInput,
}

impl SessionPhase {
    pub fn as_str(&self) -> &str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::InitialRound => "initial_round",
            SessionPhase::AutonomousRounds => "autonomous_rounds",
            SessionPhase::AwaitingExternalInput => "awaiting_external_input",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
