//! Context window builder
//!
//! Renders the most recent slice of the discussion log into the prompt text a
//! persona sees for its turn. Agent-authored entries are rendered without the
//! authoring persona's identity so no persona can learn another's name and
//! start mimicking or addressing it. External entries carry an explicit
//! participant marker.

use crate::agent::persona::AgentId;
use crate::agent::roster::AgentRoster;
use crate::core::error::DomainError;
use crate::discussion::entities::{DiscussionEntry, DiscussionLog};
use crate::discussion::phase::TurnPhase;
use crate::prompt::PhaseInstructions;

/// Default number of log entries included in a prompt window.
/// Older entries are dropped outright; there is no summarization.
pub const DEFAULT_WINDOW_ENTRIES: usize = 16;

/// Marker rendered in front of external-participant entries
const EXTERNAL_MARKER: &str = "Participant";
/// Anonymous marker rendered in front of agent-authored entries
const AGENT_MARKER: &str = "Previous response";

/// Builds the bounded prompt for one persona's turn
///
/// Pure and deterministic: identical `(agent_id, phase, log)` inputs always
/// yield identical prompt text.
#[derive(Debug, Clone)]
pub struct ContextWindow {
    entries: usize,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            entries: DEFAULT_WINDOW_ENTRIES,
        }
    }
}

impl ContextWindow {
    pub fn new(entries: usize) -> Self {
        Self {
            entries: entries.max(1),
        }
    }

    /// Number of entries the window keeps
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Build the prompt for `agent_id` speaking in `phase`.
    ///
    /// Fails with `UnknownAgent` when the id is not in the roster.
    pub fn build(
        &self,
        roster: &AgentRoster,
        agent_id: &AgentId,
        phase: TurnPhase,
        log: &DiscussionLog,
    ) -> Result<String, DomainError> {
        let persona = roster.get(agent_id)?;

        let instruction = match phase {
            TurnPhase::InitialResponse => PhaseInstructions::initial_response(),
            TurnPhase::AutonomousDiscussion => PhaseInstructions::autonomous_discussion(),
            TurnPhase::FinalRound => PhaseInstructions::final_round(),
        };

        let mut prompt = String::new();
        prompt.push_str(persona.identity_prompt.trim_end());
        prompt.push_str("\n\nThe conversation so far:\n");
        for entry in log.tail(self.entries) {
            prompt.push_str(&render_line(entry));
            prompt.push('\n');
        }
        prompt.push('\n');
        prompt.push_str(instruction);
        prompt.push_str("\n\nYour response:");

        Ok(prompt)
    }
}

fn render_line(entry: &DiscussionEntry) -> String {
    let marker = if entry.speaker.is_external() {
        EXTERNAL_MARKER
    } else {
        AGENT_MARKER
    };
    format!("{marker}: {}", entry.text)
}
