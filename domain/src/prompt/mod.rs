//! Prompt templates for the discussion flow

/// Instruction suffixes selected by the turn phase
pub struct PhaseInstructions;

impl PhaseInstructions {
    /// First reaction to fresh external input
    pub fn initial_response() -> &'static str {
        r#"Respond to the participant's message from your own viewpoint.
- Offer one original insight or proposal of your own.
- Address the participant's message directly.
- Do not address the other voices in the conversation yet.
- Keep it to 2-4 sentences."#
    }

    /// Agent-to-agent discussion rounds
    pub fn autonomous_discussion() -> &'static str {
        r#"Move the conversation forward by reacting to specific points raised since your last turn.
- Add something new: an idea, a risk, evidence, or a synthesis.
- Challenge or build on what was said; skip generic agreement.
- Do not repeat wording that has already been used.
- Keep it to 2-4 sentences and end with a forward nudge."#
    }

    /// Wrap-up turn before control returns to the external participant
    pub fn final_round() -> &'static str {
        r#"Wrap up from your viewpoint.
- State your current position in one crisp line.
- Offer a concrete next step, or ask the participant one focused question.
- Then stop."#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_are_distinct() {
        let initial = PhaseInstructions::initial_response();
        let autonomous = PhaseInstructions::autonomous_discussion();
        let wrap_up = PhaseInstructions::final_round();
        assert_ne!(initial, autonomous);
        assert_ne!(autonomous, wrap_up);
        assert!(wrap_up.contains("Wrap up"));
    }
}
