//! Handoff detection
//!
//! Decides whether a reply has organically invited the external participant
//! back into the conversation, which ends the autonomous rounds early.

/// Policy deciding whether a reply hands the floor back to the participant
///
/// Swappable so deployments can tune or replace the heuristic without
/// touching the round engine.
pub trait HandoffPolicy: Send + Sync {
    /// True if `reply` invites external input
    fn invites_user(&self, reply: &str) -> bool;
}

/// Lexical handoff detection over a fixed phrase set
///
/// Case-insensitive containment, no context beyond the single reply. An
/// accepted heuristic: a missed invitation just lets the round run its
/// course, while a stray match ends a round early. Neither is treated as a
/// correctness bug.
#[derive(Debug, Clone)]
pub struct LexicalHandoff {
    phrases: Vec<String>,
}

impl Default for LexicalHandoff {
    fn default() -> Self {
        Self::new([
            "what do you think",
            "your perspective",
            "hear from you",
            "your thoughts",
            "over to you",
            "what would you",
        ])
    }
}

impl LexicalHandoff {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(|p| p.into().to_lowercase()).collect(),
        }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl HandoffPolicy for LexicalHandoff {
    fn invites_user(&self, reply: &str) -> bool {
        let lowered = reply.to_lowercase();
        self.phrases.iter().any(|p| lowered.contains(p.as_str()))
    }
}

/// Policy that never hands off, for the initial round and for tests
#[derive(Debug, Clone, Default)]
pub struct NeverHandoff;

impl HandoffPolicy for NeverHandoff {
    fn invites_user(&self, _reply: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_invitation_phrases() {
        let policy = LexicalHandoff::default();
        assert!(policy.invites_user("That covers my side. What do you think?"));
        assert!(policy.invites_user("I'd love to hear from you on this."));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let policy = LexicalHandoff::default();
        assert!(policy.invites_user("WHAT DO YOU THINK about the budget?"));
    }

    #[test]
    fn test_plain_discussion_does_not_match() {
        let policy = LexicalHandoff::default();
        assert!(!policy.invites_user("The rollout plan needs a second phase."));
    }

    #[test]
    fn test_custom_phrase_set() {
        let policy = LexicalHandoff::new(["chime in"]);
        assert!(policy.invites_user("Feel free to chime in."));
        assert!(!policy.invites_user("What do you think?"));
    }

    #[test]
    fn test_never_handoff() {
        assert!(!NeverHandoff.invites_user("What do you think?"));
    }
}
