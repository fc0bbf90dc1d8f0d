//! External input value object

use serde::{Deserialize, Serialize};

/// A contribution from the external (human) participant (Value Object)
///
/// This is the input that kicks off a discussion cycle: the personas react to
/// it in the initial round and keep discussing it autonomously afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalInput {
    text: String,
}

impl ExternalInput {
    /// Try to create a new input, returning None if empty or whitespace-only
    pub fn try_new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self { text })
        }
    }

    /// Get the input text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume and return the inner text
    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for ExternalInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
