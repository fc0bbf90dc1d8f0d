//! Discussion log entities

use crate::agent::persona::AgentId;
use serde::{Deserialize, Serialize};

/// Who authored a discussion entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Speaker {
    /// The human/outside participant
    External,
    /// One of the roster personas
    Agent { id: AgentId },
}

impl Speaker {
    pub fn agent(id: impl Into<AgentId>) -> Self {
        Speaker::Agent { id: id.into() }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Speaker::External)
    }

    /// The agent id, if this is an agent-authored entry
    pub fn agent_id(&self) -> Option<&AgentId> {
        match self {
            Speaker::External => None,
            Speaker::Agent { id } => Some(id),
        }
    }

    /// Wire label: "external" or the agent id
    pub fn label(&self) -> &str {
        match self {
            Speaker::External => "external",
            Speaker::Agent { id } => id.as_str(),
        }
    }
}

/// One utterance in the discussion (Entity)
///
/// Immutable once created. `sequence` is assigned by the log on append and
/// totally orders the discussion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionEntry {
    pub speaker: Speaker,
    pub text: String,
    pub sequence: u64,
}

/// The ordered, append-only discussion log (Entity)
///
/// Shared by every component for the lifetime of a discussion. Entries are
/// never removed or mutated; `sequence` values are strictly increasing with
/// no gaps. Writers must go through a single serialization point so the
/// invariant holds (see the application layer's shared handle).
#[derive(Debug, Clone, Default)]
pub struct DiscussionLog {
    entries: Vec<DiscussionEntry>,
}

impl DiscussionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an utterance, assigning the next sequence number.
    ///
    /// Returns a clone of the committed entry so callers can emit it without
    /// re-reading the log.
    pub fn append(&mut self, speaker: Speaker, text: impl Into<String>) -> DiscussionEntry {
        let entry = DiscussionEntry {
            speaker,
            text: text.into(),
            sequence: self.entries.len() as u64,
        };
        self.entries.push(entry.clone());
        entry
    }

    pub fn entries(&self) -> &[DiscussionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent `n` entries, oldest first
    pub fn tail(&self, n: usize) -> &[DiscussionEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}
