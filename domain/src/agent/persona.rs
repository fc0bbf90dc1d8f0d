//! Agent persona value objects

use serde::{Deserialize, Serialize};

/// Offsets outside this range would let a clamped base temperature push two
/// personas onto the same effective value.
pub const MAX_TEMPERATURE_OFFSET: f32 = 0.1;

/// Identifier of an agent persona in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(String);

impl AgentId {
    /// Creates an AgentId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for AgentId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A static persona bound to one roster slot (Value Object)
///
/// Immutable for the process lifetime. The identity prompt is what the
/// persona "is"; the temperature offset and reply budget are what keep the
/// personas distinguishable when they share a base temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPersona {
    /// Roster identifier, e.g. "spark"
    pub id: AgentId,
    /// Human-readable name shown on the wire
    pub display_name: String,
    /// Identity prompt prepended to every prompt this persona receives
    pub identity_prompt: String,
    /// Offset applied to the caller-supplied base temperature,
    /// within [-MAX_TEMPERATURE_OFFSET, MAX_TEMPERATURE_OFFSET]
    pub temperature_offset: f32,
    /// Maximum tokens per reply
    pub reply_budget: u32,
}

impl AgentPersona {
    pub fn new(
        id: impl Into<AgentId>,
        display_name: impl Into<String>,
        identity_prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            identity_prompt: identity_prompt.into(),
            temperature_offset: 0.0,
            reply_budget: 400,
        }
    }

    pub fn with_temperature_offset(mut self, offset: f32) -> Self {
        self.temperature_offset = offset;
        self
    }

    pub fn with_reply_budget(mut self, budget: u32) -> Self {
        self.reply_budget = budget;
        self
    }

    /// Derive this persona's effective temperature from a shared base.
    ///
    /// The base is clamped into [0.1, 0.9] before the offset is applied, so
    /// personas with distinct offsets always produce pairwise-distinct
    /// effective temperatures, for any base the caller supplies.
    pub fn effective_temperature(&self, base: f32) -> f32 {
        let base = if base.is_finite() { base } else { 0.7 };
        base.clamp(0.1, 0.9) + self.temperature_offset
    }

    /// Check that the offset stays within the range the derivation assumes
    pub fn offset_in_range(&self) -> bool {
        self.temperature_offset.abs() <= MAX_TEMPERATURE_OFFSET
    }
}
