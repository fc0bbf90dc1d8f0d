//! The fixed roster of discussion participants

use crate::agent::persona::{AgentId, AgentPersona};
use crate::core::error::DomainError;

/// A fixed, ordered set of agent personas (cardinality >= 2)
///
/// Immutable for the process lifetime; owned by configuration and read-only
/// to every other component. Order matters: the single-shot interface replies
/// in roster order, and round permutations are permutations of this order.
#[derive(Debug, Clone)]
pub struct AgentRoster {
    personas: Vec<AgentPersona>,
}

impl AgentRoster {
    /// Build a validated roster.
    ///
    /// Fails when fewer than two personas are supplied, when ids collide, or
    /// when a temperature offset falls outside the derivation range or
    /// collides with another persona's offset.
    pub fn new(personas: Vec<AgentPersona>) -> Result<Self, DomainError> {
        if personas.len() < 2 {
            return Err(DomainError::RosterTooSmall(personas.len()));
        }
        for (i, persona) in personas.iter().enumerate() {
            if !persona.offset_in_range() {
                return Err(DomainError::InvalidPersona {
                    id: persona.id.to_string(),
                    reason: format!(
                        "temperature offset {} outside [-{max}, {max}]",
                        persona.temperature_offset,
                        max = crate::agent::persona::MAX_TEMPERATURE_OFFSET
                    ),
                });
            }
            for other in &personas[..i] {
                if other.id == persona.id {
                    return Err(DomainError::DuplicatePersona(persona.id.to_string()));
                }
                if other.temperature_offset == persona.temperature_offset {
                    return Err(DomainError::InvalidPersona {
                        id: persona.id.to_string(),
                        reason: format!(
                            "temperature offset {} collides with persona {}",
                            persona.temperature_offset, other.id
                        ),
                    });
                }
            }
        }
        Ok(Self { personas })
    }

    /// Number of personas in the roster
    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Personas in roster order
    pub fn personas(&self) -> &[AgentPersona] {
        &self.personas
    }

    /// Ids in roster order
    pub fn ids(&self) -> Vec<AgentId> {
        self.personas.iter().map(|p| p.id.clone()).collect()
    }

    /// Look up a persona, failing with `UnknownAgent` for ids not in the roster
    pub fn get(&self, id: &AgentId) -> Result<&AgentPersona, DomainError> {
        self.personas
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| DomainError::UnknownAgent(id.to_string()))
    }

    pub fn contains(&self, id: &AgentId) -> bool {
        self.personas.iter().any(|p| &p.id == id)
    }
}
