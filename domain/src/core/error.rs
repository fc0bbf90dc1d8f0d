//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Roster needs at least two personas, got {0}")]
    RosterTooSmall(usize),

    #[error("Duplicate persona id in roster: {0}")]
    DuplicatePersona(String),

    #[error("Invalid persona {id}: {reason}")]
    InvalidPersona { id: String, reason: String },
}

impl DomainError {
    /// Check if this error indicates a miswired roster lookup
    pub fn is_unknown_agent(&self) -> bool {
        matches!(self, DomainError::UnknownAgent(_))
    }
}
