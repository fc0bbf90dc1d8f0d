//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the generation backend, configuration file loading,
//! and the JSONL transcript logger.

pub mod config;
pub mod generation;
pub mod transcript;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDiscussionConfig, FileGenerationConfig, FilePersonaConfig,
    FileServerConfig,
};
pub use generation::anthropic::{AnthropicGateway, GatewayInitError};
pub use transcript::JsonlTranscript;
