//! Generation gateway port
//!
//! Defines the interface to the external text-generation backend.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during generation gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Malformed response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Transport closed")]
    TransportClosed,
}

/// Sampling parameters for one generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// Gateway to the text-generation backend
///
/// One prompt in, one reply out. The backend is opaque: it may be slow, rate
/// limited, or down. Callers above the turn-generator boundary never see
/// these errors; the turn generator absorbs them into fallback replies.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Produce a reply for `prompt` under `params`
    async fn generate(&self, prompt: &str, params: GenerationParams)
    -> Result<String, GatewayError>;
}
