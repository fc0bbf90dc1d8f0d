//! Wire DTOs for the HTTP/WebSocket surface

use roundtable_domain::DiscussionEntry;
use serde::{Deserialize, Deserializer, Serialize};

fn default_temperature() -> f32 {
    0.7
}

/// Single-shot request: one message in, one round of replies out
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub text: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Streaming session request, sent as a WebSocket text frame
#[derive(Debug, Clone, Deserialize)]
pub struct StreamRequest {
    pub text: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Autonomous-round bound; anything that isn't a non-negative integer
    /// falls back to the server default
    #[serde(default, deserialize_with = "lenient_rounds")]
    pub max_rounds: Option<usize>,
}

/// Accept `max_rounds` values of the wrong JSON type by treating them as
/// absent rather than rejecting the whole frame.
fn lenient_rounds<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_u64()).map(|n| n as usize))
}

/// One history entry on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryView {
    pub speaker: String,
    pub text: String,
    pub sequence: u64,
}

impl From<&DiscussionEntry> for EntryView {
    fn from(entry: &DiscussionEntry) -> Self {
        Self {
            speaker: entry.speaker.label().to_string(),
            text: entry.text.clone(),
            sequence: entry.sequence,
        }
    }
}

/// Single-shot response: this exchange's replies plus the full history
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub replies: Vec<EntryView>,
    pub history: Vec<EntryView>,
}

impl ChatResponse {
    /// `reply_count` is the number of entries appended by this exchange
    /// after the echoed input (one per roster persona).
    pub fn from_history(history: &[DiscussionEntry], reply_count: usize) -> Self {
        let start = history.len().saturating_sub(reply_count);
        Self {
            replies: history[start..].iter().map(EntryView::from).collect(),
            history: history.iter().map(EntryView::from).collect(),
        }
    }
}

/// Read-only history query response
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<EntryView>,
}

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use roundtable_application::{GatewayError, GenerationGateway, GenerationParams};
    use std::sync::Arc;

    struct EchoGateway;

    #[async_trait]
    impl GenerationGateway for EchoGateway {
        async fn generate(
            &self,
            _prompt: &str,
            params: GenerationParams,
        ) -> Result<String, GatewayError> {
            Ok(format!("echo at {:.2}", params.temperature))
        }
    }

    pub fn echo_gateway() -> Arc<dyn GenerationGateway> {
        Arc::new(EchoGateway)
    }
}
