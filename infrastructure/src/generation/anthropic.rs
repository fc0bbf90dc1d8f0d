//! Anthropic Messages API gateway
//!
//! Implements the generation port over HTTPS. Every call is a single
//! user-turn request; the prompt already carries the persona identity and
//! windowed history, so no server-side conversation state is used.

use async_trait::async_trait;
use roundtable_application::{GatewayError, GenerationGateway, GenerationParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Errors building the gateway at startup
#[derive(Error, Debug)]
pub enum GatewayInitError {
    #[error("API key environment variable {0} is not set")]
    MissingApiKey(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Generation gateway backed by the Anthropic Messages API
pub struct AnthropicGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl AnthropicGateway {
    /// Build a gateway reading the API key from `api_key_env`.
    ///
    /// `request_timeout` bounds each generation call; a timed-out call
    /// surfaces as `GatewayError::Timeout` and becomes a fallback reply at
    /// the turn-generator boundary.
    pub fn new(
        model: impl Into<String>,
        api_key_env: &str,
        request_timeout: Duration,
    ) -> Result<Self, GatewayInitError> {
        let api_key = std::env::var(api_key_env)
            .map_err(|_| GatewayInitError::MissingApiKey(api_key_env.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| GatewayInitError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
            model: model.into(),
        })
    }

    /// Point the gateway at a different endpoint (proxies, test servers)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl MessagesResponse {
    fn first_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
    }
}

#[async_trait]
impl GenerationGateway for AnthropicGateway {
    async fn generate(
        &self,
        prompt: &str,
        params: GenerationParams,
    ) -> Result<String, GatewayError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = %self.model, temperature = params.temperature, "generation request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else if e.is_connect() {
                    GatewayError::TransportClosed
                } else {
                    GatewayError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited(status.to_string()));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!("{status}: {detail}")));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        parsed
            .first_text()
            .ok_or_else(|| GatewayError::InvalidResponse("no text block in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = MessagesRequest {
            model: "claude-haiku-4.5",
            max_tokens: 400,
            temperature: 0.75,
            messages: vec![RequestMessage {
                role: "user",
                content: "say hi",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "claude-haiku-4.5");
        assert_eq!(json["max_tokens"], 400);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "say hi");
    }

    #[test]
    fn test_response_first_text() {
        let parsed: MessagesResponse = serde_json::from_str(
            r#"{"content":[{"type":"thinking","text":""},{"type":"text","text":"hello there"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.first_text().unwrap(), "hello there");
    }

    #[test]
    fn test_response_without_text_block() {
        let parsed: MessagesResponse =
            serde_json::from_str(r#"{"content":[{"type":"tool_use"}]}"#).unwrap();
        assert!(parsed.first_text().is_none());
    }

    #[test]
    fn test_missing_api_key_env() {
        let result = AnthropicGateway::new(
            "claude-haiku-4.5",
            "ROUNDTABLE_TEST_KEY_THAT_IS_NOT_SET",
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(GatewayInitError::MissingApiKey(_))));
    }
}
