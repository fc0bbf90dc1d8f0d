//! HTTP router and handlers
//!
//! - `POST /chat` - single-shot: one message, one round of replies
//! - `GET /ws-chat` - long-lived streaming session
//! - `GET /history` - the accumulated discussion, read-only
//! - `GET /health` - liveness probe

use crate::http::state::AppState;
use crate::http::wire::{ChatRequest, ChatResponse, HistoryResponse};
use crate::http::ws::ws_chat;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use roundtable_application::RunExchangeError;
use roundtable_domain::ExternalInput;
use serde::Serialize;
use tower_http::cors::CorsLayer;

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/ws-chat", get(ws_chat))
        .route("/history", get(history))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Single-shot chat: commit the message, run one roster-order round, return
/// the replies and the full updated history
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let input = ExternalInput::try_new(request.text)
        .ok_or_else(|| ApiError::BadRequest("text must not be empty".to_string()))?;

    let history = state
        .exchange()
        .execute(input, request.temperature)
        .await?;

    Ok(Json(ChatResponse::from_history(&history, state.roster.len())))
}

/// Read-only query of the full ordered history
async fn history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let entries = state.log.snapshot().await;
    Json(HistoryResponse {
        history: entries.iter().map(Into::into).collect(),
    })
}

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// API error types
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Discussion(String),
}

impl From<RunExchangeError> for ApiError {
    fn from(error: RunExchangeError) -> Self {
        ApiError::Discussion(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Discussion(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DISCUSSION_ERROR", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
