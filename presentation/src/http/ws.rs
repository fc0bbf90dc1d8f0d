//! WebSocket session pump
//!
//! One scheduler per connection, all connections sharing the one global
//! discussion log. Client text frames carry `StreamRequest` JSON; server
//! frames carry `DiscussionEvent` JSON in strict commit order. Frames
//! arriving while a cycle is running queue in the socket and are handled
//! sequentially.

use crate::http::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::stream::{SplitSink, StreamExt};
use futures::SinkExt;
use roundtable_application::{EventSink, ScheduleError, SinkClosed};
use roundtable_domain::{DiscussionEvent, ExternalInput};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Upgrade handler for `GET /ws-chat`
pub async fn ws_chat(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| ws_session(state, socket))
}

async fn ws_session(state: AppState, socket: WebSocket) {
    info!("streaming session opened");
    let (sender, mut receiver) = socket.split();
    let sink = WsEventSink::new(sender);
    let cancel = CancellationToken::new();
    let mut scheduler = state.scheduler(cancel.clone());

    while let Some(frame) = receiver.next().await {
        let message = match frame {
            Ok(message) => message,
            Err(error) => {
                debug!(%error, "socket read failed, closing session");
                break;
            }
        };

        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Pings are answered by axum; binary frames are not part of
            // the protocol.
            _ => continue,
        };

        let request = match serde_json::from_str::<crate::http::wire::StreamRequest>(&text) {
            Ok(request) => request,
            Err(error) => {
                warn!(%error, "ignoring malformed client frame");
                continue;
            }
        };
        let Some(input) = ExternalInput::try_new(request.text) else {
            warn!("ignoring empty client message");
            continue;
        };

        match scheduler
            .handle_input(input, request.temperature, request.max_rounds, &sink)
            .await
        {
            Ok(()) => {}
            Err(ScheduleError::Disconnected(_)) => {
                debug!("client went away mid-cycle");
                break;
            }
            Err(error) => {
                error!(%error, "discussion cycle failed, closing session");
                break;
            }
        }
    }

    // Stop any in-flight cycle at its next turn boundary; committed history
    // stays valid in the shared log.
    cancel.cancel();
    info!("streaming session closed");
}

/// Event sink writing JSON frames to the WebSocket in emission order
struct WsEventSink {
    sender: Mutex<SplitSink<WebSocket, Message>>,
}

impl WsEventSink {
    fn new(sender: SplitSink<WebSocket, Message>) -> Self {
        Self {
            sender: Mutex::new(sender),
        }
    }
}

#[async_trait]
impl EventSink for WsEventSink {
    async fn emit(&self, event: DiscussionEvent) -> Result<(), SinkClosed> {
        let json = serde_json::to_string(&event).map_err(|_| SinkClosed)?;
        self.sender
            .lock()
            .await
            .send(Message::Text(json))
            .await
            .map_err(|_| SinkClosed)
    }
}
