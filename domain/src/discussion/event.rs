//! Lifecycle events emitted onto the session's ordered output channel

use crate::agent::persona::AgentId;
use crate::discussion::entities::DiscussionEntry;
use serde::{Deserialize, Serialize};

/// A discrete lifecycle event of the discussion session
///
/// Events are serialized in program order onto the transport channel; an
/// event for a turn is never observable before that turn's log commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiscussionEvent {
    /// Echo of freshly committed external input
    Received { speaker: String, text: String },
    /// A persona is composing (no text yet)
    TurnStarted { speaker: String },
    /// A persona's reply has been committed to the log
    TurnCompleted { speaker: String, text: String },
    /// The session is idle and ready for the next external input
    Waiting { prompt_for_external: String },
}

impl DiscussionEvent {
    /// Event echoing a committed entry (external input or agent reply)
    pub fn received(entry: &DiscussionEntry) -> Self {
        DiscussionEvent::Received {
            speaker: entry.speaker.label().to_string(),
            text: entry.text.clone(),
        }
    }

    pub fn turn_started(speaker: &AgentId) -> Self {
        DiscussionEvent::TurnStarted {
            speaker: speaker.to_string(),
        }
    }

    pub fn turn_completed(entry: &DiscussionEntry) -> Self {
        DiscussionEvent::TurnCompleted {
            speaker: entry.speaker.label().to_string(),
            text: entry.text.clone(),
        }
    }

    pub fn waiting(prompt_for_external: impl Into<String>) -> Self {
        DiscussionEvent::Waiting {
            prompt_for_external: prompt_for_external.into(),
        }
    }

    /// The speaker this event concerns, if any
    pub fn speaker(&self) -> Option<&str> {
        match self {
            DiscussionEvent::Received { speaker, .. }
            | DiscussionEvent::TurnStarted { speaker }
            | DiscussionEvent::TurnCompleted { speaker, .. } => Some(speaker),
            DiscussionEvent::Waiting { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discussion::entities::Speaker;

    #[test]
    fn test_received_wire_shape() {
        let event = DiscussionEvent::Received {
            speaker: "external".to_string(),
            text: "Hello".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "received");
        assert_eq!(json["speaker"], "external");
        assert_eq!(json["text"], "Hello");
    }

    #[test]
    fn test_turn_started_has_no_text() {
        let event = DiscussionEvent::turn_started(&"spark".into());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "turn_started");
        assert_eq!(json["speaker"], "spark");
        assert!(json.get("text").is_none());
    }

    #[test]
    fn test_turn_completed_from_entry() {
        let entry = DiscussionEntry {
            speaker: Speaker::agent("spark"),
            text: "my reply".to_string(),
            sequence: 4,
        };
        let event = DiscussionEvent::turn_completed(&entry);
        assert_eq!(event.speaker(), Some("spark"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["text"], "my reply");
    }

    #[test]
    fn test_waiting_wire_shape() {
        let event = DiscussionEvent::waiting("your move");
        assert_eq!(event.speaker(), None);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "waiting");
        assert_eq!(json["prompt_for_external"], "your move");
    }

    #[test]
    fn test_round_trips_through_json() {
        let event = DiscussionEvent::turn_started(&"spark".into());
        let json = serde_json::to_string(&event).unwrap();
        let back: DiscussionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
