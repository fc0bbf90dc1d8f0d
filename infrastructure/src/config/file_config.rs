//! Configuration file schema
//!
//! Example configuration:
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//!
//! [discussion]
//! default_rounds = 3
//! window_entries = 16
//! input_pause_ms = 500
//! turn_pause_ms = 1500
//!
//! [generation]
//! model = "claude-haiku-4.5"
//! api_key_env = "ANTHROPIC_API_KEY"
//! request_timeout_secs = 60
//!
//! [[roster]]
//! id = "spark"
//! display_name = "Spark"
//! identity_prompt = "..."
//! temperature_offset = -0.1
//! reply_budget = 400
//! ```

use roundtable_application::{PacingPolicy, SchedulerSettings};
use roundtable_domain::{AgentPersona, AgentRoster, ContextWindow, DomainError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub discussion: FileDiscussionConfig,
    pub generation: FileGenerationConfig,
    pub roster: Vec<FilePersonaConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            server: FileServerConfig::default(),
            discussion: FileDiscussionConfig::default(),
            generation: FileGenerationConfig::default(),
            roster: FilePersonaConfig::default_roster(),
        }
    }
}

impl FileConfig {
    /// Build the validated roster from the persona tables
    pub fn to_roster(&self) -> Result<AgentRoster, DomainError> {
        AgentRoster::new(self.roster.iter().map(FilePersonaConfig::to_persona).collect())
    }
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// `[discussion]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscussionConfig {
    /// Autonomous-round bound when the client doesn't supply one
    pub default_rounds: usize,
    /// Log entries included in each prompt window
    pub window_entries: usize,
    /// Pause after echoing external input, milliseconds
    pub input_pause_ms: u64,
    /// Pause between consecutive turns, milliseconds
    pub turn_pause_ms: u64,
    /// Text carried by the waiting event
    pub waiting_prompt: String,
    /// Transcript file path; empty disables transcript logging
    pub transcript_path: String,
}

impl Default for FileDiscussionConfig {
    fn default() -> Self {
        Self {
            default_rounds: 3,
            window_entries: 16,
            input_pause_ms: 500,
            turn_pause_ms: 1500,
            waiting_prompt: "The table is quiet. What would you like to add?".to_string(),
            transcript_path: String::new(),
        }
    }
}

impl FileDiscussionConfig {
    pub fn pacing(&self) -> PacingPolicy {
        PacingPolicy::new(
            Duration::from_millis(self.input_pause_ms),
            Duration::from_millis(self.turn_pause_ms),
        )
    }

    pub fn window(&self) -> ContextWindow {
        ContextWindow::new(self.window_entries)
    }

    pub fn scheduler_settings(&self) -> SchedulerSettings {
        SchedulerSettings {
            default_rounds: self.default_rounds,
            waiting_prompt: self.waiting_prompt.clone(),
        }
    }
}

/// `[generation]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Per-call timeout; a timed-out call becomes a fallback reply
    pub request_timeout_secs: u64,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            model: "claude-haiku-4.5".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl FileGenerationConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// One `[[roster]]` persona table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilePersonaConfig {
    pub id: String,
    pub display_name: String,
    pub identity_prompt: String,
    #[serde(default)]
    pub temperature_offset: f32,
    #[serde(default = "FilePersonaConfig::default_reply_budget")]
    pub reply_budget: u32,
}

impl FilePersonaConfig {
    fn default_reply_budget() -> u32 {
        400
    }

    pub fn to_persona(&self) -> AgentPersona {
        AgentPersona::new(
            self.id.as_str(),
            self.display_name.as_str(),
            self.identity_prompt.as_str(),
        )
        .with_temperature_offset(self.temperature_offset)
        .with_reply_budget(self.reply_budget)
    }

    /// The built-in trio: a bold visionary, a grounded pragmatist, and a
    /// synthesizing mediator
    pub fn default_roster() -> Vec<Self> {
        vec![
            Self {
                id: "spark".to_string(),
                display_name: "Spark".to_string(),
                identity_prompt: SPARK_IDENTITY.to_string(),
                temperature_offset: 0.1,
                reply_budget: 400,
            },
            Self {
                id: "keel".to_string(),
                display_name: "Keel".to_string(),
                identity_prompt: KEEL_IDENTITY.to_string(),
                temperature_offset: -0.1,
                reply_budget: 400,
            },
            Self {
                id: "loom".to_string(),
                display_name: "Loom".to_string(),
                identity_prompt: LOOM_IDENTITY.to_string(),
                temperature_offset: 0.0,
                reply_budget: 400,
            },
        ]
    }
}

const SPARK_IDENTITY: &str = r#"You are one voice in a small group conversation with a human participant.

Your voice is bold, energetic, and drawn to transformative ideas. You push past the obvious and propose ambitious moves.

Ground rules:
- Never write your own name or refer to yourself in the third person.
- Speak only in this voice; do not blend in the other voices.
- Bring at least one idea, question, or angle nobody has raised yet.
- If the group starts agreeing, raise the ambition: push boundaries, propose the riskier leap.
- Never restate earlier points; build on them or pivot away.
- Keep replies to 2-4 sentences unless asked for detail, and end with a hook that moves the conversation forward."#;

const KEEL_IDENTITY: &str = r#"You are one voice in a small group conversation with a human participant.

Your voice is grounded, practical, and evidence-minded. You care about fundamentals, structure, and realistic execution.

Ground rules:
- Never write your own name or refer to yourself in the third person.
- Speak only in this voice; do not blend in the other voices.
- Bring at least one risk, constraint, metric, or mitigation that has not been discussed yet.
- If the group starts agreeing, tighten the scrutiny: ask for evidence, point at hidden costs.
- Never restate earlier points; refine or question them.
- Keep replies to 2-4 sentences unless asked for detail, and end with a concrete checkpoint or measurable next step."#;

const LOOM_IDENTITY: &str = r#"You are one voice in a small group conversation with a human participant.

Your voice is the synthesizer and mediator. You blend ideas, find the balance, and clarify direction.

Ground rules:
- Never write your own name or refer to yourself in the third person.
- Speak only in this voice; do not blend in the other voices.
- Contribute a new integrative framing, analogy, or trade-off that widens the discussion.
- If the group starts agreeing, re-frame the debate or surface an overlooked dimension.
- Never restate earlier points; weave them into something fresh.
- Keep replies to 2-4 sentences unless asked for detail, and end with a clarifying question or a concrete path to synthesis."#;
