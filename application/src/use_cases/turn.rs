//! Turn generator
//!
//! Wraps the generation gateway with per-persona parameter shaping and the
//! fallback boundary: a backend failure never aborts a round, it just turns
//! into a short placeholder reply.

use crate::ports::generation::{GenerationGateway, GenerationParams};
use roundtable_domain::AgentPersona;
use roundtable_domain::util::preview;
use std::sync::Arc;
use tracing::{debug, warn};

/// Placeholder reply when the backend fails or returns nothing usable.
/// First person so it reads in-voice for any persona.
const FALLBACK_REPLY: &str =
    "I need a moment to gather my thoughts here, don't let me hold things up.";

/// Produces one persona's reply for a prepared prompt
pub struct TurnGenerator {
    gateway: Arc<dyn GenerationGateway>,
}

impl TurnGenerator {
    pub fn new(gateway: Arc<dyn GenerationGateway>) -> Self {
        Self { gateway }
    }

    /// Generate a reply for `persona`.
    ///
    /// Effective temperature and reply budget come from the persona
    /// descriptor, so two personas sharing a base temperature never sample
    /// identically. Never fails: gateway errors and empty replies are
    /// absorbed into the fallback reply and reported through tracing only.
    pub async fn speak(&self, persona: &AgentPersona, prompt: &str, base_temperature: f32) -> String {
        let params = GenerationParams::new(
            persona.effective_temperature(base_temperature),
            persona.reply_budget,
        );

        match self.gateway.generate(prompt, params).await {
            Ok(reply) => {
                let reply = reply.trim();
                if reply.is_empty() {
                    warn!(agent = %persona.id, "backend returned an empty reply, using fallback");
                    return FALLBACK_REPLY.to_string();
                }
                debug!(
                    agent = %persona.id,
                    temperature = params.temperature,
                    reply = %preview(reply, 80),
                    "turn generated"
                );
                reply.to_string()
            }
            Err(error) => {
                warn!(agent = %persona.id, %error, "generation failed, using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::generation::GatewayError;
    use crate::use_cases::testing::{ScriptedGateway, roster};

    #[tokio::test]
    async fn test_speak_returns_trimmed_reply() {
        let gateway = Arc::new(ScriptedGateway::new().then_reply("  a fine idea \n"));
        let turns = TurnGenerator::new(gateway);
        let roster = roster();
        let persona = roster.get(&"spark".into()).unwrap();

        let reply = turns.speak(persona, "prompt", 0.7).await;
        assert_eq!(reply, "a fine idea");
    }

    #[tokio::test]
    async fn test_speak_absorbs_gateway_failure() {
        let gateway =
            Arc::new(ScriptedGateway::new().then_fail(GatewayError::RequestFailed("503".into())));
        let turns = TurnGenerator::new(gateway);
        let roster = roster();
        let persona = roster.get(&"keel".into()).unwrap();

        let reply = turns.speak(persona, "prompt", 0.7).await;
        assert_eq!(reply, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_speak_absorbs_timeout() {
        let gateway = Arc::new(ScriptedGateway::new().then_fail(GatewayError::Timeout));
        let turns = TurnGenerator::new(gateway);
        let roster = roster();
        let persona = roster.get(&"loom".into()).unwrap();

        assert_eq!(turns.speak(persona, "prompt", 0.7).await, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_empty_reply_becomes_fallback() {
        let gateway = Arc::new(ScriptedGateway::new().then_reply("   "));
        let turns = TurnGenerator::new(gateway);
        let roster = roster();
        let persona = roster.get(&"spark".into()).unwrap();

        assert_eq!(turns.speak(persona, "prompt", 0.7).await, FALLBACK_REPLY);
    }
}
