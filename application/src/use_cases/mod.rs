//! Use cases driving a discussion session

pub mod exchange;
pub mod round;
pub mod schedule;
pub mod turn;

#[cfg(test)]
pub(crate) mod testing {
    use crate::ports::generation::{GatewayError, GenerationGateway, GenerationParams};
    use async_trait::async_trait;
    use roundtable_domain::{AgentPersona, AgentRoster};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Three-persona roster used across use-case tests
    pub fn roster() -> AgentRoster {
        AgentRoster::new(vec![
            AgentPersona::new("spark", "Spark", "You are Spark, the bold one.")
                .with_temperature_offset(-0.1),
            AgentPersona::new("keel", "Keel", "You are Keel, the grounded one.")
                .with_temperature_offset(0.0),
            AgentPersona::new("loom", "Loom", "You are Loom, the mediator.")
                .with_temperature_offset(0.1),
        ])
        .unwrap()
    }

    /// Gateway that plays back a script of replies, then default replies.
    ///
    /// Each scripted item is either a reply or an error to inject; once the
    /// script runs dry every call succeeds with a numbered reply.
    pub struct ScriptedGateway {
        script: Mutex<VecDeque<Result<String, GatewayError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedGateway {
        pub fn new() -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn then_reply(self, text: &str) -> Self {
            self.script
                .lock()
                .unwrap()
                .push_back(Ok(text.to_string()));
            self
        }

        pub fn then_fail(self, error: GatewayError) -> Self {
            self.script.lock().unwrap().push_back(Err(error));
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationGateway for ScriptedGateway {
        async fn generate(
            &self,
            _prompt: &str,
            _params: GenerationParams,
        ) -> Result<String, GatewayError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script.lock().unwrap().pop_front() {
                Some(result) => result,
                None => Ok(format!("reply {call}")),
            }
        }
    }
}
