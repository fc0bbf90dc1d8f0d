//! Inter-event pacing
//!
//! Fixed delays that make the streamed conversation feel natural to a human
//! reader. Pacing is presentation polish, not a correctness mechanism: the
//! scheduler works identically with a zero policy, which is what tests use.

use std::time::Duration;

/// Pacing delays consulted between session events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Pause after echoing external input, before the first turn
    pub after_input: Duration,
    /// Pause between consecutive turns
    pub between_turns: Duration,
}

impl PacingPolicy {
    pub fn new(after_input: Duration, between_turns: Duration) -> Self {
        Self {
            after_input,
            between_turns,
        }
    }

    /// No delays at all
    pub fn zero() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub async fn pause_after_input(&self) {
        if !self.after_input.is_zero() {
            tokio::time::sleep(self.after_input).await;
        }
    }

    pub async fn pause_between_turns(&self) {
        if !self.between_turns.is_zero() {
            tokio::time::sleep(self.between_turns).await;
        }
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(1500))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_policy() {
        let pacing = PacingPolicy::zero();
        assert!(pacing.after_input.is_zero());
        assert!(pacing.between_turns.is_zero());
    }

    #[tokio::test]
    async fn test_zero_pause_returns_immediately() {
        // No timer is registered for zero durations, so this completes even
        // with the clock paused.
        tokio::time::pause();
        PacingPolicy::zero().pause_between_turns().await;
    }
}
