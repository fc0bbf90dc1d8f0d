//! Per-round state and turn-order permutation

use crate::agent::persona::AgentId;
use crate::agent::roster::AgentRoster;
use rand::Rng;
use rand::seq::SliceRandom;

/// Transient state for one discussion round
///
/// Created at round start, discarded at round end. The speaker order is a
/// fresh uniform permutation of the roster each round, with no correlation
/// between rounds.
#[derive(Debug, Clone)]
pub struct RoundState {
    round_index: usize,
    speaker_order: Vec<AgentId>,
    cursor: usize,
    ended_by_handoff: bool,
}

impl RoundState {
    /// Round over an explicit speaker order (roster order for the
    /// single-shot interface, or a fixed order in tests)
    pub fn with_order(round_index: usize, speaker_order: Vec<AgentId>) -> Self {
        Self {
            round_index,
            speaker_order,
            cursor: 0,
            ended_by_handoff: false,
        }
    }

    /// Round over a fresh uniform permutation of the roster
    pub fn permuted<R: Rng>(round_index: usize, roster: &AgentRoster, rng: &mut R) -> Self {
        let mut speaker_order = roster.ids();
        speaker_order.shuffle(rng);
        Self::with_order(round_index, speaker_order)
    }

    pub fn round_index(&self) -> usize {
        self.round_index
    }

    pub fn speaker_order(&self) -> &[AgentId] {
        &self.speaker_order
    }

    /// The speaker whose turn is next, without advancing
    pub fn current_speaker(&self) -> Option<&AgentId> {
        if self.ended_by_handoff {
            return None;
        }
        self.speaker_order.get(self.cursor)
    }

    /// Whether the current speaker is the last of this round
    pub fn on_last_speaker(&self) -> bool {
        self.cursor + 1 == self.speaker_order.len()
    }

    /// Advance past the current speaker
    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    /// Stop iterating the remaining speakers in this round
    pub fn end_by_handoff(&mut self) {
        self.ended_by_handoff = true;
    }

    pub fn ended_by_handoff(&self) -> bool {
        self.ended_by_handoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::persona::AgentPersona;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn roster() -> AgentRoster {
        AgentRoster::new(vec![
            AgentPersona::new("a", "A", "You are A.").with_temperature_offset(-0.1),
            AgentPersona::new("b", "B", "You are B.").with_temperature_offset(0.0),
            AgentPersona::new("c", "C", "You are C.").with_temperature_offset(0.1),
        ])
        .unwrap()
    }

    #[test]
    fn test_permutation_is_a_permutation() {
        let roster = roster();
        let mut rng = StdRng::seed_from_u64(7);
        let round = RoundState::permuted(0, &roster, &mut rng);

        let mut order = round.speaker_order().to_vec();
        order.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        assert_eq!(order, roster.ids());
    }

    #[test]
    fn test_permutation_deterministic_under_seed() {
        let roster = roster();
        let order_a =
            RoundState::permuted(0, &roster, &mut StdRng::seed_from_u64(42)).speaker_order().to_vec();
        let order_b =
            RoundState::permuted(0, &roster, &mut StdRng::seed_from_u64(42)).speaker_order().to_vec();
        assert_eq!(order_a, order_b);
    }

    #[test]
    fn test_cursor_walk() {
        let mut round = RoundState::with_order(1, vec!["a".into(), "b".into()]);
        assert_eq!(round.current_speaker().unwrap().as_str(), "a");
        assert!(!round.on_last_speaker());
        round.advance();
        assert_eq!(round.current_speaker().unwrap().as_str(), "b");
        assert!(round.on_last_speaker());
        round.advance();
        assert!(round.current_speaker().is_none());
    }

    #[test]
    fn test_handoff_stops_iteration() {
        let mut round = RoundState::with_order(0, vec!["a".into(), "b".into(), "c".into()]);
        round.advance();
        round.end_by_handoff();
        assert!(round.ended_by_handoff());
        assert!(round.current_speaker().is_none());
    }
}
