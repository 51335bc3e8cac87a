//! Next-card selection.
//!
//! A forced special card always wins. Otherwise ordinary cards are drawn
//! uniformly from the indices not yet shown this cycle; once every index
//! has been shown the cycle resets.

use super::state::{CardSlot, RunState};
use crate::cards::CardPool;
use crate::core::RandomSource;

/// Picks cards with an injected random source.
pub struct SelectionEngine {
    rng: Box<dyn RandomSource>,
}

impl SelectionEngine {
    #[must_use]
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self { rng }
    }

    pub(crate) fn into_rng(self) -> Box<dyn RandomSource> {
        self.rng
    }

    /// Pick the next card and record it in `state`.
    ///
    /// Returns `None` only for an empty ordinary pool with nothing forced.
    pub fn pick_next(&mut self, state: &mut RunState, pool: &CardPool) -> Option<CardSlot> {
        let slot = self.select(state, pool);
        state.current = slot.clone();
        slot
    }

    fn select(&mut self, state: &mut RunState, pool: &CardPool) -> Option<CardSlot> {
        if let Some(id) = state.forced_special.take() {
            if pool.special(id.as_str()).is_some() {
                state.window.clear();
                tracing::debug!(card = %id, "forced special card");
                return Some(CardSlot::Special(id));
            }
            tracing::warn!(card = %id, "forced special card not found, drawing from pool");
        }

        if pool.is_empty() {
            return None;
        }

        if state.used.len() >= pool.len() {
            tracing::trace!(cards = pool.len(), "card cycle reset");
            state.used = im::HashSet::new();
        }

        let unused: Vec<usize> = (0..pool.len()).filter(|i| !state.used.contains(i)).collect();
        let index = unused[self.rng.pick_index(unused.len())];
        state.used.insert(index);

        Some(CardSlot::Pool(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, CardKind};
    use crate::core::{ChoiceRecord, Direction, GameConfig, GameRng, ScriptedRng};

    fn pool(n: usize) -> CardPool {
        CardPool::from_cards(
            (0..n).map(|i| Card::new(format!("c{i}"), CardKind::category("team"))),
            [Card::new("flow_breaker", CardKind::Special)],
        )
        .unwrap()
    }

    fn state() -> RunState {
        RunState::new(&GameConfig::default(), Vec::new(), "A")
    }

    #[test]
    fn test_no_repeat_within_cycle() {
        let pool = pool(6);
        let mut state = state();
        let mut engine = SelectionEngine::new(Box::new(GameRng::new(7)));

        let mut seen = Vec::new();
        for _ in 0..6 {
            match engine.pick_next(&mut state, &pool) {
                Some(CardSlot::Pool(i)) => {
                    assert!(!seen.contains(&i));
                    seen.push(i);
                }
                other => panic!("unexpected slot {other:?}"),
            }
        }
        assert_eq!(state.used_count(), 6);

        // Draw 7 starts a new cycle.
        engine.pick_next(&mut state, &pool);
        assert_eq!(state.used_count(), 1);
    }

    #[test]
    fn test_scripted_draw_picks_among_unused() {
        let pool = pool(3);
        let mut state = state();
        // First pick index 0 of [0,1,2]; second pick index 0 of [1,2].
        let mut engine = SelectionEngine::new(Box::new(ScriptedRng::constant(0.0)));

        assert_eq!(engine.pick_next(&mut state, &pool), Some(CardSlot::Pool(0)));
        assert_eq!(engine.pick_next(&mut state, &pool), Some(CardSlot::Pool(1)));
        assert_eq!(engine.pick_next(&mut state, &pool), Some(CardSlot::Pool(2)));
    }

    #[test]
    fn test_forced_special_wins_and_clears_window() {
        let pool = pool(3);
        let mut state = state();
        state.window.push(ChoiceRecord { direction: Direction::Right, at_ms: 0 });
        state.force_special(CardId::new("flow_breaker"));

        let mut engine = SelectionEngine::new(Box::new(GameRng::new(1)));
        let slot = engine.pick_next(&mut state, &pool);

        assert_eq!(slot, Some(CardSlot::Special(CardId::new("flow_breaker"))));
        assert!(state.forced_special().is_none());
        assert!(state.window().is_empty());
        assert_eq!(state.used_count(), 0);
        assert_eq!(state.current(), slot.as_ref());
    }

    #[test]
    fn test_missing_special_falls_back_to_pool() {
        let pool = pool(3);
        let mut state = state();
        state.force_special(CardId::new("nope"));

        let mut engine = SelectionEngine::new(Box::new(GameRng::new(1)));
        let slot = engine.pick_next(&mut state, &pool);

        assert!(matches!(slot, Some(CardSlot::Pool(_))));
        assert!(state.forced_special().is_none());
    }

    #[test]
    fn test_empty_pool() {
        let pool = CardPool::new();
        let mut state = state();
        let mut engine = SelectionEngine::new(Box::new(GameRng::new(1)));
        assert_eq!(engine.pick_next(&mut state, &pool), None);
    }
}
