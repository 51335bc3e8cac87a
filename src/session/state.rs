//! Mutable state of one run.
//!
//! `RunState` is owned by the `TurnEngine` and only changes through its
//! operations and card selection. Collections use `im` so `snapshot()`
//! is cheap enough to take every turn.

use im::HashSet as ImHashSet;

use crate::cards::CardId;
use crate::core::{ChoiceWindow, GameConfig, StatVector};
use crate::effects::ModifierId;
use crate::rules::{EndingReason, WarningTracker};

/// Resolution phase of the turn engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for a choice.
    #[default]
    Idle,
    /// A choice was accepted and is being resolved; input is locked.
    Resolving,
    /// An ending was reached.
    Ended,
}

/// The card currently in front of the player.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CardSlot {
    /// Ordinary card by pool index.
    Pool(usize),
    /// Forced special card by id.
    Special(CardId),
}

/// All per-run state.
#[derive(Clone, Debug)]
pub struct RunState {
    // === Progression ===
    /// Turn number (starts at 1).
    pub(crate) turn: u32,

    /// Accepted choices, including the one being resolved.
    pub(crate) slide_count: u32,

    pub(crate) phase: Phase,

    /// A promotion or flow-breaker overlay is holding the input lock.
    pub(crate) overlay: bool,

    pub(crate) ending: Option<EndingReason>,

    // === Player ===
    pub(crate) stats: StatVector,

    pub(crate) warnings: WarningTracker,

    pub(crate) player_name: String,

    /// Active modifiers in application order.
    pub(crate) modifiers: Vec<ModifierId>,

    // === Selection ===
    pub(crate) current: Option<CardSlot>,

    /// Pool indices shown in the current shuffle cycle.
    pub(crate) used: ImHashSet<usize>,

    /// Special card forced onto the next draw.
    pub(crate) forced_special: Option<CardId>,

    /// Recent timestamped choices for flow-breaker detection.
    pub(crate) window: ChoiceWindow,
}

impl RunState {
    /// Fresh state at turn 1 with the configured initial stats.
    #[must_use]
    pub fn new(
        config: &GameConfig,
        modifiers: Vec<ModifierId>,
        player_name: impl Into<String>,
    ) -> Self {
        Self {
            turn: 1,
            slide_count: 0,
            phase: Phase::Idle,
            overlay: false,
            ending: None,
            stats: StatVector::new(config.initial_stats, config.bounds),
            warnings: WarningTracker::new(),
            player_name: player_name.into(),
            modifiers,
            current: None,
            used: ImHashSet::new(),
            forced_special: None,
            window: ChoiceWindow::new(config.flow_breaker.window),
        }
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn slide_count(&self) -> u32 {
        self.slide_count
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    #[must_use]
    pub fn overlay_active(&self) -> bool {
        self.overlay
    }

    #[must_use]
    pub fn ending(&self) -> Option<EndingReason> {
        self.ending
    }

    #[must_use]
    pub fn stats(&self) -> &StatVector {
        &self.stats
    }

    #[must_use]
    pub fn warnings(&self) -> &WarningTracker {
        &self.warnings
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn modifiers(&self) -> &[ModifierId] {
        &self.modifiers
    }

    #[must_use]
    pub fn current(&self) -> Option<&CardSlot> {
        self.current.as_ref()
    }

    /// Whether a pool index was already shown this shuffle cycle.
    #[must_use]
    pub fn is_used(&self, index: usize) -> bool {
        self.used.contains(&index)
    }

    #[must_use]
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    #[must_use]
    pub fn forced_special(&self) -> Option<&CardId> {
        self.forced_special.as_ref()
    }

    /// Force a special card onto the next draw.
    pub fn force_special(&mut self, id: CardId) {
        self.forced_special = Some(id);
    }

    #[must_use]
    pub fn window(&self) -> &ChoiceWindow {
        &self.window
    }

    /// Cheap copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StatKey, StatMap};

    #[test]
    fn test_new_run_state() {
        let config = GameConfig::default();
        let state = RunState::new(&config, vec![ModifierId::new("steady")], "Alex");

        assert_eq!(state.turn(), 1);
        assert_eq!(state.slide_count(), 0);
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.is_game_over());
        assert_eq!(state.stats().get(StatKey::Sanity), 65);
        assert_eq!(state.player_name(), "Alex");
        assert_eq!(state.modifiers().len(), 1);
        assert!(state.current().is_none());
        assert!(state.window().is_empty());
    }

    #[test]
    fn test_initial_stats_from_config() {
        let config = GameConfig::default().with_initial_stats(StatMap {
            trust: 10,
            kpi: 20,
            karma: 30,
            sanity: 40,
        });
        let state = RunState::new(&config, Vec::new(), "A");
        assert_eq!(state.stats().get(StatKey::Karma), 30);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let config = GameConfig::default();
        let mut state = RunState::new(&config, Vec::new(), "A");
        state.used.insert(3);

        let snapshot = state.snapshot();
        state.used.insert(4);
        state.turn = 9;

        assert!(snapshot.is_used(3));
        assert!(!snapshot.is_used(4));
        assert_eq!(snapshot.turn(), 1);
    }
}
