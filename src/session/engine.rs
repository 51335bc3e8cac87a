//! Turn resolution.
//!
//! ## Turn order
//!
//! An accepted choice runs to completion in a fixed order:
//! 1. count the slide, record the timestamped choice, lock input
//! 2. resolve the effect pipeline against the current stats
//! 3. apply the delta, then check warnings, the flow breaker and endings
//! 4. on an ending, stop; otherwise advance the turn, check promotion,
//!    and draw the next card
//!
//! Hosts that animate between steps 2 and 3 use `begin_choice_at` and
//! `complete_choice`; everyone else calls `process_choice`.

use std::sync::Arc;

use super::events::{EngineEvent, Events};
use super::selection::SelectionEngine;
use super::setup::{RngStreams, RunSetup};
use super::state::{CardSlot, Phase, RunState};
use crate::cards::{Card, CardId};
use crate::content::Content;
use crate::core::{ChoiceRecord, Clock, Direction, GameConfig, RandomSource, StatChanges};
use crate::effects::{EffectDelta, EffectPipeline, ModifierId};
use crate::rules::{check_ending, EndingReason, FlowBreaker, TitleLadder, TitleTier};

/// Why a choice was not accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// A previous choice is still being resolved.
    Resolving,
    /// An overlay holds the input lock.
    OverlayActive,
    /// The run has ended.
    GameOver,
    /// No card is in front of the player.
    NoCard,
    /// `complete_choice` without an accepted choice.
    NothingPending,
}

/// Summary of one resolved turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    /// Turn the choice was made on.
    pub turn: u32,
    pub direction: Direction,
    /// Final delta from the effect pipeline.
    pub delta: EffectDelta,
    /// Requested change per statistic, for display.
    pub changes: StatChanges,
    pub events: Events,
    pub ending: Option<EndingReason>,
}

/// Result of submitting a choice.
#[derive(Clone, Debug, PartialEq)]
pub enum ChoiceOutcome {
    Ignored(IgnoreReason),
    Resolved(TurnReport),
}

impl ChoiceOutcome {
    #[must_use]
    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            ChoiceOutcome::Resolved(report) => Some(report),
            ChoiceOutcome::Ignored(_) => None,
        }
    }

    #[must_use]
    pub fn into_report(self) -> Option<TurnReport> {
        match self {
            ChoiceOutcome::Resolved(report) => Some(report),
            ChoiceOutcome::Ignored(_) => None,
        }
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, ChoiceOutcome::Ignored(_))
    }
}

/// A choice accepted by `begin_choice_at`, awaiting completion.
#[derive(Clone, Copy, Debug)]
struct PendingTurn {
    direction: Direction,
    delta: EffectDelta,
    tier_before: TitleTier,
}

/// Drives a run from the first card to an ending.
pub struct TurnEngine {
    content: Arc<Content>,
    config: GameConfig,
    pipeline: EffectPipeline,
    ladder: TitleLadder,
    flow_breaker: FlowBreaker,
    state: RunState,
    selection: SelectionEngine,
    chaos_rng: Box<dyn RandomSource>,
    draft_rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
    pending: Option<PendingTurn>,
}

impl TurnEngine {
    /// Build an engine for a fresh run and draw the first card.
    pub(crate) fn start(
        content: Arc<Content>,
        config: GameConfig,
        modifiers: Vec<ModifierId>,
        player_name: String,
        streams: RngStreams,
        clock: Box<dyn Clock>,
    ) -> (Self, Events) {
        let state = RunState::new(&config, modifiers, player_name);

        let mut engine = Self {
            pipeline: EffectPipeline::new(config.pipeline.clone()),
            ladder: TitleLadder::new(config.title_thresholds.clone()),
            flow_breaker: FlowBreaker::new(config.flow_breaker.clone()),
            selection: SelectionEngine::new(streams.selection),
            chaos_rng: streams.chaos,
            draft_rng: streams.draft,
            content,
            config,
            state,
            clock,
            pending: None,
        };

        tracing::info!(
            player = %engine.state.player_name,
            modifiers = ?engine.state.modifiers,
            "run started"
        );

        let mut events = Events::new();
        engine.draw_next(&mut events);
        (engine, events)
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &RunState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    #[must_use]
    pub fn ladder(&self) -> &TitleLadder {
        &self.ladder
    }

    #[must_use]
    pub fn title(&self) -> TitleTier {
        self.ladder.tier_for_turn(self.state.turn)
    }

    /// The card in front of the player.
    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.state.current.as_ref().and_then(|slot| lookup(&self.content, slot))
    }

    /// Whether a choice or drag start would be accepted now.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.check_input().is_ok()
    }

    // === Choices ===

    /// Resolve a choice timestamped by the engine's clock.
    pub fn process_choice(&mut self, direction: Direction) -> ChoiceOutcome {
        let now = self.clock.now_ms();
        self.process_choice_at(direction, now)
    }

    /// Resolve a choice made at `at_ms`.
    pub fn process_choice_at(&mut self, direction: Direction, at_ms: u64) -> ChoiceOutcome {
        if let Err(reason) = self.begin_choice_at(direction, at_ms) {
            return ChoiceOutcome::Ignored(reason);
        }
        self.complete_choice()
    }

    /// Accept a choice and compute its delta without applying it.
    ///
    /// Input stays locked until `complete_choice`.
    pub fn begin_choice_at(
        &mut self,
        direction: Direction,
        at_ms: u64,
    ) -> Result<EffectDelta, IgnoreReason> {
        self.check_input()?;
        let content = Arc::clone(&self.content);
        let Some(card) = self.state.current.as_ref().and_then(|slot| lookup(&content, slot)) else {
            return Err(IgnoreReason::NoCard);
        };

        self.state.slide_count += 1;
        self.state.window.push(ChoiceRecord { direction, at_ms });
        self.state.phase = Phase::Resolving;

        let tier_before = self.ladder.tier_for_turn(self.state.turn);
        let delta = self.pipeline.resolve(
            card,
            direction,
            &self.state.modifiers,
            content.modifiers(),
            &self.state.stats,
            self.chaos_rng.as_mut(),
        );

        self.pending = Some(PendingTurn { direction, delta, tier_before });
        Ok(delta)
    }

    /// Apply the pending choice and run the post-turn checks.
    pub fn complete_choice(&mut self) -> ChoiceOutcome {
        let Some(pending) = self.pending.take() else {
            return ChoiceOutcome::Ignored(IgnoreReason::NothingPending);
        };

        let turn = self.state.turn;
        let mut events = Events::new();

        let changes = self.state.stats.apply_delta(pending.delta.as_map());
        tracing::debug!(
            turn,
            direction = %pending.direction,
            delta = %pending.delta,
            "turn resolved"
        );
        events.push(EngineEvent::StatsChanged {
            changes,
            stats: *self.state.stats.values(),
        });

        for warning in self.state.warnings.check(&self.config.warnings, &self.state.stats) {
            tracing::debug!(stat = %warning.stat, value = warning.value, "stat warning");
            events.push(EngineEvent::Warning(warning));
        }

        if self.flow_breaker.check(&self.state.window, self.state.slide_count) {
            let special = CardId::new(self.config.flow_breaker.special_card.clone());
            tracing::info!(
                slide = self.state.slide_count,
                card = %special,
                "flow breaker triggered"
            );
            self.state.window.clear();
            self.state.forced_special = Some(special.clone());
            self.lock_overlay();
            events.push(EngineEvent::FlowBreaker { special_card: special });
        }

        if let Some(reason) = check_ending(&self.config.endings, &self.state.stats) {
            tracing::info!(turn, ending = %reason, "run ended");
            self.state.phase = Phase::Ended;
            self.state.ending = Some(reason);
            events.push(EngineEvent::Ended { reason, turn });
            return ChoiceOutcome::Resolved(TurnReport {
                turn,
                direction: pending.direction,
                delta: pending.delta,
                changes,
                events,
                ending: Some(reason),
            });
        }

        self.state.turn += 1;
        let tier = self.ladder.tier_for_turn(self.state.turn);
        events.push(EngineEvent::TurnAdvanced { turn: self.state.turn, tier });

        if tier != pending.tier_before {
            tracing::info!(
                turn = self.state.turn,
                from = %pending.tier_before,
                to = %tier,
                "promotion"
            );
            self.lock_overlay();
            events.push(EngineEvent::Promotion { from: pending.tier_before, to: tier });
        }

        self.state.phase = Phase::Idle;
        self.draw_next(&mut events);

        ChoiceOutcome::Resolved(TurnReport {
            turn,
            direction: pending.direction,
            delta: pending.delta,
            changes,
            events,
            ending: None,
        })
    }

    /// Release the overlay lock. Returns whether one was held.
    pub fn dismiss_overlay(&mut self) -> bool {
        std::mem::replace(&mut self.state.overlay, false)
    }

    /// End this run and go back to the modifier draft.
    #[must_use]
    pub fn restart(self) -> RunSetup {
        tracing::debug!(turn = self.state.turn, "run restarted");
        let streams = RngStreams {
            selection: self.selection.into_rng(),
            chaos: self.chaos_rng,
            draft: self.draft_rng,
        };
        RunSetup::from_parts(self.content, self.config, streams, self.clock)
    }

    // === Internals ===

    fn check_input(&self) -> Result<(), IgnoreReason> {
        match self.state.phase {
            Phase::Ended => Err(IgnoreReason::GameOver),
            Phase::Resolving => Err(IgnoreReason::Resolving),
            Phase::Idle if self.state.overlay => Err(IgnoreReason::OverlayActive),
            Phase::Idle => Ok(()),
        }
    }

    fn lock_overlay(&mut self) {
        if self.config.overlay_locks_input {
            self.state.overlay = true;
        }
    }

    fn draw_next(&mut self, events: &mut Events) {
        let content = Arc::clone(&self.content);
        let Some(slot) = self.selection.pick_next(&mut self.state, content.cards()) else {
            tracing::warn!("no card available");
            return;
        };
        if let Some(card) = lookup(&content, &slot) {
            events.push(EngineEvent::CardShown {
                card: card.clone(),
                turn: self.state.turn,
            });
        }
    }
}

fn lookup<'a>(content: &'a Content, slot: &CardSlot) -> Option<&'a Card> {
    match slot {
        CardSlot::Pool(index) => content.cards().get(*index),
        CardSlot::Special(id) => content.cards().special(id.as_str()),
    }
}

impl std::fmt::Debug for TurnEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnEngine")
            .field("state", &self.state)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
