//! Pre-run modifier draft.
//!
//! A `RunSetup` offers `modifier_count` random modifiers, lets the player
//! reroll the offer a limited number of times, and starts the run once a
//! player name is given. Rejected actions produce a `Notice`, never an
//! error.

use std::sync::Arc;

use super::engine::TurnEngine;
use super::events::{EngineEvent, Events, Notice};
use crate::content::Content;
use crate::core::{Clock, GameConfig, GameRng, RandomSource, SetupError, SystemClock};
use crate::effects::ModifierId;

/// Independent random streams of a run.
pub struct RngStreams {
    /// Card draws.
    pub selection: Box<dyn RandomSource>,
    /// Chaos modifier variance.
    pub chaos: Box<dyn RandomSource>,
    /// Modifier offers.
    pub draft: Box<dyn RandomSource>,
}

impl RngStreams {
    /// Derive every stream from one seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::from_root(&GameRng::new(seed))
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_root(&GameRng::from_entropy())
    }

    fn from_root(root: &GameRng) -> Self {
        Self {
            selection: Box::new(root.for_context("selection")),
            chaos: Box::new(root.for_context("chaos")),
            draft: Box::new(root.for_context("draft")),
        }
    }
}

/// Result of `RunSetup::start`.
#[derive(Debug)]
pub enum StartOutcome {
    /// The run started; `events` shows the first card.
    Started { engine: Box<TurnEngine>, events: Events },
    /// The setup is handed back unchanged.
    Rejected { setup: Box<RunSetup>, notice: Notice },
}

/// Modifier draft before a run.
pub struct RunSetup {
    content: Arc<Content>,
    config: GameConfig,
    streams: RngStreams,
    clock: Box<dyn Clock>,
    offered: Vec<ModifierId>,
    rerolls_left: u32,
}

impl RunSetup {
    /// Validate inputs and draw the first offer, with seeded streams and the system clock.
    pub fn new(content: Arc<Content>, config: GameConfig, seed: u64) -> Result<Self, SetupError> {
        let streams = RngStreams::from_seed(seed);
        Self::with_streams(content, config, streams, Box::new(SystemClock::new()))
    }

    /// Validate inputs and draw the first offer.
    pub fn with_streams(
        content: Arc<Content>,
        config: GameConfig,
        streams: RngStreams,
        clock: Box<dyn Clock>,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        content.validate(&config)?;
        Ok(Self::from_parts(content, config, streams, clock))
    }

    pub(crate) fn from_parts(
        content: Arc<Content>,
        config: GameConfig,
        mut streams: RngStreams,
        clock: Box<dyn Clock>,
    ) -> Self {
        let offered = content.modifiers().draw(config.modifier_count, streams.draft.as_mut());
        let rerolls_left = config.modifier_rerolls;
        Self {
            content,
            config,
            streams,
            clock,
            offered,
            rerolls_left,
        }
    }

    #[must_use]
    pub fn offered(&self) -> &[ModifierId] {
        &self.offered
    }

    #[must_use]
    pub fn rerolls_left(&self) -> u32 {
        self.rerolls_left
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current offer as an event.
    #[must_use]
    pub fn offer_event(&self) -> EngineEvent {
        EngineEvent::ModifierOffered {
            offered: self.offered.clone(),
            rerolls_left: self.rerolls_left,
        }
    }

    /// Replace the offer, consuming one reroll.
    pub fn reroll(&mut self) -> EngineEvent {
        if self.rerolls_left == 0 {
            tracing::debug!("reroll refused, none left");
            return EngineEvent::Notice(Notice::RerollsExhausted);
        }
        self.rerolls_left -= 1;
        self.offered = self
            .content
            .modifiers()
            .draw(self.config.modifier_count, self.streams.draft.as_mut());
        tracing::debug!(
            offered = ?self.offered,
            rerolls_left = self.rerolls_left,
            "modifiers rerolled"
        );
        self.offer_event()
    }

    /// Start the run with the offered modifiers.
    pub fn start(self, player_name: &str) -> StartOutcome {
        let name = player_name.trim();
        if name.is_empty() {
            return StartOutcome::Rejected {
                setup: Box::new(self),
                notice: Notice::NameRequired,
            };
        }

        let (engine, events) = TurnEngine::start(
            self.content,
            self.config,
            self.offered,
            name.to_string(),
            self.streams,
            self.clock,
        );
        StartOutcome::Started {
            engine: Box::new(engine),
            events,
        }
    }
}

impl std::fmt::Debug for RunSetup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunSetup")
            .field("offered", &self.offered)
            .field("rerolls_left", &self.rerolls_left)
            .finish_non_exhaustive()
    }
}
