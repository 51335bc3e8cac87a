//! # hr-swipe
//!
//! Turn resolution engine for a swipe-card career survival game.
//!
//! Each card offers two choices. A choice runs the card's effect through
//! the run's modifiers and a fixed balancing pipeline, mutates four
//! bounded statistics, and may raise warnings, a promotion, a flow-breaker
//! intervention, or an ending.
//!
//! ## Design Principles
//!
//! 1. **Owned State**: One `RunState` per run, owned by its `TurnEngine`.
//!    No globals.
//!
//! 2. **Injected Randomness and Time**: Card draws, modifier offers and
//!    chaos variance read from `RandomSource` streams; choice timestamps
//!    come from a `Clock`. Seed both and a run replays exactly with
//!    the same crate and dependency versions.
//!
//! 3. **Guards, Not Errors**: Ignored input, unknown modifiers and
//!    exhausted rerolls are outcomes. Only loading returns `Result`.
//!
//! ## Modules
//!
//! - `core`: Statistics, choices, RNG, clock, configuration, errors
//! - `cards`: Card definitions and the card pool
//! - `effects`: Effect deltas, modifiers, the effect pipeline
//! - `rules`: Titles, warnings, endings, flow breaker
//! - `content`: Loaded cards, modifiers and display text
//! - `session`: Modifier draft, turn engine, card selection, events

pub mod core;
pub mod cards;
pub mod effects;
pub mod rules;
pub mod content;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    StatKey, StatMap, StatVector, StatChanges,
    Direction, ChoiceRecord,
    GameRng, RandomSource, ScriptedRng,
    Clock, ManualClock, SystemClock,
    GameConfig, ConfigError, ContentError, SetupError,
};

pub use crate::cards::{Card, CardId, CardKind, CardPool};

pub use crate::effects::{EffectDelta, EffectPipeline, Modifier, ModifierId, ModifierRegistry};

pub use crate::rules::{Bound, EndingReason, EndingTrigger, TitleLadder, TitleTier};

pub use crate::content::{Content, EndingInfo, TitleInfo};

pub use crate::session::{
    ChoiceOutcome, IgnoreReason, TurnEngine, TurnReport,
    EngineEvent, Events, Notice, Presenter,
    RunSetup, RunState, StartOutcome, RngStreams,
};
