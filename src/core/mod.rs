//! Core engine types: statistics, choices, RNG, clock, configuration, errors.
//!
//! This module contains the building blocks shared by the effect
//! pipeline, the rules and the turn engine.

pub mod stats;
pub mod choice;
pub mod rng;
pub mod clock;
pub mod config;
pub mod error;

pub use stats::{StatChanges, StatKey, StatMap, StatVector, STAT_MAX, STAT_MIN};
pub use choice::{ChoiceRecord, ChoiceWindow, Direction};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{FlowBreakerConfig, GameConfig, PipelineTuning, StatBounds, StatWarning};
pub use error::{ConfigError, ContentError, SetupError};
