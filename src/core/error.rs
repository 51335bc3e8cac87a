//! Errors raised while loading configuration and content.
//!
//! Gameplay itself never fails: ignored input, unknown modifier ids and
//! exhausted rerolls are reported through outcomes and notices. Only the
//! loading boundary returns `Result`.

use thiserror::Error;

use super::stats::StatKey;

/// Invalid game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("stat bounds are empty: min {min} must be below max {max}")]
    InvalidBounds { min: i32, max: i32 },

    #[error("initial {stat} value {value} is outside the stat bounds")]
    InitialStatOutOfBounds { stat: StatKey, value: i32 },

    #[error("title thresholds must start at turn 1 and strictly ascend")]
    InvalidTitleThresholds,

    #[error("effect band [{min}, {max}] is invalid")]
    InvalidBand { min: i32, max: i32 },

    #[error("invalid flow breaker: {0}")]
    InvalidFlowBreaker(&'static str),
}

/// Invalid card, modifier or text content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("the ordinary card pool is empty")]
    EmptyPool,

    #[error("duplicate card id `{0}`")]
    DuplicateCard(String),

    #[error("duplicate modifier id `{0}`")]
    DuplicateModifier(String),

    #[error("special card `{0}` is not of type `special`")]
    NotSpecial(String),

    #[error("ordinary card `{0}` is of type `special`")]
    SpecialInPool(String),

    #[error("flow breaker card `{0}` is not among the special cards")]
    MissingFlowBreakerCard(String),

    #[error("no modifiers to draft from")]
    NoModifiers,
}

/// Failure to set up a run.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Content(#[from] ContentError),
}
