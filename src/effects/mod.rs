//! Effect system: deltas, modifiers and the resolution pipeline.
//!
//! - `EffectDelta`: Partial per-statistic adjustment
//! - `Modifier`: Run-long passive rule rescaling effects
//! - `EffectPipeline`: The five-stage transform from a card's raw effect
//!   to the delta applied to the statistics
//!
//! ## Design Philosophy
//!
//! Every stage is a plain function over `EffectDelta`, so each can be
//! tested alone and the whole pipeline stays deterministic for a given
//! random source.

mod delta;
mod modifier;
mod pipeline;

pub use delta::{round_half_up, EffectDelta};
pub use modifier::{
    apply_modifiers, GlobalMultipliers, Modifier, ModifierAffects, ModifierId, ModifierRegistry,
    MultiplierKey, StatMultiplier,
};
pub use pipeline::EffectPipeline;
