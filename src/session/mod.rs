//! Running a game: setup, turn resolution, card selection.
//!
//! ## Flow
//!
//! ```text
//! RunSetup ──start──▶ TurnEngine ──process_choice──▶ ... ──▶ Ended
//!    ▲                                                         │
//!    └───────────────────────── restart ◀──────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use hr_swipe::cards::{Card, CardKind, CardPool};
//! use hr_swipe::content::Content;
//! use hr_swipe::core::{Direction, GameConfig, StatKey};
//! use hr_swipe::effects::{EffectDelta, Modifier, ModifierRegistry};
//! use hr_swipe::session::{RunSetup, StartOutcome};
//!
//! let pool = CardPool::from_cards(
//!     [Card::new("praise", CardKind::category("boss"))
//!         .with_right(EffectDelta::new().with(StatKey::Trust, 20))],
//!     [Card::new("flow_breaker", CardKind::Special)],
//! ).unwrap();
//! let modifiers = ModifierRegistry::from_modifiers([Modifier::new("steady")]).unwrap();
//! let content = Arc::new(Content::new(pool, modifiers));
//!
//! let setup = RunSetup::new(content, GameConfig::default(), 42).unwrap();
//! let StartOutcome::Started { mut engine, .. } = setup.start("Alex") else { unreachable!() };
//!
//! let outcome = engine.process_choice_at(Direction::Right, 0);
//! assert!(outcome.report().is_some());
//! assert_eq!(engine.state().stats().get(StatKey::Trust), 79);
//! ```

mod engine;
mod events;
mod selection;
mod setup;
mod state;

pub use engine::{ChoiceOutcome, IgnoreReason, TurnEngine, TurnReport};
pub use events::{EngineEvent, Events, Notice, Presenter};
pub use selection::SelectionEngine;
pub use setup::{RngStreams, RunSetup, StartOutcome};
pub use state::{CardSlot, Phase, RunState};
