//! Game rules evaluated after each turn.
//!
//! - `TitleLadder`: title tier for a turn count
//! - `WarningTracker`: once-per-crossing low-value warnings
//! - `check_ending`: first matching ending trigger
//! - `FlowBreaker`: rapid identical-choice detection

mod endings;
mod flow;
mod titles;
mod warnings;

pub use endings::{check_ending, Bound, EndingReason, EndingTrigger};
pub use flow::FlowBreaker;
pub use titles::{TitleLadder, TitleTier};
pub use warnings::{StatWarningEvent, WarningTracker};
