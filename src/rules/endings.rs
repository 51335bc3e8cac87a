//! Ending triggers.
//!
//! An ending is keyed by a statistic and the bound it reached. Triggers
//! are evaluated in declaration order every turn; the first match ends
//! the run.

use serde::{Deserialize, Serialize};

use crate::core::{StatKey, StatVector};

/// Which bound of a statistic a trigger watches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    /// Value at or below the minimum.
    Low,
    /// Value at or above the maximum.
    High,
}

impl Bound {
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Bound::Low => "Low",
            Bound::High => "High",
        }
    }
}

/// A terminal condition on one statistic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndingTrigger {
    pub stat: StatKey,
    pub bound: Bound,
}

impl EndingTrigger {
    #[must_use]
    pub const fn new(stat: StatKey, bound: Bound) -> Self {
        Self { stat, bound }
    }

    #[must_use]
    pub fn matches(&self, stats: &StatVector) -> bool {
        let value = stats.get(self.stat);
        let bounds = stats.bounds();
        match self.bound {
            Bound::Low => value <= bounds.min,
            Bound::High => value >= bounds.max,
        }
    }

    /// Content key of this trigger's ending.
    #[must_use]
    pub fn key(&self) -> String {
        EndingReason::from(*self).key()
    }
}

/// The trigger that ended a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndingReason {
    pub stat: StatKey,
    pub bound: Bound,
}

impl EndingReason {
    /// Content key of the ending, e.g. `trustLow`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{}", self.stat.as_str(), self.bound.suffix())
    }
}

impl From<EndingTrigger> for EndingReason {
    fn from(trigger: EndingTrigger) -> Self {
        Self { stat: trigger.stat, bound: trigger.bound }
    }
}

impl std::fmt::Display for EndingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stat, self.bound.suffix())
    }
}

/// First trigger, in declaration order, that matches the stats.
#[must_use]
pub fn check_ending(triggers: &[EndingTrigger], stats: &StatVector) -> Option<EndingReason> {
    triggers.iter().find(|t| t.matches(stats)).map(|&t| EndingReason::from(t))
}
