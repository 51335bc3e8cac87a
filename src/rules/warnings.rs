//! Low-value statistic warnings.
//!
//! Each configured warning fires once when its statistic drops below the
//! threshold and re-arms when the statistic recovers to the threshold or
//! above.

use serde::{Deserialize, Serialize};

use crate::core::{StatKey, StatMap, StatVector, StatWarning};

/// A warning raised this turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatWarningEvent {
    pub stat: StatKey,
    pub value: i32,
    pub threshold: i32,
    /// Rendered message template.
    pub message: String,
}

/// Per-statistic "already warned" flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningTracker {
    warned: StatMap<bool>,
}

impl WarningTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_warned(&self, stat: StatKey) -> bool {
        self.warned[stat]
    }

    /// Update the flags for the current stats, returning newly raised warnings.
    pub fn check(&mut self, warnings: &[StatWarning], stats: &StatVector) -> Vec<StatWarningEvent> {
        let mut raised = Vec::new();

        for warning in warnings {
            let value = stats.get(warning.stat);
            let flagged = &mut self.warned[warning.stat];

            if value < warning.threshold && !*flagged {
                *flagged = true;
                raised.push(StatWarningEvent {
                    stat: warning.stat,
                    value,
                    threshold: warning.threshold,
                    message: warning.render(value),
                });
            } else if value >= warning.threshold && *flagged {
                *flagged = false;
            }
        }

        raised
    }

    pub fn reset(&mut self) {
        self.warned = StatMap::default();
    }
}
