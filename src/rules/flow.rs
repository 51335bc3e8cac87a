//! Flow breaker: detection of rapid identical choices.

use crate::core::{ChoiceWindow, FlowBreakerConfig};

/// Detector for rapid runs of the favorable choice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlowBreaker {
    config: FlowBreakerConfig,
}

impl FlowBreaker {
    #[must_use]
    pub fn new(config: FlowBreakerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &FlowBreakerConfig {
        &self.config
    }

    /// Whether the recent choices warrant a forced intervention.
    ///
    /// Runs only on slides that are a multiple of `check_every`. Looks at
    /// the last `run_length` choices: all must be the favorable direction
    /// and span at most `max_span_ms` from oldest to newest.
    #[must_use]
    pub fn check(&self, window: &ChoiceWindow, slide_count: u32) -> bool {
        let config = &self.config;
        if slide_count == 0 || slide_count.checked_rem(config.check_every) != Some(0) {
            return false;
        }

        let Some(recent) = window.last_n(config.run_length) else {
            return false;
        };

        if !recent.iter().all(|c| c.direction == config.favorable) {
            return false;
        }

        match (recent.front(), recent.back()) {
            (Some(first), Some(last)) => {
                last.at_ms.saturating_sub(first.at_ms) <= config.max_span_ms
            }
            _ => false,
        }
    }
}
