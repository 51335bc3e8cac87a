//! Game configuration types.
//!
//! Every numeric constant of the game lives here:
//! - `StatBounds`: lower and upper bound of each statistic
//! - `PipelineTuning`: constants of the effect pipeline stages
//! - `FlowBreakerConfig`: rapid-choice detection parameters
//! - `GameConfig`: combines all configuration
//!
//! `GameConfig::default()` is the shipped tuning. Hosts may load an
//! override from JSON; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use super::choice::Direction;
use super::error::ConfigError;
use super::stats::{StatKey, StatMap, STAT_MAX, STAT_MIN};
use crate::rules::{Bound, EndingTrigger};

/// Inclusive bounds applied to every statistic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// `max(min, min(max, value))`.
    #[must_use]
    pub fn clamp(self, value: i32) -> i32 {
        value.min(self.max).max(self.min)
    }

    #[must_use]
    pub fn contains(self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for StatBounds {
    fn default() -> Self {
        Self {
            min: STAT_MIN,
            max: STAT_MAX,
        }
    }
}

/// Low-value warning for one statistic.
///
/// `message` is an opaque template; `{value}` is replaced with the
/// current value when the warning fires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatWarning {
    pub stat: StatKey,
    pub threshold: i32,
    #[serde(default)]
    pub message: String,
}

impl StatWarning {
    pub fn new(stat: StatKey, threshold: i32, message: impl Into<String>) -> Self {
        Self {
            stat,
            threshold,
            message: message.into(),
        }
    }

    /// Render the message template for a value.
    #[must_use]
    pub fn render(&self, value: i32) -> String {
        self.message.replace("{value}", &value.to_string())
    }
}

/// Constants of the effect pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineTuning {
    /// Global dampener applied after modifiers.
    pub magnitude_scale: f64,

    /// Smallest magnitude a non-zero delta may have after band clamping.
    pub band_min: i32,

    /// Largest magnitude a delta may have after band clamping.
    pub band_max: i32,

    /// Amount subtracted from the paired statistic by a trade-off.
    pub trade_off_penalty: i32,

    /// Value at which soft-cap rebalancing is neutral.
    pub soft_cap_midpoint: i32,

    /// Maximum relative strength of soft-cap rebalancing.
    pub soft_cap_strength: f64,

    /// Relative spread of chaos variance (0.2 = ±20%).
    pub chaos_variance: f64,
}

impl Default for PipelineTuning {
    fn default() -> Self {
        Self {
            magnitude_scale: 0.7,
            band_min: 5,
            band_max: 15,
            trade_off_penalty: 5,
            soft_cap_midpoint: 50,
            soft_cap_strength: 0.1,
            chaos_variance: 0.2,
        }
    }
}

/// Rapid identical-choice detection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowBreakerConfig {
    /// Number of recent choices kept in the rolling window.
    pub window: usize,

    /// The check runs only when the slide counter is a multiple of this.
    pub check_every: u32,

    /// Number of trailing choices inspected.
    pub run_length: usize,

    /// Maximum time span of the inspected choices, in milliseconds.
    pub max_span_ms: u64,

    /// Direction whose repetition triggers the breaker.
    pub favorable: Direction,

    /// Special card forced onto the next draw.
    pub special_card: String,
}

impl Default for FlowBreakerConfig {
    fn default() -> Self {
        Self {
            window: 5,
            check_every: 20,
            run_length: 4,
            max_span_ms: 3000,
            favorable: Direction::Right,
            special_card: "flow_breaker".to_string(),
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Bounds of every statistic.
    pub bounds: StatBounds,

    /// Statistic values at run start.
    pub initial_stats: StatMap<i32>,

    /// Turn at which each title tier starts. Must start at 1 and ascend.
    pub title_thresholds: Vec<u32>,

    /// Low-value warnings.
    pub warnings: Vec<StatWarning>,

    /// Ending triggers in precedence order.
    pub endings: Vec<EndingTrigger>,

    pub pipeline: PipelineTuning,

    pub flow_breaker: FlowBreakerConfig,

    /// Modifiers offered (and kept) per run.
    pub modifier_count: usize,

    /// Re-draws of the offered modifiers allowed before a run starts.
    pub modifier_rerolls: u32,

    /// Promotion and flow-breaker overlays keep input locked until
    /// the host dismisses them.
    pub overlay_locks_input: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bounds: StatBounds::default(),
            initial_stats: StatMap::with_value(65),
            title_thresholds: vec![1, 15, 35, 70, 150],
            warnings: vec![
                StatWarning::new(
                    StatKey::Trust,
                    15,
                    "Boss trust is down to {value}. You may be fired soon.",
                ),
                StatWarning::new(
                    StatKey::Kpi,
                    15,
                    "Performance is down to {value}. Someone will need a scapegoat.",
                ),
                StatWarning::new(
                    StatKey::Karma,
                    15,
                    "Reputation is down to {value}. The staff are turning on you.",
                ),
                StatWarning::new(
                    StatKey::Sanity,
                    15,
                    "Conscience is down to {value}. You are close to breaking.",
                ),
            ],
            endings: StatKey::ALL
                .into_iter()
                .map(|stat| EndingTrigger::new(stat, Bound::Low))
                .collect(),
            pipeline: PipelineTuning::default(),
            flow_breaker: FlowBreakerConfig::default(),
            modifier_count: 1,
            modifier_rerolls: 3,
            overlay_locks_input: true,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the initial statistics.
    #[must_use]
    pub fn with_initial_stats(mut self, stats: StatMap<i32>) -> Self {
        self.initial_stats = stats;
        self
    }

    /// Set the title thresholds.
    #[must_use]
    pub fn with_title_thresholds(mut self, thresholds: Vec<u32>) -> Self {
        self.title_thresholds = thresholds;
        self
    }

    /// Set the ending triggers.
    #[must_use]
    pub fn with_endings(mut self, endings: Vec<EndingTrigger>) -> Self {
        self.endings = endings;
        self
    }

    /// Set the flow-breaker parameters.
    #[must_use]
    pub fn with_flow_breaker(mut self, flow_breaker: FlowBreakerConfig) -> Self {
        self.flow_breaker = flow_breaker;
        self
    }

    /// Set the number of modifier rerolls.
    #[must_use]
    pub fn with_modifier_rerolls(mut self, rerolls: u32) -> Self {
        self.modifier_rerolls = rerolls;
        self
    }

    /// Set whether overlays hold the input lock.
    #[must_use]
    pub fn with_overlay_lock(mut self, locks: bool) -> Self {
        self.overlay_locks_input = locks;
        self
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let StatBounds { min, max } = self.bounds;
        if min >= max {
            return Err(ConfigError::InvalidBounds { min, max });
        }

        for (stat, &value) in self.initial_stats.iter() {
            if !self.bounds.contains(value) {
                return Err(ConfigError::InitialStatOutOfBounds { stat, value });
            }
        }

        match self.title_thresholds.first() {
            Some(1) => {}
            _ => return Err(ConfigError::InvalidTitleThresholds),
        }
        if self.title_thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::InvalidTitleThresholds);
        }

        let tuning = &self.pipeline;
        if tuning.band_min < 0 || tuning.band_min > tuning.band_max {
            return Err(ConfigError::InvalidBand {
                min: tuning.band_min,
                max: tuning.band_max,
            });
        }

        let fb = &self.flow_breaker;
        if fb.check_every == 0 {
            return Err(ConfigError::InvalidFlowBreaker("check_every must be positive"));
        }
        if fb.run_length == 0 {
            return Err(ConfigError::InvalidFlowBreaker("run_length must be positive"));
        }
        if fb.window < fb.run_length {
            return Err(ConfigError::InvalidFlowBreaker("window must hold run_length choices"));
        }

        Ok(())
    }
}
