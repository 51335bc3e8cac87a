//! Effect deltas.
//!
//! An `EffectDelta` is a partial, per-statistic adjustment. Absent keys
//! mean "no change" and are never mutated by any pipeline stage except
//! trade-off injection, which may create one.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::core::{StatKey, StatMap};

/// Round to the nearest integer, halves toward positive infinity.
///
/// This is the rounding used by every "round to nearest" step of the
/// pipeline: `2.5 -> 3`, `-2.5 -> -2`.
#[must_use]
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Partial per-statistic adjustment.
///
/// ## Example
///
/// ```
/// use hr_swipe::core::StatKey;
/// use hr_swipe::effects::EffectDelta;
///
/// let delta = EffectDelta::new().with(StatKey::Trust, 20);
///
/// assert_eq!(delta.get(StatKey::Trust), Some(20));
/// assert_eq!(delta.get(StatKey::Karma), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "DeltaRepr", into = "DeltaRepr")]
pub struct EffectDelta {
    values: StatMap<Option<i32>>,
}

impl EffectDelta {
    /// An empty delta.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key (builder pattern).
    #[must_use]
    pub fn with(mut self, key: StatKey, value: i32) -> Self {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: StatKey) -> Option<i32> {
        self.values[key]
    }

    pub fn set(&mut self, key: StatKey, value: i32) {
        self.values[key] = Some(value);
    }

    pub fn remove(&mut self, key: StatKey) {
        self.values[key] = None;
    }

    #[must_use]
    pub fn is_present(&self, key: StatKey) -> bool {
        self.values[key].is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|(_, v)| v.is_none())
    }

    /// Present (key, value) pairs in enumeration order.
    pub fn present(&self) -> impl Iterator<Item = (StatKey, i32)> + '_ {
        self.values.iter().filter_map(|(k, v)| v.map(|v| (k, v)))
    }

    /// Replace every present value, leaving absent keys absent.
    pub fn map_present(&mut self, mut f: impl FnMut(StatKey, i32) -> i32) {
        for key in StatKey::ALL {
            if let Some(v) = self.values[key] {
                self.values[key] = Some(f(key, v));
            }
        }
    }

    /// The underlying fixed-key record.
    #[must_use]
    pub fn as_map(&self) -> &StatMap<Option<i32>> {
        &self.values
    }
}

impl Index<StatKey> for EffectDelta {
    type Output = Option<i32>;

    fn index(&self, key: StatKey) -> &Self::Output {
        &self.values[key]
    }
}

impl From<StatMap<Option<i32>>> for EffectDelta {
    fn from(values: StatMap<Option<i32>>) -> Self {
        Self { values }
    }
}

impl std::fmt::Display for EffectDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.present().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value:+}")?;
        }
        f.write_str("}")
    }
}

/// Wire shape: a JSON object with only the present keys.
#[derive(Serialize, Deserialize)]
struct DeltaRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trust: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kpi: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    karma: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sanity: Option<i32>,
}

impl From<DeltaRepr> for EffectDelta {
    fn from(r: DeltaRepr) -> Self {
        Self {
            values: StatMap {
                trust: r.trust,
                kpi: r.kpi,
                karma: r.karma,
                sanity: r.sanity,
            },
        }
    }
}

impl From<EffectDelta> for DeltaRepr {
    fn from(d: EffectDelta) -> Self {
        Self {
            trust: d.values.trust,
            kpi: d.values.kpi,
            karma: d.values.karma,
            sanity: d.values.sanity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(13.58), 14);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-5.15), -5);
        assert_eq!(round_half_up(-0.7), -1);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_present_skips_absent() {
        let delta = EffectDelta::new().with(StatKey::Sanity, -3).with(StatKey::Trust, 4);
        let pairs: Vec<_> = delta.present().collect();
        assert_eq!(pairs, vec![(StatKey::Trust, 4), (StatKey::Sanity, -3)]);
    }

    #[test]
    fn test_map_present() {
        let mut delta = EffectDelta::new().with(StatKey::Kpi, 10);
        delta.map_present(|_, v| v * 2);
        assert_eq!(delta.get(StatKey::Kpi), Some(20));
        assert_eq!(delta.get(StatKey::Trust), None);
    }

    #[test]
    fn test_json_shape() {
        let delta: EffectDelta = serde_json::from_str(r#"{"trust": 20, "karma": -10}"#).unwrap();
        assert_eq!(delta.get(StatKey::Trust), Some(20));
        assert_eq!(delta.get(StatKey::Karma), Some(-10));
        assert!(!delta.is_present(StatKey::Kpi));

        let json = serde_json::to_string(&delta).unwrap();
        assert_eq!(json, r#"{"trust":20,"karma":-10}"#);
    }

    #[test]
    fn test_display() {
        let delta = EffectDelta::new().with(StatKey::Trust, 14).with(StatKey::Karma, -5);
        assert_eq!(delta.to_string(), "{trust: +14, karma: -5}");
        assert_eq!(EffectDelta::new().to_string(), "{}");
    }
}
