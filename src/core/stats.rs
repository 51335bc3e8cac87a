//! Player statistics and per-statistic storage.
//!
//! ## StatKey
//!
//! The four tracked statistics, in their fixed enumeration order.
//!
//! ## StatMap
//!
//! Fixed-key storage with one field per statistic. Indexing by `StatKey`
//! is exhaustive at compile time; there is no "unknown key" case.
//!
//! ## StatVector
//!
//! The bounded statistic values of a run. Every write is clamped into
//! the configured bounds.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::config::StatBounds;

/// Default lower bound for every statistic.
pub const STAT_MIN: i32 = 0;

/// Default upper bound for every statistic.
pub const STAT_MAX: i32 = 100;

/// Statistic identifier.
///
/// Declaration order is the enumeration order used everywhere a rule
/// needs a deterministic sequence (ending precedence, chaos variance).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    /// Boss trust.
    Trust,
    /// Business performance.
    Kpi,
    /// Reputation with the staff.
    Karma,
    /// Personal conscience.
    Sanity,
}

impl StatKey {
    /// All statistics in enumeration order.
    pub const ALL: [StatKey; 4] = [StatKey::Trust, StatKey::Kpi, StatKey::Karma, StatKey::Sanity];

    /// Lowercase name used in content files and ending keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StatKey::Trust => "trust",
            StatKey::Kpi => "kpi",
            StatKey::Karma => "karma",
            StatKey::Sanity => "sanity",
        }
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per statistic.
///
/// ## Example
///
/// ```
/// use hr_swipe::core::{StatKey, StatMap};
///
/// let mut map = StatMap::with_value(0);
/// map[StatKey::Kpi] = 7;
///
/// assert_eq!(map[StatKey::Kpi], 7);
/// assert_eq!(map[StatKey::Trust], 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatMap<T> {
    pub trust: T,
    pub kpi: T,
    pub karma: T,
    pub sanity: T,
}

impl<T> StatMap<T> {
    /// Build a map from a factory called once per statistic.
    pub fn new(mut factory: impl FnMut(StatKey) -> T) -> Self {
        Self {
            trust: factory(StatKey::Trust),
            kpi: factory(StatKey::Kpi),
            karma: factory(StatKey::Karma),
            sanity: factory(StatKey::Sanity),
        }
    }

    /// Build a map with every entry set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    #[must_use]
    pub fn get(&self, key: StatKey) -> &T {
        match key {
            StatKey::Trust => &self.trust,
            StatKey::Kpi => &self.kpi,
            StatKey::Karma => &self.karma,
            StatKey::Sanity => &self.sanity,
        }
    }

    pub fn get_mut(&mut self, key: StatKey) -> &mut T {
        match key {
            StatKey::Trust => &mut self.trust,
            StatKey::Kpi => &mut self.kpi,
            StatKey::Karma => &mut self.karma,
            StatKey::Sanity => &mut self.sanity,
        }
    }

    /// Iterate over (StatKey, &T) pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKey, &T)> {
        StatKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Transform every entry, keeping the keys.
    pub fn map<U>(&self, mut f: impl FnMut(StatKey, &T) -> U) -> StatMap<U> {
        StatMap::new(|key| f(key, self.get(key)))
    }
}

impl<T> Index<StatKey> for StatMap<T> {
    type Output = T;

    fn index(&self, key: StatKey) -> &Self::Output {
        self.get(key)
    }
}

impl<T> IndexMut<StatKey> for StatMap<T> {
    fn index_mut(&mut self, key: StatKey) -> &mut Self::Output {
        self.get_mut(key)
    }
}

/// Per-statistic change requested by a turn, for display.
///
/// `None` means the turn's delta did not mention the statistic.
pub type StatChanges = StatMap<Option<i32>>;

/// Bounded statistic values of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatVector {
    values: StatMap<i32>,
    bounds: StatBounds,
}

impl StatVector {
    /// Create a vector from initial values, clamping each into `bounds`.
    #[must_use]
    pub fn new(initial: StatMap<i32>, bounds: StatBounds) -> Self {
        Self {
            values: initial.map(|_, &v| bounds.clamp(v)),
            bounds,
        }
    }

    /// Create a vector with the default bounds.
    #[must_use]
    pub fn with_default_bounds(initial: StatMap<i32>) -> Self {
        Self::new(initial, StatBounds::default())
    }

    #[must_use]
    pub fn get(&self, key: StatKey) -> i32 {
        self.values[key]
    }

    /// Set a value, clamped into bounds.
    pub fn set(&mut self, key: StatKey, value: i32) {
        self.values[key] = self.bounds.clamp(value);
    }

    #[must_use]
    pub fn bounds(&self) -> StatBounds {
        self.bounds
    }

    #[must_use]
    pub fn values(&self) -> &StatMap<i32> {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKey, i32)> + '_ {
        self.values.iter().map(|(k, &v)| (k, v))
    }

    /// Apply a delta and report the change requested per statistic.
    ///
    /// A positive delta on a statistic already at the ceiling is dropped
    /// and reported as 0. Every other present delta is applied with
    /// clamping and reported as the raw requested value, so a change
    /// clamped at the floor is reported larger than the actual movement.
    pub fn apply_delta(&mut self, delta: &StatMap<Option<i32>>) -> StatChanges {
        let mut changes = StatChanges::default();

        for (key, d) in delta.iter() {
            let Some(d) = *d else { continue };

            let current = self.values[key];
            if current >= self.bounds.max && d > 0 {
                changes[key] = Some(0);
            } else {
                self.set(key, current + d);
                changes[key] = Some(d);
            }
        }

        changes
    }
}

impl Index<StatKey> for StatVector {
    type Output = i32;

    fn index(&self, key: StatKey) -> &Self::Output {
        &self.values[key]
    }
}
