//! Run-long passive modifiers.
//!
//! A modifier rescales card effects for the whole run. It can target a
//! card category (per-statistic multipliers, with `all` applying to every
//! present key), act globally (independent multipliers per statistic),
//! and, when global, inject chaos: symmetric random variance on every
//! non-zero value.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::delta::{round_half_up, EffectDelta};
use crate::cards::Card;
use crate::core::{ContentError, RandomSource, StatKey};

/// Order in which global multipliers are applied.
const GLOBAL_ORDER: [StatKey; 4] = [StatKey::Kpi, StatKey::Trust, StatKey::Karma, StatKey::Sanity];

/// Unique identifier for a modifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierId(pub String);

impl ModifierId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModifierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Modifier({})", self.0)
    }
}

/// Multiplier target: one statistic, or every present one.
///
/// Written as `"all"` or a statistic name in content files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MultiplierKey {
    All,
    Stat(StatKey),
}

impl TryFrom<String> for MultiplierKey {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        if name == "all" {
            return Ok(MultiplierKey::All);
        }
        StatKey::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .map(MultiplierKey::Stat)
            .ok_or_else(|| format!("unknown multiplier key `{name}`"))
    }
}

impl From<MultiplierKey> for String {
    fn from(key: MultiplierKey) -> Self {
        match key {
            MultiplierKey::All => "all".to_string(),
            MultiplierKey::Stat(stat) => stat.as_str().to_string(),
        }
    }
}

/// A category-scoped multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatMultiplier {
    pub key: MultiplierKey,
    pub factor: f64,
}

/// Independent optional multipliers applied to every card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalMultipliers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kpi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub karma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanity: Option<f64>,
}

impl GlobalMultipliers {
    #[must_use]
    pub fn get(&self, stat: StatKey) -> Option<f64> {
        match stat {
            StatKey::Trust => self.trust,
            StatKey::Kpi => self.kpi,
            StatKey::Karma => self.karma,
            StatKey::Sanity => self.sanity,
        }
    }

    pub fn set(&mut self, stat: StatKey, factor: f64) {
        let slot = match stat {
            StatKey::Trust => &mut self.trust,
            StatKey::Kpi => &mut self.kpi,
            StatKey::Karma => &mut self.karma,
            StatKey::Sanity => &mut self.sanity,
        };
        *slot = Some(factor);
    }
}

/// What a modifier does.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierAffects {
    /// Card category the `stat_mult` entries apply to.
    pub card_type: Option<String>,

    /// Category-scoped multipliers, applied in listed order.
    pub stat_mult: Vec<StatMultiplier>,

    /// Whether `global_mult` and `chaos` are active.
    pub global: bool,

    /// Global per-statistic multipliers.
    pub global_mult: GlobalMultipliers,

    /// Symmetric random variance on every non-zero value.
    pub chaos: bool,
}

/// A run-scoped passive rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub id: ModifierId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub affects: ModifierAffects,
}

impl Modifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ModifierId::new(id),
            name: String::new(),
            description: String::new(),
            icon: String::new(),
            affects: ModifierAffects::default(),
        }
    }

    /// Scale a stat (or `all`) on cards of one category.
    #[must_use]
    pub fn for_card_type(
        mut self,
        card_type: impl Into<String>,
        key: MultiplierKey,
        factor: f64,
    ) -> Self {
        self.affects.card_type = Some(card_type.into());
        self.affects.stat_mult.push(StatMultiplier { key, factor });
        self
    }

    /// Scale a stat on every card.
    #[must_use]
    pub fn with_global_mult(mut self, stat: StatKey, factor: f64) -> Self {
        self.affects.global = true;
        self.affects.global_mult.set(stat, factor);
        self
    }

    /// Enable chaos variance (implies global).
    #[must_use]
    pub fn with_chaos(mut self) -> Self {
        self.affects.global = true;
        self.affects.chaos = true;
        self
    }

    /// Apply this modifier to an effect that already went through the
    /// previously listed modifiers.
    pub fn apply(
        &self,
        card: &Card,
        effect: &mut EffectDelta,
        chaos_variance: f64,
        rng: &mut dyn RandomSource,
    ) {
        let affects = &self.affects;

        if let Some(card_type) = &affects.card_type {
            if card_type == card.kind.as_str() {
                for mult in &affects.stat_mult {
                    match mult.key {
                        MultiplierKey::All => {
                            effect.map_present(|_, v| round_half_up(f64::from(v) * mult.factor));
                        }
                        MultiplierKey::Stat(stat) => {
                            if let Some(v) = effect.get(stat) {
                                effect.set(stat, round_half_up(f64::from(v) * mult.factor));
                            }
                        }
                    }
                }
            }
        }

        if affects.global {
            for stat in GLOBAL_ORDER {
                if let (Some(factor), Some(v)) = (affects.global_mult.get(stat), effect.get(stat)) {
                    effect.set(stat, round_half_up(f64::from(v) * factor));
                }
            }

            if affects.chaos {
                effect.map_present(|_, v| {
                    if v == 0 {
                        return v;
                    }
                    let spread = rng.next_unit() * 2.0 * chaos_variance - chaos_variance;
                    v + round_half_up(f64::from(v) * spread)
                });
            }
        }
    }
}

/// Modifier definitions by id, preserving load order for drafting.
#[derive(Clone, Debug, Default)]
pub struct ModifierRegistry {
    by_id: FxHashMap<ModifierId, usize>,
    modifiers: Vec<Modifier>,
}

impl ModifierRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_modifiers(
        modifiers: impl IntoIterator<Item = Modifier>,
    ) -> Result<Self, ContentError> {
        let mut registry = Self::new();
        for modifier in modifiers {
            registry.register(modifier)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, modifier: Modifier) -> Result<(), ContentError> {
        if self.by_id.contains_key(&modifier.id) {
            return Err(ContentError::DuplicateModifier(modifier.id.0));
        }
        self.by_id.insert(modifier.id.clone(), self.modifiers.len());
        self.modifiers.push(modifier);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &ModifierId) -> Option<&Modifier> {
        self.by_id.get(id).map(|&i| &self.modifiers[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.modifiers.iter()
    }

    /// Draw up to `count` distinct modifiers uniformly at random.
    ///
    /// Fewer than `count` come back when the registry is smaller.
    pub fn draw(&self, count: usize, rng: &mut dyn RandomSource) -> Vec<ModifierId> {
        let mut candidates: Vec<usize> = (0..self.modifiers.len()).collect();
        let mut drawn = Vec::with_capacity(count.min(candidates.len()));

        while drawn.len() < count && !candidates.is_empty() {
            let index = candidates.remove(rng.pick_index(candidates.len()));
            drawn.push(self.modifiers[index].id.clone());
        }

        drawn
    }
}

/// Apply the active modifiers to a card's raw effect.
///
/// Modifiers run in the given order, each seeing the previous output.
/// Ids missing from the registry are skipped.
pub fn apply_modifiers(
    card: &Card,
    raw: &EffectDelta,
    active: &[ModifierId],
    registry: &ModifierRegistry,
    chaos_variance: f64,
    rng: &mut dyn RandomSource,
) -> EffectDelta {
    let mut effect = *raw;

    for id in active {
        let Some(modifier) = registry.get(id) else {
            tracing::warn!(modifier = %id, "unknown modifier skipped");
            continue;
        };
        modifier.apply(card, &mut effect, chaos_variance, rng);
    }

    effect
}
