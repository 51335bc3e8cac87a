//! The effect pipeline: raw card effect to applied delta.
//!
//! Five fixed stages, in order:
//!
//! 1. **Modifiers** - the run's active modifiers (see `modifier`)
//! 2. **Scale** - global magnitude dampener
//! 3. **Band clamp** - non-zero magnitudes forced into `[band_min, band_max]`
//! 4. **Trade-offs** - trust gains cost karma, kpi gains cost sanity
//! 5. **Soft cap** - gains and losses rubber-banded toward the midpoint,
//!    skipped for special cards
//!
//! Every stage is a pure function of its input and the current stats.
//! The only randomness is chaos variance inside stage 1, drawn from the
//! caller's `RandomSource`.

use super::delta::{round_half_up, EffectDelta};
use super::modifier::{apply_modifiers, ModifierId, ModifierRegistry};
use crate::cards::Card;
use crate::core::{Direction, PipelineTuning, RandomSource, StatKey, StatVector};

/// Runs the five pipeline stages with a fixed tuning.
#[derive(Clone, Debug, Default)]
pub struct EffectPipeline {
    tuning: PipelineTuning,
}

impl EffectPipeline {
    #[must_use]
    pub fn new(tuning: PipelineTuning) -> Self {
        Self { tuning }
    }

    #[must_use]
    pub fn tuning(&self) -> &PipelineTuning {
        &self.tuning
    }

    /// Resolve the final delta for a choice on a card.
    pub fn resolve(
        &self,
        card: &Card,
        direction: Direction,
        active: &[ModifierId],
        registry: &ModifierRegistry,
        current: &StatVector,
        rng: &mut dyn RandomSource,
    ) -> EffectDelta {
        let raw = card.effect(direction);

        let variance = self.tuning.chaos_variance;
        let mut delta = apply_modifiers(card, raw, active, registry, variance, rng);
        tracing::trace!(card = %card.id, %raw, modified = %delta, "modifier pass");

        self.scale(&mut delta);
        tracing::trace!(%delta, "scaled");

        self.clamp_to_band(&mut delta);
        tracing::trace!(%delta, "band clamped");

        self.inject_trade_offs(&mut delta);
        tracing::trace!(%delta, "trade-offs");

        if !card.is_special() {
            self.soft_cap(&mut delta, current);
            tracing::trace!(%delta, "soft cap");
        }

        delta
    }

    /// Stage 2: multiply every present value by the magnitude scale.
    pub fn scale(&self, delta: &mut EffectDelta) {
        let factor = self.tuning.magnitude_scale;
        delta.map_present(|_, v| round_half_up(f64::from(v) * factor));
    }

    /// Stage 3: force every non-zero magnitude into the band, keeping sign.
    pub fn clamp_to_band(&self, delta: &mut EffectDelta) {
        let (lo, hi) = (self.tuning.band_min, self.tuning.band_max);
        delta.map_present(|_, v| {
            if v == 0 {
                0
            } else {
                v.signum() * v.abs().min(hi).max(lo)
            }
        });
    }

    /// Stage 4: a trust gain costs karma, a kpi gain costs sanity.
    ///
    /// The paired statistic is only charged when it is absent or
    /// non-negative; an existing loss is left alone.
    pub fn inject_trade_offs(&self, delta: &mut EffectDelta) {
        let penalty = self.tuning.trade_off_penalty;

        for (gain, cost) in [(StatKey::Trust, StatKey::Karma), (StatKey::Kpi, StatKey::Sanity)] {
            let gained = delta.get(gain).is_some_and(|v| v > 0);
            let paired = delta.get(cost);
            if gained && paired.map_or(true, |v| v >= 0) {
                delta.set(cost, paired.unwrap_or(0) - penalty);
            }
        }
    }

    /// Stage 5: rubber-band each value by the current statistic.
    ///
    /// Gains shrink above the midpoint and grow below it; losses shrink
    /// below the midpoint and grow above it. At the midpoint the factor
    /// is exactly 1.
    pub fn soft_cap(&self, delta: &mut EffectDelta, current: &StatVector) {
        let mid = f64::from(self.tuning.soft_cap_midpoint);
        let strength = self.tuning.soft_cap_strength;

        delta.map_present(|key, d| {
            let c = f64::from(current.get(key));
            let factor = match d.signum() {
                1 => 1.0 + ((mid - c) / mid) * strength,
                -1 => 1.0 + ((c - mid) / mid) * strength,
                _ => return d,
            };
            round_half_up(f64::from(d) * factor)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;
    use crate::core::{ScriptedRng, StatMap};

    fn pipeline() -> EffectPipeline {
        EffectPipeline::default()
    }

    fn stats(v: i32) -> StatVector {
        StatVector::with_default_bounds(StatMap::with_value(v))
    }

    #[test]
    fn test_scale() {
        let mut d = EffectDelta::new()
            .with(StatKey::Trust, 20)
            .with(StatKey::Kpi, -10)
            .with(StatKey::Karma, 3);
        pipeline().scale(&mut d);
        assert_eq!(d.get(StatKey::Trust), Some(14));
        assert_eq!(d.get(StatKey::Kpi), Some(-7));
        assert_eq!(d.get(StatKey::Karma), Some(2));
        assert_eq!(d.get(StatKey::Sanity), None);
    }

    #[test]
    fn test_band_clamp() {
        let mut d = EffectDelta::new()
            .with(StatKey::Trust, 2)
            .with(StatKey::Kpi, -30)
            .with(StatKey::Karma, 0)
            .with(StatKey::Sanity, -9);
        pipeline().clamp_to_band(&mut d);
        assert_eq!(d.get(StatKey::Trust), Some(5));
        assert_eq!(d.get(StatKey::Kpi), Some(-15));
        assert_eq!(d.get(StatKey::Karma), Some(0));
        assert_eq!(d.get(StatKey::Sanity), Some(-9));
    }

    #[test]
    fn test_band_clamp_inverted_band() {
        let pipeline = EffectPipeline::new(PipelineTuning {
            band_min: 10,
            band_max: 5,
            ..PipelineTuning::default()
        });
        let mut d = EffectDelta::new().with(StatKey::Trust, 3).with(StatKey::Kpi, -30);
        pipeline.clamp_to_band(&mut d);
        assert_eq!(d.get(StatKey::Trust), Some(10));
        assert_eq!(d.get(StatKey::Kpi), Some(-10));
    }

    #[test]
    fn test_trade_off_creates_karma() {
        let mut d = EffectDelta::new().with(StatKey::Trust, 14);
        pipeline().inject_trade_offs(&mut d);
        assert_eq!(d.get(StatKey::Karma), Some(-5));
        assert_eq!(d.get(StatKey::Sanity), None);
    }

    #[test]
    fn test_trade_off_adjusts_positive_pair() {
        let mut d = EffectDelta::new().with(StatKey::Kpi, 8).with(StatKey::Sanity, 6);
        pipeline().inject_trade_offs(&mut d);
        assert_eq!(d.get(StatKey::Sanity), Some(1));
    }

    #[test]
    fn test_trade_off_keeps_existing_loss() {
        let mut d = EffectDelta::new().with(StatKey::Trust, 8).with(StatKey::Karma, -7);
        pipeline().inject_trade_offs(&mut d);
        assert_eq!(d.get(StatKey::Karma), Some(-7));
    }

    #[test]
    fn test_trade_off_zero_pair_is_charged() {
        let mut d = EffectDelta::new().with(StatKey::Kpi, 8).with(StatKey::Sanity, 0);
        pipeline().inject_trade_offs(&mut d);
        assert_eq!(d.get(StatKey::Sanity), Some(-5));
    }

    #[test]
    fn test_trade_off_requires_gain() {
        let mut d = EffectDelta::new().with(StatKey::Trust, -8).with(StatKey::Kpi, 0);
        pipeline().inject_trade_offs(&mut d);
        assert_eq!(d.get(StatKey::Karma), None);
        assert_eq!(d.get(StatKey::Sanity), None);
    }

    #[test]
    fn test_soft_cap_neutral_at_midpoint() {
        let mut d = EffectDelta::new().with(StatKey::Trust, 15).with(StatKey::Kpi, -15);
        pipeline().soft_cap(&mut d, &stats(50));
        assert_eq!(d.get(StatKey::Trust), Some(15));
        assert_eq!(d.get(StatKey::Kpi), Some(-15));
    }

    #[test]
    fn test_soft_cap_extremes() {
        // At 100 gains shrink by 10%, losses grow by 10%.
        let mut d = EffectDelta::new().with(StatKey::Trust, 15).with(StatKey::Kpi, -15);
        pipeline().soft_cap(&mut d, &stats(100));
        assert_eq!(d.get(StatKey::Trust), Some(14)); // 13.5 -> 14
        assert_eq!(d.get(StatKey::Kpi), Some(-16)); // -16.5 -> -16

        // At 0 gains grow by 10%, losses shrink by 10%.
        let mut d = EffectDelta::new().with(StatKey::Trust, 15).with(StatKey::Kpi, -15);
        pipeline().soft_cap(&mut d, &stats(0));
        assert_eq!(d.get(StatKey::Trust), Some(17)); // 16.5 -> 17
        assert_eq!(d.get(StatKey::Kpi), Some(-13)); // -13.5 -> -13
    }

    #[test]
    fn test_soft_cap_leaves_zero() {
        let mut d = EffectDelta::new().with(StatKey::Sanity, 0);
        pipeline().soft_cap(&mut d, &stats(90));
        assert_eq!(d.get(StatKey::Sanity), Some(0));
    }

    #[test]
    fn test_resolve_end_to_end() {
        let card = Card::new("c", CardKind::category("boss"))
            .with_right(EffectDelta::new().with(StatKey::Trust, 20));
        let mut rng = ScriptedRng::constant(0.5);

        let empty = ModifierRegistry::new();
        let delta = pipeline().resolve(&card, Direction::Right, &[], &empty, &stats(65), &mut rng);

        assert_eq!(delta.get(StatKey::Trust), Some(14));
        assert_eq!(delta.get(StatKey::Karma), Some(-5));
        assert_eq!(delta.get(StatKey::Kpi), None);
        assert_eq!(delta.get(StatKey::Sanity), None);
    }

    #[test]
    fn test_resolve_special_skips_soft_cap() {
        let effect = EffectDelta::new().with(StatKey::Kpi, -30);
        let special = Card::new("s", CardKind::Special).with_left(effect);
        let ordinary = Card::new("o", CardKind::category("team")).with_left(effect);
        let mut rng = ScriptedRng::constant(0.5);
        let high = stats(100);

        let empty = ModifierRegistry::new();

        let a = pipeline().resolve(&special, Direction::Left, &[], &empty, &high, &mut rng);
        let b = pipeline().resolve(&ordinary, Direction::Left, &[], &empty, &high, &mut rng);

        assert_eq!(a.get(StatKey::Kpi), Some(-15));
        assert_eq!(b.get(StatKey::Kpi), Some(-16));
    }
}
