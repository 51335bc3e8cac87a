//! Title tiers unlocked by turn count.

use serde::{Deserialize, Serialize};

/// A promotion rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TitleTier(pub usize);

impl TitleTier {
    /// Zero-based tier index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Content key, `level1` for the first tier.
    #[must_use]
    pub fn key(self) -> String {
        format!("level{}", self.0 + 1)
    }
}

impl std::fmt::Display for TitleTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "level{}", self.0 + 1)
    }
}

/// Turn thresholds of each tier, ascending and starting at 1.
///
/// ```
/// use hr_swipe::rules::{TitleLadder, TitleTier};
///
/// let ladder = TitleLadder::new(vec![1, 15, 35]);
/// assert_eq!(ladder.tier_for_turn(14), TitleTier(0));
/// assert_eq!(ladder.tier_for_turn(15), TitleTier(1));
/// assert_eq!(ladder.next_threshold(20), 35);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TitleLadder {
    thresholds: Vec<u32>,
}

impl TitleLadder {
    #[must_use]
    pub fn new(thresholds: Vec<u32>) -> Self {
        Self { thresholds }
    }

    /// Highest tier whose threshold the turn has reached.
    #[must_use]
    pub fn tier_for_turn(&self, turn: u32) -> TitleTier {
        let reached = self.thresholds.iter().rposition(|&t| turn >= t).unwrap_or(0);
        TitleTier(reached)
    }

    /// Turn at which the next tier starts; the last threshold once maxed out.
    #[must_use]
    pub fn next_threshold(&self, turn: u32) -> u32 {
        self.thresholds
            .iter()
            .copied()
            .find(|&t| turn < t)
            .or_else(|| self.thresholds.last().copied())
            .unwrap_or(1)
    }

    /// Threshold of the current tier and of the next one.
    #[must_use]
    pub fn progress(&self, turn: u32) -> (u32, u32) {
        let tier = self.tier_for_turn(turn);
        let from = self.thresholds.get(tier.index()).copied().unwrap_or(1);
        (from, self.next_threshold(turn))
    }

    #[must_use]
    pub fn is_max(&self, tier: TitleTier) -> bool {
        tier.index() + 1 >= self.thresholds.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}
