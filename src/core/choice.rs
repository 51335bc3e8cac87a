//! Player choices and the rolling window of recent ones.

use im::Vector;
use serde::{Deserialize, Serialize};

/// The two answers a card offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// A timestamped choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    pub direction: Direction,
    /// Milliseconds on the engine clock.
    pub at_ms: u64,
}

/// Bounded window of the most recent choices, oldest first.
///
/// Backed by `im::Vector` so snapshots of the run state stay O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceWindow {
    entries: Vector<ChoiceRecord>,
    capacity: usize,
}

impl ChoiceWindow {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity,
        }
    }

    /// Append a choice, evicting the oldest beyond capacity.
    pub fn push(&mut self, record: ChoiceRecord) {
        self.entries.push_back(record);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `n` choices, oldest first. `None` if fewer than `n` exist.
    #[must_use]
    pub fn last_n(&self, n: usize) -> Option<Vector<ChoiceRecord>> {
        let len = self.entries.len();
        if len < n {
            return None;
        }
        Some(self.entries.clone().slice(len - n..))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChoiceRecord> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(direction: Direction, at_ms: u64) -> ChoiceRecord {
        ChoiceRecord { direction, at_ms }
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(format!("{}", Direction::Right), "right");
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut window = ChoiceWindow::new(5);
        for t in 0..7 {
            window.push(rec(Direction::Left, t));
        }

        assert_eq!(window.len(), 5);
        let times: Vec<_> = window.iter().map(|r| r.at_ms).collect();
        assert_eq!(times, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_last_n() {
        let mut window = ChoiceWindow::new(5);
        window.push(rec(Direction::Left, 10));
        window.push(rec(Direction::Right, 20));
        window.push(rec(Direction::Right, 30));

        assert!(window.last_n(4).is_none());

        let last = window.last_n(2).unwrap();
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].at_ms, 20);
        assert_eq!(last[1].at_ms, 30);

        // The window itself is untouched.
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut window = ChoiceWindow::new(5);
        window.push(rec(Direction::Right, 1));
        window.clear();
        assert!(window.is_empty());
    }
}
