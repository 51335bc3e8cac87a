//! Card pool for selection and special-card lookup.
//!
//! The `CardPool` stores the ordinary cards in load order (selection
//! works on their indices) and the special cards by id (they are only
//! ever shown when forced).

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId};
use crate::core::ContentError;

/// Ordinary and special cards of a game.
///
/// ## Example
///
/// ```
/// use hr_swipe::cards::{Card, CardKind, CardPool};
///
/// let mut pool = CardPool::new();
/// pool.add(Card::new("budget", CardKind::category("finance"))).unwrap();
/// pool.add_special(Card::new("flow_breaker", CardKind::Special)).unwrap();
///
/// assert_eq!(pool.len(), 1);
/// assert!(pool.special("flow_breaker").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardPool {
    cards: Vec<Card>,
    special: FxHashMap<CardId, Card>,
}

impl CardPool {
    /// Create a new empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool, rejecting duplicates and misfiled special cards.
    pub fn from_cards(
        cards: impl IntoIterator<Item = Card>,
        special: impl IntoIterator<Item = Card>,
    ) -> Result<Self, ContentError> {
        let mut pool = Self::new();
        for card in cards {
            pool.add(card)?;
        }
        for card in special {
            pool.add_special(card)?;
        }
        Ok(pool)
    }

    /// Add an ordinary card.
    pub fn add(&mut self, card: Card) -> Result<(), ContentError> {
        if card.is_special() {
            return Err(ContentError::SpecialInPool(card.id.0));
        }
        if self.contains(&card.id) {
            return Err(ContentError::DuplicateCard(card.id.0));
        }
        self.cards.push(card);
        Ok(())
    }

    /// Add a special card.
    pub fn add_special(&mut self, card: Card) -> Result<(), ContentError> {
        if !card.is_special() {
            return Err(ContentError::NotSpecial(card.id.0));
        }
        if self.contains(&card.id) {
            return Err(ContentError::DuplicateCard(card.id.0));
        }
        self.special.insert(card.id.clone(), card);
        Ok(())
    }

    /// Get an ordinary card by pool index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Get a special card by id.
    #[must_use]
    pub fn special(&self, id: &str) -> Option<&Card> {
        self.special.get(&CardId::new(id))
    }

    /// Check if any card (ordinary or special) has this id.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.special.contains_key(id) || self.cards.iter().any(|c| &c.id == id)
    }

    /// Number of ordinary cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of special cards.
    #[must_use]
    pub fn special_len(&self) -> usize {
        self.special.len()
    }

    /// Iterate over ordinary cards in pool order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
