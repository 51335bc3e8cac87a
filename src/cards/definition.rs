//! Card definitions - static card data.
//!
//! A `Card` holds a type tag, one effect delta per choice direction and
//! presentation text. The engine reads the type and the effects; the
//! text is passed through to the presentation layer untouched.

use serde::{Deserialize, Serialize};

use crate::core::Direction;
use crate::effects::EffectDelta;

/// Unique identifier for a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card type tag.
///
/// Ordinary categories are content-defined strings matched by modifiers.
/// `special` is reserved: special cards skip soft-cap rebalancing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardKind {
    Category(String),
    Special,
}

impl CardKind {
    pub const SPECIAL: &'static str = "special";

    pub fn category(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    #[must_use]
    pub fn is_special(&self) -> bool {
        matches!(self, CardKind::Special)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            CardKind::Category(name) => name,
            CardKind::Special => Self::SPECIAL,
        }
    }
}

impl From<String> for CardKind {
    fn from(name: String) -> Self {
        if name == Self::SPECIAL {
            CardKind::Special
        } else {
            CardKind::Category(name)
        }
    }
}

impl From<CardKind> for String {
    fn from(kind: CardKind) -> Self {
        match kind {
            CardKind::Category(name) => name,
            CardKind::Special => CardKind::SPECIAL.to_string(),
        }
    }
}

/// Presentation fields, opaque to the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardText {
    pub character: String,
    pub title: String,
    pub body: String,
    pub left_label: String,
    pub right_label: String,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use hr_swipe::cards::{Card, CardKind};
/// use hr_swipe::core::{Direction, StatKey};
/// use hr_swipe::effects::EffectDelta;
///
/// let card = Card::new("overtime", CardKind::category("team"))
///     .with_right(EffectDelta::new().with(StatKey::Kpi, 10))
///     .with_left(EffectDelta::new().with(StatKey::Karma, 8));
///
/// assert_eq!(card.effect(Direction::Right).get(StatKey::Kpi), Some(10));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    #[serde(rename = "type")]
    pub kind: CardKind,

    #[serde(default)]
    pub left_effect: EffectDelta,

    #[serde(default)]
    pub right_effect: EffectDelta,

    #[serde(flatten)]
    pub text: CardText,
}

impl Card {
    pub fn new(id: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id: CardId::new(id),
            kind,
            left_effect: EffectDelta::new(),
            right_effect: EffectDelta::new(),
            text: CardText::default(),
        }
    }

    #[must_use]
    pub fn with_left(mut self, effect: EffectDelta) -> Self {
        self.left_effect = effect;
        self
    }

    #[must_use]
    pub fn with_right(mut self, effect: EffectDelta) -> Self {
        self.right_effect = effect;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: CardText) -> Self {
        self.text = text;
        self
    }

    /// The raw effect of a choice.
    #[must_use]
    pub fn effect(&self, direction: Direction) -> &EffectDelta {
        match direction {
            Direction::Left => &self.left_effect,
            Direction::Right => &self.right_effect,
        }
    }

    #[must_use]
    pub fn is_special(&self) -> bool {
        self.kind.is_special()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StatKey;

    #[test]
    fn test_card_id() {
        let id = CardId::new("c1");
        assert_eq!(id.as_str(), "c1");
        assert_eq!(format!("{}", id), "Card(c1)");
    }

    #[test]
    fn test_kind_from_string() {
        assert_eq!(CardKind::from("special".to_string()), CardKind::Special);
        assert_eq!(CardKind::category("boss"), CardKind::Category("boss".to_string()));
        assert!(CardKind::Special.is_special());
        assert_eq!(CardKind::category("boss").as_str(), "boss");
    }

    #[test]
    fn test_effect_by_direction() {
        let card = Card::new("c", CardKind::category("team"))
            .with_left(EffectDelta::new().with(StatKey::Trust, -3))
            .with_right(EffectDelta::new().with(StatKey::Trust, 3));

        assert_eq!(card.effect(Direction::Left).get(StatKey::Trust), Some(-3));
        assert_eq!(card.effect(Direction::Right).get(StatKey::Trust), Some(3));
    }

    #[test]
    fn test_card_json() {
        let json = r#"{
            "id": "layoffs",
            "type": "boss",
            "title": "Layoffs",
            "body": "Cut ten percent of the team.",
            "left_effect": { "karma": 10, "trust": -10 },
            "right_effect": { "trust": 15, "karma": -15 }
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.id, CardId::new("layoffs"));
        assert_eq!(card.kind, CardKind::category("boss"));
        assert_eq!(card.text.title, "Layoffs");
        assert_eq!(card.right_effect.get(StatKey::Trust), Some(15));
        assert!(!card.is_special());
    }

    #[test]
    fn test_special_card_json() {
        let json = r#"{ "id": "flow_breaker", "type": "special" }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert!(card.is_special());
        assert!(card.left_effect.is_empty());
    }
}
