//! Read-only game content: cards, modifiers, and display text.
//!
//! Content is loaded once before a run and shared between runs through
//! an `Arc`. The engine reads card effects and modifier rules from it;
//! title, ending and statistic names are passed through to presenters.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardPool};
use crate::core::{ContentError, GameConfig, StatKey, StatMap};
use crate::effects::{Modifier, ModifierRegistry};
use crate::rules::{EndingReason, TitleTier};

/// Display data of a title tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleInfo {
    /// Tier key, `level1` ..
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

/// Display data of an ending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingInfo {
    /// Ending key, e.g. `trustLow`.
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// On-disk layout of a content file.
#[derive(Debug, Deserialize)]
struct ContentFile {
    cards: Vec<Card>,
    #[serde(default)]
    special_cards: Vec<Card>,
    #[serde(default)]
    modifiers: Vec<Modifier>,
    #[serde(default)]
    titles: Vec<TitleInfo>,
    #[serde(default)]
    endings: Vec<EndingInfo>,
    #[serde(default)]
    stat_names: Option<StatMap<String>>,
}

/// Cards, modifiers and text of a game.
///
/// ## Example
///
/// ```
/// use hr_swipe::content::Content;
/// use hr_swipe::core::GameConfig;
///
/// let json = r#"{
///     "cards": [{ "id": "budget", "type": "finance", "right_effect": { "kpi": 10 } }],
///     "special_cards": [{ "id": "flow_breaker", "type": "special" }],
///     "modifiers": [{ "id": "steady", "name": "Steady" }]
/// }"#;
///
/// let content = Content::from_json(json).unwrap();
/// assert_eq!(content.cards().len(), 1);
/// assert!(content.validate(&GameConfig::default()).is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Content {
    cards: CardPool,
    modifiers: ModifierRegistry,
    titles: FxHashMap<String, TitleInfo>,
    endings: FxHashMap<String, EndingInfo>,
    stat_names: Option<StatMap<String>>,
}

impl Content {
    #[must_use]
    pub fn new(cards: CardPool, modifiers: ModifierRegistry) -> Self {
        Self {
            cards,
            modifiers,
            ..Self::default()
        }
    }

    /// Parse content from JSON, rejecting duplicate and misfiled entries.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let file: ContentFile = serde_json::from_str(json)?;

        let cards = CardPool::from_cards(file.cards, file.special_cards)?;
        let modifiers = ModifierRegistry::from_modifiers(file.modifiers)?;

        let mut content = Self::new(cards, modifiers);
        for title in file.titles {
            content = content.with_title(title);
        }
        for ending in file.endings {
            content = content.with_ending(ending);
        }
        content.stat_names = file.stat_names;

        tracing::debug!(
            cards = content.cards.len(),
            special = content.cards.special_len(),
            modifiers = content.modifiers.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// Check that the content can drive a run under `config`.
    pub fn validate(&self, config: &GameConfig) -> Result<(), ContentError> {
        if self.cards.is_empty() {
            return Err(ContentError::EmptyPool);
        }

        let special = &config.flow_breaker.special_card;
        if self.cards.special(special).is_none() {
            return Err(ContentError::MissingFlowBreakerCard(special.clone()));
        }

        if config.modifier_count > 0 && self.modifiers.is_empty() {
            return Err(ContentError::NoModifiers);
        }

        Ok(())
    }

    #[must_use]
    pub fn with_title(mut self, title: TitleInfo) -> Self {
        self.titles.insert(title.key.clone(), title);
        self
    }

    #[must_use]
    pub fn with_ending(mut self, ending: EndingInfo) -> Self {
        self.endings.insert(ending.key.clone(), ending);
        self
    }

    #[must_use]
    pub fn with_stat_names(mut self, names: StatMap<String>) -> Self {
        self.stat_names = Some(names);
        self
    }

    #[must_use]
    pub fn cards(&self) -> &CardPool {
        &self.cards
    }

    #[must_use]
    pub fn modifiers(&self) -> &ModifierRegistry {
        &self.modifiers
    }

    #[must_use]
    pub fn title(&self, tier: TitleTier) -> Option<&TitleInfo> {
        self.titles.get(&tier.key())
    }

    #[must_use]
    pub fn ending(&self, reason: &EndingReason) -> Option<&EndingInfo> {
        self.endings.get(&reason.key())
    }

    /// Display name of a statistic, its key when none is configured.
    #[must_use]
    pub fn stat_name(&self, stat: StatKey) -> &str {
        match &self.stat_names {
            Some(names) => names[stat].as_str(),
            None => stat.as_str(),
        }
    }
}
