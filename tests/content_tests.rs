//! Content and configuration loading tests.
//!
//! These tests load JSON content and configuration the way a host
//! would, and check the validation errors at the loading boundary.

use std::sync::Arc;

use hr_swipe::cards::CardKind;
use hr_swipe::content::Content;
use hr_swipe::core::{ConfigError, ContentError, Direction, GameConfig, SetupError, StatKey};
use hr_swipe::effects::{ModifierId, MultiplierKey};
use hr_swipe::rules::{Bound, EndingReason, TitleTier};
use hr_swipe::session::{RunSetup, StartOutcome};

const CONTENT: &str = r#"{
    "cards": [
        {
            "id": "overtime",
            "type": "team",
            "character": "Team lead",
            "title": "Weekend push",
            "body": "The release slipped. Ask the team to come in on Saturday?",
            "left_label": "Let them rest",
            "right_label": "Everyone in",
            "left_effect": { "kpi": -10, "karma": 8 },
            "right_effect": { "kpi": 15, "karma": -10 }
        },
        {
            "id": "audit",
            "type": "finance",
            "right_effect": { "trust": 12 }
        }
    ],
    "special_cards": [
        {
            "id": "flow_breaker",
            "type": "special",
            "title": "Slow down",
            "right_effect": { "sanity": 10 }
        }
    ],
    "modifiers": [
        {
            "id": "bean_counter",
            "name": "Bean counter",
            "icon": "$",
            "affects": {
                "card_type": "finance",
                "stat_mult": [{ "key": "all", "factor": 1.5 }]
            }
        },
        {
            "id": "wildcard",
            "name": "Wildcard",
            "affects": { "global": true, "chaos": true, "global_mult": { "kpi": 1.2 } }
        }
    ],
    "titles": [
        { "key": "level1", "name": "Intern" },
        { "key": "level2", "name": "Specialist", "icon": "*" }
    ],
    "endings": [
        { "key": "trustLow", "title": "Shown the door", "text": "Security walks you out." }
    ],
    "stat_names": {
        "trust": "Boss trust",
        "kpi": "Performance",
        "karma": "Reputation",
        "sanity": "Conscience"
    }
}"#;

#[test]
fn test_load_full_content() {
    let content = Content::from_json(CONTENT).unwrap();
    assert!(content.validate(&GameConfig::default()).is_ok());

    let cards = content.cards();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards.special_len(), 1);

    let overtime = cards.get(0).unwrap();
    assert_eq!(overtime.kind, CardKind::category("team"));
    assert_eq!(overtime.text.right_label, "Everyone in");
    assert_eq!(overtime.effect(Direction::Right).get(StatKey::Kpi), Some(15));
    assert_eq!(overtime.effect(Direction::Right).get(StatKey::Trust), None);

    let audit = cards.get(1).unwrap();
    assert!(audit.effect(Direction::Left).is_empty());

    let special = cards.special("flow_breaker").unwrap();
    assert!(special.is_special());
    assert_eq!(special.text.title, "Slow down");
}

#[test]
fn test_load_modifiers() {
    let content = Content::from_json(CONTENT).unwrap();
    let modifiers = content.modifiers();
    assert_eq!(modifiers.len(), 2);

    let bean = modifiers.get(&ModifierId::new("bean_counter")).unwrap();
    assert_eq!(bean.affects.card_type.as_deref(), Some("finance"));
    assert_eq!(bean.affects.stat_mult[0].key, MultiplierKey::All);
    assert!(!bean.affects.global);

    let wild = modifiers.get(&ModifierId::new("wildcard")).unwrap();
    assert!(wild.affects.global && wild.affects.chaos);
    assert_eq!(wild.affects.global_mult.get(StatKey::Kpi), Some(1.2));
    assert_eq!(wild.affects.global_mult.get(StatKey::Trust), None);
}

#[test]
fn test_load_text() {
    let content = Content::from_json(CONTENT).unwrap();

    assert_eq!(content.title(TitleTier(1)).map(|t| t.name.as_str()), Some("Specialist"));
    assert!(content.title(TitleTier(4)).is_none());

    let fired = EndingReason { stat: StatKey::Trust, bound: Bound::Low };
    assert_eq!(content.ending(&fired).map(|e| e.title.as_str()), Some("Shown the door"));
    let burnout = EndingReason { stat: StatKey::Sanity, bound: Bound::Low };
    assert!(content.ending(&burnout).is_none());

    assert_eq!(content.stat_name(StatKey::Karma), "Reputation");
}

#[test]
fn test_unknown_multiplier_key_rejected() {
    let json = r#"{
        "cards": [{ "id": "a", "type": "team" }],
        "modifiers": [{
            "id": "m",
            "affects": { "card_type": "team", "stat_mult": [{ "key": "luck", "factor": 2.0 }] }
        }]
    }"#;
    assert!(matches!(Content::from_json(json), Err(ContentError::Parse(_))));
}

#[test]
fn test_misfiled_cards_rejected() {
    let special_in_pool = r#"{ "cards": [{ "id": "x", "type": "special" }] }"#;
    assert!(matches!(
        Content::from_json(special_in_pool),
        Err(ContentError::SpecialInPool(id)) if id == "x"
    ));

    let ordinary_special = r#"{
        "cards": [{ "id": "a", "type": "team" }],
        "special_cards": [{ "id": "flow_breaker", "type": "team" }]
    }"#;
    assert!(matches!(
        Content::from_json(ordinary_special),
        Err(ContentError::NotSpecial(id)) if id == "flow_breaker"
    ));
}

#[test]
fn test_duplicate_modifier_rejected() {
    let json = r#"{
        "cards": [{ "id": "a", "type": "team" }],
        "modifiers": [{ "id": "m" }, { "id": "m" }]
    }"#;
    assert!(matches!(
        Content::from_json(json),
        Err(ContentError::DuplicateModifier(id)) if id == "m"
    ));
}

#[test]
fn test_config_partial_override() {
    let json = r#"{ "modifier_rerolls": 5, "flow_breaker": { "check_every": 10 } }"#;
    let config = GameConfig::from_json(json).unwrap();

    assert_eq!(config.modifier_rerolls, 5);
    assert_eq!(config.flow_breaker.check_every, 10);
    assert_eq!(config.flow_breaker.run_length, 4);
    assert_eq!(config.initial_stats[StatKey::Trust], 65);
    assert_eq!(config.endings.len(), 4);
}

#[test]
fn test_config_round_trip() {
    let config = GameConfig::default()
        .with_modifier_rerolls(1)
        .with_title_thresholds(vec![1, 5, 9]);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(GameConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_config_validation_errors() {
    let bad_bounds = r#"{ "bounds": { "min": 50, "max": 50 } }"#;
    assert!(matches!(
        GameConfig::from_json(bad_bounds),
        Err(ConfigError::InvalidBounds { min: 50, max: 50 })
    ));

    let bad_titles = r#"{ "title_thresholds": [1, 10, 10] }"#;
    assert!(matches!(GameConfig::from_json(bad_titles), Err(ConfigError::InvalidTitleThresholds)));

    let bad_window = r#"{ "flow_breaker": { "window": 3 } }"#;
    assert!(matches!(GameConfig::from_json(bad_window), Err(ConfigError::InvalidFlowBreaker(_))));

    let bad_stat = r#"{ "initial_stats": { "trust": 120, "kpi": 65, "karma": 65, "sanity": 65 } }"#;
    assert!(matches!(
        GameConfig::from_json(bad_stat),
        Err(ConfigError::InitialStatOutOfBounds { stat: StatKey::Trust, value: 120 })
    ));

    let bad_band = r#"{ "pipeline": { "band_min": 10, "band_max": 5 } }"#;
    assert!(matches!(
        GameConfig::from_json(bad_band),
        Err(ConfigError::InvalidBand { min: 10, max: 5 })
    ));

    let negative_band = r#"{ "pipeline": { "band_min": -2 } }"#;
    assert!(matches!(
        GameConfig::from_json(negative_band),
        Err(ConfigError::InvalidBand { min: -2, max: 15 })
    ));

    let no_checks = r#"{ "flow_breaker": { "check_every": 0 } }"#;
    assert!(matches!(GameConfig::from_json(no_checks), Err(ConfigError::InvalidFlowBreaker(_))));

    let no_run = r#"{ "flow_breaker": { "run_length": 0 } }"#;
    assert!(matches!(GameConfig::from_json(no_run), Err(ConfigError::InvalidFlowBreaker(_))));

    assert!(matches!(GameConfig::from_json("{"), Err(ConfigError::Parse(_))));
}

#[test]
fn test_flow_breaker_card_must_exist() {
    let json = r#"{ "cards": [{ "id": "a", "type": "team" }], "modifiers": [{ "id": "m" }] }"#;
    let content = Arc::new(Content::from_json(json).unwrap());

    let err = RunSetup::new(content, GameConfig::default(), 1).unwrap_err();
    assert!(matches!(
        err,
        SetupError::Content(ContentError::MissingFlowBreakerCard(id)) if id == "flow_breaker"
    ));
}

/// Loaded content drives a run end to end.
#[test]
fn test_run_from_json() {
    let content = Arc::new(Content::from_json(CONTENT).unwrap());
    let setup = RunSetup::new(content, GameConfig::default(), 2024).unwrap();
    assert_eq!(setup.offered().len(), 1);

    let StartOutcome::Started { mut engine, .. } = setup.start("Alex") else {
        panic!("start rejected");
    };
    let outcome = engine.process_choice_at(Direction::Right, 0);
    let report = outcome.report().unwrap();
    assert_eq!(report.turn, 1);
    assert_eq!(engine.state().turn(), 2);
}
