//! End-to-end checks of the trait engine through its public API

use std::time::Duration;

use apogea::data::{ConnectionDef, ConnectionKind, PlannerConfig, SkillDef, TreeDef, TreeDefs};
use apogea::error::{DenyReason, PlanError};
use apogea::progression::TraitEngine;
use apogea::tree::{Category, Position, Requirement, SkillKey, Threshold};

const PAST_COOLDOWN: Duration = Duration::from_millis(61);

fn def(id: &str, max_level: u32, requires: &[(&str, u32)]) -> SkillDef {
    SkillDef {
        id: id.to_string(),
        name: id.to_uppercase(),
        tier: if requires.is_empty() { 1 } else { 2 },
        position: Position::new(10.0 * id.len() as f32, 50.0),
        max_level,
        thresholds: (1..=max_level).map(Threshold::Level).collect(),
        requires: requires
            .iter()
            .map(|(skill, level)| Requirement::new(*skill, *level))
            .collect(),
        category: Category::Normal,
        description: String::new(),
        effect: String::new(),
        icon: '◆',
    }
}

/// `b` needs `a` at 2; `c` through `g` stand alone
fn sandbox() -> TreeDefs {
    TreeDefs {
        trees: vec![TreeDef {
            key: "sandbox".to_string(),
            name: "Sandbox".to_string(),
            icon: '◆',
            skills: vec![
                def("a", 5, &[]),
                def("b", 3, &[("a", 2)]),
                def("c", 5, &[]),
                def("d", 5, &[]),
                def("e", 5, &[]),
                def("f", 5, &[]),
                def("g", 5, &[]),
            ],
            connections: vec![ConnectionDef {
                from: "a".to_string(),
                to: "b".to_string(),
                kind: ConnectionKind::Normal,
            }],
        }],
    }
}

fn engine_at(level: u32) -> TraitEngine {
    let config = PlannerConfig {
        default_level: level,
        ..Default::default()
    };
    TraitEngine::from_defs(&sandbox(), &config).unwrap()
}

fn key(engine: &TraitEngine, id: &str) -> SkillKey {
    engine.find_skill("sandbox", id).unwrap()
}

fn levels(engine: &TraitEngine) -> Vec<u32> {
    engine.trees()[0].skills().iter().map(|s| s.level()).collect()
}

fn assert_consistent(engine: &TraitEngine) {
    for skill in engine.trees()[0].skills() {
        assert!(skill.level() <= skill.max_level(), "{} over max", skill.id);
    }
    assert_eq!(engine.budget().used_points(), levels(engine).iter().sum::<u32>());
    assert!(engine.budget().used_points() <= engine.budget().total_points());
}

#[test]
fn level_one_has_no_points() {
    let mut engine = engine_at(1);
    assert_eq!(engine.budget().total_points(), 0);
    let a = key(&engine, "a");
    assert!(matches!(
        engine.upgrade(a),
        Err(PlanError::UpgradeDenied(DenyReason::NoPoints))
    ));
    assert_consistent(&engine);
}

#[test]
fn level_ten_allows_exactly_five_upgrades() {
    let mut engine = engine_at(10);
    assert_eq!(engine.budget().total_points(), 5);

    for id in ["a", "c", "d", "e", "f"] {
        let k = key(&engine, id);
        engine.upgrade(k).unwrap();
    }
    let g = key(&engine, "g");
    assert!(matches!(
        engine.upgrade(g),
        Err(PlanError::UpgradeDenied(DenyReason::NoPoints))
    ));
    assert_eq!(engine.budget().used_points(), 5);
    assert_consistent(&engine);
}

#[test]
fn prerequisite_flip() {
    let mut engine = engine_at(60);
    let a = key(&engine, "a");
    let b = key(&engine, "b");

    assert!(engine.budget().has_points());
    assert!(!engine.can_upgrade(b));
    assert!(matches!(
        engine.upgrade(b),
        Err(PlanError::UpgradeDenied(DenyReason::PrereqUnmet))
    ));

    engine.upgrade(a).unwrap();
    assert!(!engine.can_upgrade(b));
    engine.tick(PAST_COOLDOWN);
    engine.upgrade(a).unwrap();
    assert!(engine.can_upgrade(b));
}

#[test]
fn upgrade_then_downgrade_restores_state() {
    let mut engine = engine_at(60);
    let c = key(&engine, "c");
    let before = levels(&engine);
    let used = engine.budget().used_points();

    engine.upgrade(c).unwrap();
    // Second input inside the cooldown is dropped
    assert!(matches!(engine.downgrade(c), Err(PlanError::Throttled(_))));
    assert_eq!(levels(&engine)[2], 1);

    engine.tick(PAST_COOLDOWN);
    engine.downgrade(c).unwrap();
    assert_eq!(levels(&engine), before);
    assert_eq!(engine.budget().used_points(), used);
}

#[test]
fn downgrade_blocked_by_dependent() {
    let mut engine = engine_at(60);
    let a = key(&engine, "a");
    let b = key(&engine, "b");
    engine.upgrade(a).unwrap();
    engine.tick(PAST_COOLDOWN);
    engine.upgrade(a).unwrap();
    engine.upgrade(b).unwrap();
    engine.tick(PAST_COOLDOWN);

    match engine.downgrade(a) {
        Err(PlanError::DowngradeBlocked { dependents }) => assert_eq!(dependents, vec!["b"]),
        other => panic!("expected DowngradeBlocked, got {:?}", other),
    }
    assert_eq!(levels(&engine)[..2], [2, 1]);

    // Freed once the dependent is gone
    engine.downgrade(b).unwrap();
    engine.downgrade(a).unwrap();
    assert_eq!(levels(&engine)[..2], [1, 0]);
    assert_consistent(&engine);
}

#[test]
fn lowering_level_never_mutates_skills_silently() {
    let mut engine = engine_at(10);
    for id in ["a", "c", "d", "e", "f"] {
        let k = key(&engine, id);
        engine.upgrade(k).unwrap();
    }
    let before = levels(&engine);

    assert!(matches!(
        engine.request_level_change(4),
        Err(PlanError::WouldExceedBudget { deficit: 3 })
    ));
    assert_eq!(levels(&engine), before);
    assert_eq!(engine.budget().level(), 10);

    engine.force_level_change(4).unwrap();
    assert!(levels(&engine).iter().all(|&l| l == 0));
    assert_eq!(engine.budget().level(), 4);
    assert_eq!(engine.budget().total_points(), 2);
    assert_consistent(&engine);
}

#[test]
fn level_bounds() {
    let mut engine = engine_at(10);
    assert!(matches!(
        engine.request_level_change(0),
        Err(PlanError::InvalidLevel { value: 0 })
    ));
    assert!(matches!(
        engine.request_level_change(101),
        Err(PlanError::InvalidLevel { value: 101 })
    ));
    assert!(engine.force_level_change(-3).is_err());
    assert_eq!(engine.budget().level(), 10);

    // Budget stops growing at the cap
    engine.request_level_change(100).unwrap();
    assert_eq!(engine.budget().total_points(), 40);
}

#[test]
fn invariants_hold_over_long_input_sequence() {
    let mut engine = engine_at(14);
    let keys: Vec<SkillKey> = ["a", "b", "c", "d", "e", "f", "g"]
        .iter()
        .map(|id| key(&engine, id))
        .collect();

    // Fixed pseudo-random walk over upgrades, downgrades and level nudges
    let mut seed: u32 = 7;
    for _ in 0..2000 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let pick = (seed >> 16) as usize;
        let k = keys[pick % keys.len()];
        let _ = match pick % 5 {
            0 | 1 | 2 => engine.upgrade(k).map(|_| ()),
            3 => engine.downgrade(k).map(|_| ()),
            _ => engine.nudge_level(if pick % 2 == 0 { 1 } else { -1 }).map(|_| ()),
        };
        engine.tick(Duration::from_millis(20));
        assert_consistent(&engine);

        let tree = &engine.trees()[0];
        for (i, skill) in tree.skills().iter().enumerate() {
            if skill.level() > 0 {
                assert!(tree.requirements_met(i), "{} active without its requirements", skill.id);
            }
        }
    }
}
