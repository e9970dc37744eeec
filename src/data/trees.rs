//! Trait tree definitions
//!
//! Serializable description of every trait tree. These are loaded from
//! `trees.ron` when present, otherwise the built-in defaults below are used.

use serde::{Deserialize, Serialize};

use crate::tree::{Category, Position, Requirement, Threshold};

/// Kind of a display edge; only affects how the line is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Normal,
    Strong,
    Secondary,
    Ultimate,
}

/// One skill as written in the data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    pub tier: u8,
    pub position: Position,
    pub max_level: u32,
    pub thresholds: Vec<Threshold>,
    #[serde(default)]
    pub requires: Vec<Requirement>,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default = "default_icon")]
    pub icon: char,
}

fn default_icon() -> char {
    '◆'
}

/// Directed display edge between two skills of the same tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDef {
    pub from: String,
    pub to: String,
    pub kind: ConnectionKind,
}

/// One trait tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeDef {
    /// Navigation key (`axe`, `light_armor`, ...)
    pub key: String,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: char,
    #[serde(default)]
    pub skills: Vec<SkillDef>,
    #[serde(default)]
    pub connections: Vec<ConnectionDef>,
}

/// All trees in navigation order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeDefs {
    pub trees: Vec<TreeDef>,
}

impl TreeDefs {
    pub fn find(&self, key: &str) -> Option<&TreeDef> {
        self.trees.iter().find(|t| t.key == key)
    }
}

#[allow(clippy::too_many_arguments)]
fn skill(
    id: &str,
    name: &str,
    tier: u8,
    (x, y): (f32, f32),
    thresholds: Vec<Threshold>,
    requires: &[(&str, u32)],
    category: Category,
    description: &str,
    effect: &str,
    icon: char,
) -> SkillDef {
    SkillDef {
        id: id.to_string(),
        name: name.to_string(),
        tier,
        position: Position::new(x, y),
        max_level: thresholds.len() as u32,
        thresholds,
        requires: requires
            .iter()
            .map(|(skill, level)| Requirement::new(*skill, *level))
            .collect(),
        category,
        description: description.to_string(),
        effect: effect.to_string(),
        icon,
    }
}

fn link(from: &str, to: &str, kind: ConnectionKind) -> ConnectionDef {
    ConnectionDef {
        from: from.to_string(),
        to: to.to_string(),
        kind,
    }
}

fn levels(values: &[u32]) -> Vec<Threshold> {
    values.iter().map(|&n| Threshold::Level(n)).collect()
}

/// The axe tree, the only tree with content so far
pub fn axe_tree() -> TreeDef {
    use Category::*;
    use ConnectionKind as K;

    TreeDef {
        key: "axe".to_string(),
        name: "Axe".to_string(),
        icon: '⚒',
        skills: vec![
            skill(
                "going-big", "Going Big", 1, (50.0, 80.0),
                levels(&[1, 4, 8, 14, 20]), &[], Base,
                "Large weapons deal extra damage",
                "20% extra damage at max level", '⚔',
            ),
            skill(
                "steady-bloodflow", "Steady Bloodflow", 2, (30.0, 65.0),
                levels(&[4, 7, 12]), &[("going-big", 1)], Normal,
                "Casting spells with health regenerates mana",
                "+12 mana at max level", '♥',
            ),
            skill(
                "wrecking-it", "Wrecking It", 2, (70.0, 65.0),
                levels(&[4, 8, 14]), &[("steady-bloodflow", 1)], Normal,
                "Blade/Physical spell buffs next attack's True Damage",
                "+14 damage at max level", '✦',
            ),
            skill(
                "berserker", "Berserker", 3, (15.0, 45.0),
                levels(&[5, 8, 13]), &[("steady-bloodflow", 1)], Normal,
                "Below 66% health grants extra damage",
                "+13 damage at max level", '☠',
            ),
            skill(
                "overwhelming-force", "Overwhelming Force", 4, (25.0, 20.0),
                vec![Threshold::Active],
                &[("berserker", 1), ("berserker", 3), ("going-big", 5)], Ultimate,
                "Large weapon attacks may cast area-of-effect spell",
                "Constant effect", '✸',
            ),
            skill(
                "magic-blade", "Magic Blade", 4, (75.0, 35.0),
                vec![Threshold::Active],
                &[("wrecking-it", 1), ("wrecking-it", 3), ("going-big", 5)], Ultimate,
                "Removes negatives on Large weapons; gain 10% Manaleech",
                "Constant effect", '✧',
            ),
            skill(
                "unfathomable-rage", "Unfathomable Rage", 5, (50.0, 10.0),
                vec![Threshold::Active], &[("magic-blade", 1)], Legendary,
                "Converts every 2 damage taken into 1 mana; doubles cost",
                "Constant effect", '☄',
            ),
        ],
        connections: vec![
            link("going-big", "steady-bloodflow", K::Normal),
            link("steady-bloodflow", "berserker", K::Normal),
            link("berserker", "overwhelming-force", K::Strong),
            link("going-big", "overwhelming-force", K::Secondary),
            link("steady-bloodflow", "wrecking-it", K::Normal),
            link("wrecking-it", "magic-blade", K::Strong),
            link("going-big", "magic-blade", K::Secondary),
            link("magic-blade", "unfathomable-rage", K::Ultimate),
        ],
    }
}

fn placeholder(key: &str, name: &str, icon: char) -> TreeDef {
    TreeDef {
        key: key.to_string(),
        name: name.to_string(),
        icon,
        skills: Vec::new(),
        connections: Vec::new(),
    }
}

/// Built-in trees in navigation order
pub fn default_tree_defs() -> TreeDefs {
    TreeDefs {
        trees: vec![
            axe_tree(),
            placeholder("sword", "Sword", '†'),
            placeholder("staff", "Staff", '⌇'),
            placeholder("orb", "Orb", '●'),
            placeholder("shield", "Shield", '◘'),
            placeholder("glove", "Glove", '✋'),
            placeholder("bow", "Bow", '➶'),
            placeholder("light_armor", "Light Armor", '◇'),
            placeholder("heavy_armor", "Heavy Armor", '◈'),
            placeholder("dagger", "Dagger", '⸸'),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let defs = default_tree_defs();
        let keys: Vec<&str> = defs.trees.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(
            keys,
            ["axe", "sword", "staff", "orb", "shield", "glove", "bow", "light_armor", "heavy_armor", "dagger"]
        );
    }

    #[test]
    fn test_axe_shape() {
        let axe = axe_tree();
        assert_eq!(axe.skills.len(), 7);
        assert_eq!(axe.connections.len(), 8);

        let going_big = &axe.skills[0];
        assert_eq!(going_big.max_level, 5);
        assert!(going_big.requires.is_empty());

        let rage = axe.skills.iter().find(|s| s.id == "unfathomable-rage").unwrap();
        assert_eq!(rage.max_level, 1);
        assert_eq!(rage.thresholds, vec![Threshold::Active]);
    }

    #[test]
    fn test_tree_defs_ron_roundtrip() {
        let defs = default_tree_defs();
        let text = ron::ser::to_string_pretty(&defs, ron::ser::PrettyConfig::default()).unwrap();
        let back: TreeDefs = ron::from_str(&text).unwrap();
        assert_eq!(back, defs);
    }
}
