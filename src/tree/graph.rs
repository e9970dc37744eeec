//! Trait tree graph
//!
//! Skills are stored in an arena (`Vec<Skill>`) addressed by index. Gating
//! comes only from each skill's prerequisites; connections are display edges.

use std::collections::{HashMap, VecDeque};

use crate::data::trees::{ConnectionKind, TreeDef};
use crate::error::DataError;

use super::skill::{Prerequisite, Skill};

/// Display edge between two skills of the same tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub kind: ConnectionKind,
}

/// A named collection of skills plus its display edges
#[derive(Debug, Clone)]
pub struct Tree {
    pub key: String,
    pub name: String,
    pub icon: char,
    skills: Vec<Skill>,
    index: HashMap<String, usize>,
    connections: Vec<Connection>,
    /// Reverse prerequisite edges: skill -> skills that require it
    dependents: Vec<Vec<usize>>,
}

impl Tree {
    /// Build and validate a tree from its definition. All skills start at level 0.
    pub fn from_def(def: &TreeDef) -> Result<Self, DataError> {
        let tree_key = || def.key.clone();

        let mut index = HashMap::with_capacity(def.skills.len());
        for (i, s) in def.skills.iter().enumerate() {
            if index.insert(s.id.clone(), i).is_some() {
                return Err(DataError::DuplicateSkill {
                    tree: tree_key(),
                    skill: s.id.clone(),
                });
            }
        }

        let mut skills = Vec::with_capacity(def.skills.len());
        let mut dependents = vec![Vec::new(); def.skills.len()];

        for (i, s) in def.skills.iter().enumerate() {
            if s.max_level == 0 {
                return Err(DataError::ZeroMaxLevel {
                    tree: tree_key(),
                    skill: s.id.clone(),
                });
            }
            if s.thresholds.len() != s.max_level as usize {
                return Err(DataError::ThresholdCount {
                    tree: tree_key(),
                    skill: s.id.clone(),
                    expected: s.max_level,
                    found: s.thresholds.len(),
                });
            }
            if !s.position.in_bounds() {
                return Err(DataError::InvalidPosition {
                    tree: tree_key(),
                    skill: s.id.clone(),
                    position: format!("({}, {})", s.position.x, s.position.y),
                });
            }

            let mut requires = Vec::with_capacity(s.requires.len());
            for req in &s.requires {
                let Some(&target) = index.get(&req.skill) else {
                    return Err(DataError::UnknownRequirement {
                        tree: tree_key(),
                        skill: s.id.clone(),
                        required: req.skill.clone(),
                    });
                };
                if target == i {
                    return Err(DataError::SelfRequirement {
                        tree: tree_key(),
                        skill: s.id.clone(),
                    });
                }
                let max = def.skills[target].max_level;
                if req.level > max {
                    return Err(DataError::RequirementAboveMax {
                        tree: tree_key(),
                        skill: s.id.clone(),
                        required: req.skill.clone(),
                        level: req.level,
                        max,
                    });
                }
                requires.push(Prerequisite {
                    skill: target,
                    level: req.level,
                });
                if !dependents[target].contains(&i) {
                    dependents[target].push(i);
                }
            }

            skills.push(Skill::new(
                s.id.clone(),
                s.name.clone(),
                s.description.clone(),
                s.effect.clone(),
                s.icon,
                s.tier,
                s.position,
                s.category,
                s.thresholds.clone(),
                requires,
                s.max_level,
            ));
        }

        let stuck = cyclic_skills(&skills, &dependents);
        if !stuck.is_empty() {
            return Err(DataError::CyclicRequirement {
                tree: tree_key(),
                skills: stuck.iter().map(|&i| skills[i].id.clone()).collect(),
            });
        }

        let mut connections = Vec::with_capacity(def.connections.len());
        for c in &def.connections {
            match (index.get(&c.from), index.get(&c.to)) {
                (Some(&from), Some(&to)) => connections.push(Connection {
                    from,
                    to,
                    kind: c.kind,
                }),
                _ => {
                    return Err(DataError::UnknownConnection {
                        tree: tree_key(),
                        from: c.from.clone(),
                        to: c.to.clone(),
                    })
                }
            }
        }

        Ok(Self {
            key: def.key.clone(),
            name: def.name.clone(),
            icon: def.icon,
            skills,
            index,
            connections,
            dependents,
        })
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Trees without skills are shown as "coming soon"
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn skill(&self, idx: usize) -> Option<&Skill> {
        self.skills.get(idx)
    }

    pub(crate) fn skill_mut(&mut self, idx: usize) -> Option<&mut Skill> {
        self.skills.get_mut(idx)
    }

    /// Look up a skill index by id
    pub fn find(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Skills whose prerequisites reference `idx`
    pub fn dependents(&self, idx: usize) -> &[usize] {
        self.dependents.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of all levels in this tree
    pub fn points_spent(&self) -> u32 {
        self.skills.iter().map(Skill::level).sum()
    }

    /// Whether every prerequisite of `idx` currently holds
    pub fn requirements_met(&self, idx: usize) -> bool {
        self.unmet_requirements(idx).is_empty()
    }

    /// Prerequisites of `idx` that do not hold right now
    pub fn unmet_requirements(&self, idx: usize) -> Vec<Prerequisite> {
        let Some(skill) = self.skills.get(idx) else {
            return Vec::new();
        };
        skill
            .requires
            .iter()
            .filter(|req| self.skills[req.skill].level() < req.level)
            .copied()
            .collect()
    }

    /// Invested skills that would lose a prerequisite if `idx` dropped to `target_level`
    pub fn blocking_dependents(&self, idx: usize, target_level: u32) -> Vec<usize> {
        self.dependents(idx)
            .iter()
            .copied()
            .filter(|&dep| {
                let skill = &self.skills[dep];
                skill.is_active()
                    && skill
                        .requires
                        .iter()
                        .any(|req| req.skill == idx && req.level > target_level)
            })
            .collect()
    }

    /// A line is drawn active when both endpoints have points
    pub fn connection_active(&self, connection: &Connection) -> bool {
        self.skills[connection.from].is_active() && self.skills[connection.to].is_active()
    }

    /// Indices of connections that start or end at `idx`
    pub fn connections_touching(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.connections
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.from == idx || c.to == idx)
            .map(|(i, _)| i)
    }

    /// Zero every skill, returning the points that were invested
    pub(crate) fn clear(&mut self) -> u32 {
        self.skills.iter_mut().map(Skill::clear).sum()
    }
}

/// Skills that can never be unlocked because their prerequisites loop
/// back on themselves (Kahn's algorithm leftovers), in tree order
fn cyclic_skills(skills: &[Skill], dependents: &[Vec<usize>]) -> Vec<usize> {
    let mut pending: Vec<usize> = skills
        .iter()
        .map(|s| {
            let mut targets: Vec<usize> = s.requires.iter().map(|r| r.skill).collect();
            targets.sort_unstable();
            targets.dedup();
            targets.len()
        })
        .collect();

    let mut ready: VecDeque<usize> = (0..skills.len()).filter(|&i| pending[i] == 0).collect();
    while let Some(idx) = ready.pop_front() {
        for &dep in &dependents[idx] {
            pending[dep] -= 1;
            if pending[dep] == 0 {
                ready.push_back(dep);
            }
        }
    }

    (0..skills.len()).filter(|&i| pending[i] > 0).collect()
}
