//! Targets resolved against the attack section's column aggregates

use crate::attack::ColumnAttack;
use crate::error::{remove_keeping_one, StructureError};
use crate::expr::Variables;
use crate::mitigation::{apply_magic_resistance, hit_chance};
use crate::types::TargetId;
use serde::{Deserialize, Serialize};

use super::kill::KillProjection;
use super::row::{TargetInput, TargetSnapshot};

/// Ordered targets with stable identities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TargetInput>", into = "Vec<TargetInput>")]
pub struct TargetSection {
    targets: Vec<TargetInput>,
    next_id: u32,
}

impl Default for TargetSection {
    fn default() -> Self {
        TargetSection::from(vec![TargetInput::default()])
    }
}

/// Assigns ids to unassigned or duplicated entries
impl From<Vec<TargetInput>> for TargetSection {
    fn from(mut targets: Vec<TargetInput>) -> Self {
        let mut next_id = targets.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        let mut seen = std::collections::HashSet::new();
        for target in &mut targets {
            if target.id.0 == 0 || !seen.insert(target.id) {
                target.id = TargetId(next_id);
                seen.insert(target.id);
                next_id += 1;
            }
        }
        TargetSection { targets, next_id }
    }
}

impl From<TargetSection> for Vec<TargetInput> {
    fn from(section: TargetSection) -> Self {
        section.targets
    }
}

/// One target against one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetColumnResult {
    pub effective_armor: f64,
    /// Physical reduction fraction at the effective armor
    pub physical_reduction: f64,
    /// Chance an attack connects
    pub hit_chance: f64,
    pub physical_per_hit: f64,
    pub magic_per_hit: f64,
    pub damage_per_hit: f64,
    pub total_damage: f64,
    /// Present only when the target has HP and takes damage
    pub kill: Option<KillProjection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetReport {
    pub target: TargetSnapshot,
    /// Empty for a disabled target
    pub columns: Vec<TargetColumnResult>,
}

impl TargetSection {
    pub fn targets(&self) -> &[TargetInput] {
        &self.targets
    }

    pub fn get(&self, id: TargetId) -> Option<&TargetInput> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TargetId) -> Option<&mut TargetInput> {
        self.targets.iter_mut().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TargetId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn add(&mut self) -> TargetId {
        let id = TargetId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        let mut target = TargetInput::with_label(format!("Target {}", self.targets.len() + 1));
        target.id = id;
        self.targets.push(target);
        id
    }

    /// Remove a target; callers prune it from spell selections
    pub fn remove(&mut self, id: TargetId) -> Result<TargetInput, StructureError> {
        let index = self
            .targets
            .iter()
            .position(|t| t.id == id)
            .ok_or(StructureError::UnknownTarget(id))?;
        remove_keeping_one(&mut self.targets, index, "target")
    }

    pub fn snapshot(&self, vars: &Variables) -> Vec<TargetSnapshot> {
        self.targets.iter().map(|t| t.snapshot(vars)).collect()
    }

    /// Resolve every target against each column; with no attack columns a
    /// single idle column is used
    pub fn resolve(&self, vars: &Variables, attacks: &[ColumnAttack]) -> Vec<TargetReport> {
        let idle = [ColumnAttack::default()];
        let attacks = if attacks.is_empty() { &idle[..] } else { attacks };

        self.snapshot(vars)
            .into_iter()
            .map(|target| {
                let columns = if target.enabled {
                    attacks.iter().map(|a| resolve_column(&target, a)).collect()
                } else {
                    Vec::new()
                };
                TargetReport { target, columns }
            })
            .collect()
    }
}

/// Mitigated damage of one column's attacks against `target`
pub fn resolve_column(target: &TargetSnapshot, attack: &ColumnAttack) -> TargetColumnResult {
    let effective_armor = target.effective_armor(attack.armor_reduction);
    let physical_reduction = target.physical_reduction(attack.armor_reduction);
    let chance = hit_chance(target.evasion, attack.true_strike);

    let physical_factor = (1.0 - physical_reduction) * chance;
    let physical_per_hit = attack.damage_per_hit * physical_factor;
    let magic_per_hit = apply_magic_resistance(attack.magic_per_hit, target.magic_resistance) * chance;
    let damage_per_hit = physical_per_hit + magic_per_hit;
    let total_damage = attack.total_damage * physical_factor
        + apply_magic_resistance(attack.magic_total, target.magic_resistance) * chance;

    let kill = match target.hp {
        Some(hp) if damage_per_hit != 0.0 => Some(KillProjection::project(
            hp,
            damage_per_hit,
            target.regen,
            attack.rate,
        )),
        _ => None,
    };

    TargetColumnResult {
        effective_armor,
        physical_reduction,
        hit_chance: chance,
        physical_per_hit,
        magic_per_hit,
        damage_per_hit,
        total_damage,
        kill,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::DefenseMode;

    fn attack(dph: f64, rate: f64) -> ColumnAttack {
        ColumnAttack {
            damage_per_hit: dph,
            total_damage: dph,
            rate,
            ..Default::default()
        }
    }

    #[test]
    fn test_ids_are_assigned() {
        let section = TargetSection::from(vec![
            TargetInput::default(),
            TargetInput {
                id: TargetId(4),
                ..Default::default()
            },
            TargetInput {
                id: TargetId(4),
                ..Default::default()
            },
        ]);
        let ids: Vec<_> = section.targets().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TargetId(5), TargetId(4), TargetId(6)]);
    }

    #[test]
    fn test_last_target_is_kept() {
        let mut section = TargetSection::default();
        let first = section.targets()[0].id;
        let second = section.add();
        assert_eq!(section.get(second).map(|t| t.label.as_str()), Some("Target 2"));

        assert!(section.remove(first).is_ok());
        assert_eq!(section.remove(second), Err(StructureError::LastEntry("target")));
        assert_eq!(
            section.remove(TargetId(99)),
            Err(StructureError::UnknownTarget(TargetId(99)))
        );
    }

    #[test]
    fn test_resolve_with_armor_and_kill() {
        let mut section = TargetSection::default();
        if let Some(t) = section.targets.first_mut() {
            t.hp = "1000".to_string();
            t.armor = "10".to_string();
        }
        let reports = section.resolve(&Variables::new(), &[attack(160.0, 2.0)]);
        let col = &reports[0].columns[0];

        // 160 * 0.625 = 100 per hit
        assert!((col.damage_per_hit - 100.0).abs() < 1e-9);
        let kill = col.kill.expect("hp is set");
        assert_eq!(kill.hits, Some(10));
        assert!((kill.time - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_corruption_and_evasion() {
        let mut section = TargetSection::default();
        if let Some(t) = section.targets.first_mut() {
            t.armor = "16".to_string();
            t.evasion = "50".to_string();
        }
        let column = ColumnAttack {
            damage_per_hit: 100.0,
            total_damage: 100.0,
            armor_reduction: 6.0,
            true_strike: 0.5,
            ..Default::default()
        };
        let reports = section.resolve(&Variables::new(), &[column]);
        let col = &reports[0].columns[0];

        assert!((col.effective_armor - 10.0).abs() < f64::EPSILON);
        // hit chance 1 - 0.5 * 0.5 = 0.75; 100 * 0.625 * 0.75
        assert!((col.hit_chance - 0.75).abs() < 1e-9);
        assert!((col.physical_per_hit - 46.875).abs() < 1e-9);
        assert!(col.kill.is_none());
    }

    #[test]
    fn test_reduction_mode_target_without_corruption() {
        let mut section = TargetSection::default();
        if let Some(t) = section.targets.first_mut() {
            t.hp = "500".to_string();
            t.armor = "100".to_string();
            t.mode = DefenseMode::Reduction;
        }
        let reports = section.resolve(&Variables::new(), &[attack(80.0, 1.0)]);
        let col = &reports[0].columns[0];

        assert!((col.physical_reduction - 1.0).abs() < 1e-12);
        assert_eq!(col.physical_per_hit, 0.0);
        assert!(col.kill.is_none());
    }

    #[test]
    fn test_magic_channel_uses_resistance() {
        let section = TargetSection::default();
        let column = ColumnAttack {
            magic_per_hit: 40.0,
            magic_total: 80.0,
            ..Default::default()
        };
        let reports = section.resolve(&Variables::new(), &[column]);
        let col = &reports[0].columns[0];

        // default 25% magic resistance
        assert!((col.magic_per_hit - 30.0).abs() < 1e-9);
        assert!((col.total_damage - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_attacks_uses_idle_column() {
        let section = TargetSection::default();
        let reports = section.resolve(&Variables::new(), &[]);
        assert_eq!(reports[0].columns.len(), 1);
        assert_eq!(reports[0].columns[0].damage_per_hit, 0.0);
    }

    #[test]
    fn test_disabled_target_has_no_columns() {
        let mut section = TargetSection::default();
        if let Some(t) = section.targets.first_mut() {
            t.enabled = false;
        }
        let reports = section.resolve(&Variables::new(), &[attack(50.0, 1.0)]);
        assert!(reports[0].columns.is_empty());
    }
}
