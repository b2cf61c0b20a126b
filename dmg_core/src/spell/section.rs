//! Spells resolved against their selected targets

use crate::error::{remove_keeping_one, StructureError};
use crate::expr::Variables;
use crate::modifier::ModifierLookup;
use crate::target::TargetSnapshot;
use crate::types::{DamageType, ModifierId, TargetId};
use serde::{Deserialize, Serialize};

use super::calculation::{mana_efficiency, spell_dps};
use super::row::{SpellInput, SpellValues};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellSection {
    pub spells: Vec<SpellInput>,
}

impl Default for SpellSection {
    fn default() -> Self {
        SpellSection {
            spells: vec![SpellInput::default()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpellSummary {
    pub label: String,
    pub enabled: bool,
    pub damage_type: DamageType,
    pub values: SpellValues,
}

/// One enabled spell landing on one enabled target
#[derive(Debug, Clone, PartialEq)]
pub struct SpellTargetResult {
    pub spell: usize,
    pub spell_label: String,
    pub target: TargetId,
    pub target_label: String,
    pub damage_type: DamageType,
    pub raw_damage: f64,
    pub mitigated_damage: f64,
    /// Share of the raw damage removed, in percent
    pub reduction_pct: f64,
    /// `max(cast, cooldown)`
    pub cycle: f64,
    pub dps: f64,
    pub mana_efficiency: f64,
    /// The spell costs no mana
    pub free_cast: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpellReport {
    pub spells: Vec<SpellSummary>,
    pub pairs: Vec<SpellTargetResult>,
}

impl SpellReport {
    /// Combined mitigated damage of every spell aimed at `target`
    pub fn burst(&self, target: TargetId) -> f64 {
        self.pairs
            .iter()
            .filter(|p| p.target == target)
            .map(|p| p.mitigated_damage)
            .sum()
    }
}

impl SpellSection {
    pub fn add_spell(&mut self) -> usize {
        let label = format!("Spell {}", self.spells.len() + 1);
        self.spells.push(SpellInput::with_label(label));
        self.spells.len() - 1
    }

    pub fn remove_spell(&mut self, index: usize) -> Result<SpellInput, StructureError> {
        remove_keeping_one(&mut self.spells, index, "spell")
    }

    pub fn prune_target(&mut self, id: TargetId) {
        for spell in &mut self.spells {
            spell.targets.retain(|t| *t != id);
        }
    }

    pub fn prune_modifier(&mut self, id: ModifierId) {
        for spell in &mut self.spells {
            spell.modifiers.retain(|m| *m != id);
        }
    }

    pub fn resolve(
        &self,
        vars: &Variables,
        lookup: &impl ModifierLookup,
        targets: &[TargetSnapshot],
    ) -> SpellReport {
        let mut report = SpellReport::default();

        for (index, spell) in self.spells.iter().enumerate() {
            let values = spell.evaluate(vars, lookup);

            if spell.enabled {
                for target in spell
                    .targets
                    .iter()
                    .filter_map(|id| targets.iter().find(|t| t.id == *id))
                    .filter(|t| t.enabled)
                {
                    report
                        .pairs
                        .push(resolve_pair(index, spell, &values, target));
                }
            }

            report.spells.push(SpellSummary {
                label: spell.label.clone(),
                enabled: spell.enabled,
                damage_type: spell.damage_type,
                values,
            });
        }

        tracing::debug!(pairs = report.pairs.len(), "spells resolved");
        report
    }
}

fn resolve_pair(
    index: usize,
    spell: &SpellInput,
    values: &SpellValues,
    target: &TargetSnapshot,
) -> SpellTargetResult {
    let raw = values.total_damage;
    let mitigated = target.mitigate(raw, spell.damage_type);
    let reduction_pct = if raw > 0.0 {
        (raw - mitigated) / raw * 100.0
    } else {
        0.0
    };

    SpellTargetResult {
        spell: index,
        spell_label: spell.label.clone(),
        target: target.id,
        target_label: target.label.clone(),
        damage_type: spell.damage_type,
        raw_damage: raw,
        mitigated_damage: mitigated,
        reduction_pct,
        cycle: values.cast_time.max(values.cooldown),
        dps: spell_dps(mitigated, values.cast_time, values.cooldown),
        mana_efficiency: mana_efficiency(mitigated, values.mana),
        free_cast: values.mana <= 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModifierPool;
    use crate::target::TargetSection;

    fn setup() -> (SpellSection, TargetSection) {
        let mut targets = TargetSection::default();
        let first = targets.targets()[0].id;
        let second = targets.add();
        if let Some(t) = targets.get_mut(second) {
            t.armor = "10".to_string();
        }

        let spells = SpellSection {
            spells: vec![
                SpellInput {
                    damage: "200".to_string(),
                    cooldown: "10".to_string(),
                    mana: "100".to_string(),
                    targets: vec![first, second],
                    ..Default::default()
                },
                SpellInput {
                    label: "Spell 2".to_string(),
                    damage: "100".to_string(),
                    damage_type: DamageType::Physical,
                    targets: vec![second],
                    ..Default::default()
                },
            ],
        };
        (spells, targets)
    }

    #[test]
    fn test_pairs_per_selected_target() {
        let (spells, targets) = setup();
        let vars = Variables::new();
        let report = spells.resolve(
            &vars,
            &ModifierPool::new().snapshot(&vars),
            &targets.snapshot(&vars),
        );

        assert_eq!(report.pairs.len(), 3);
        let first = &report.pairs[0];
        // 200 magic against 25% resistance
        assert!((first.mitigated_damage - 150.0).abs() < 1e-9);
        assert!((first.reduction_pct - 25.0).abs() < 1e-9);
        assert!((first.dps - 15.0).abs() < 1e-9);
        assert!((first.mana_efficiency - 1.5).abs() < 1e-9);
        assert!(!first.free_cast);

        let physical = &report.pairs[2];
        assert!((physical.mitigated_damage - 62.5).abs() < 1e-9);
        assert!(physical.free_cast);
        assert!(physical.mana_efficiency.is_infinite());
        assert_eq!(physical.dps, 0.0);
    }

    #[test]
    fn test_burst_sums_spells_on_one_target() {
        let (spells, targets) = setup();
        let vars = Variables::new();
        let report = spells.resolve(
            &vars,
            &ModifierPool::new().snapshot(&vars),
            &targets.snapshot(&vars),
        );
        let second = targets.targets()[1].id;

        // 150 + 62.5
        assert!((report.burst(second) - 212.5).abs() < 1e-9);
    }

    #[test]
    fn test_disabled_spell_and_target_are_skipped() {
        let (mut spells, mut targets) = setup();
        spells.spells[1].enabled = false;
        let first = targets.targets()[0].id;
        if let Some(t) = targets.get_mut(first) {
            t.enabled = false;
        }
        let vars = Variables::new();
        let report = spells.resolve(
            &vars,
            &ModifierPool::new().snapshot(&vars),
            &targets.snapshot(&vars),
        );

        assert_eq!(report.pairs.len(), 1);
        assert_eq!(report.spells.len(), 2);
    }

    #[test]
    fn test_prune_target() {
        let (mut spells, targets) = setup();
        let second = targets.targets()[1].id;
        spells.prune_target(second);
        assert!(spells.spells[1].targets.is_empty());
        assert_eq!(spells.spells[0].targets.len(), 1);
    }
}
