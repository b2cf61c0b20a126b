//! Target inputs and their evaluated defenses

use crate::expr::{self, Variables};
use crate::mitigation::{
    apply_magic_resistance, armor_to_reduction, armor_to_reduction_percent, clamp_percent,
    eval_armor_expression, reduction_to_armor,
};
use crate::types::{DamageType, TargetId};
use serde::{Deserialize, Serialize};

/// How the armor field of a target is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DefenseMode {
    /// The field is an armor value
    #[default]
    Armor,
    /// The field is a physical reduction in percent
    Reduction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetInput {
    /// Assigned by the owning section; 0 means unassigned
    pub id: TargetId,
    pub label: String,
    pub enabled: bool,
    /// Empty means no HP (no kill projection)
    pub hp: String,
    pub regen: String,
    /// Armor or reduction percent, depending on `mode`
    pub armor: String,
    pub magic_resistance: String,
    /// Evasion in percent
    pub evasion: String,
    pub mode: DefenseMode,
}

impl Default for TargetInput {
    fn default() -> Self {
        TargetInput {
            id: TargetId(0),
            label: "Target 1".to_string(),
            enabled: true,
            hp: String::new(),
            regen: "0".to_string(),
            armor: "0".to_string(),
            magic_resistance: "25".to_string(),
            evasion: "0".to_string(),
            mode: DefenseMode::Armor,
        }
    }
}

/// Evaluated target defenses for one recompute pass
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSnapshot {
    pub id: TargetId,
    pub label: String,
    pub enabled: bool,
    /// `None` when empty, invalid or not positive
    pub hp: Option<f64>,
    pub regen: f64,
    /// Armor before any armor reduction from the attacker
    pub armor: f64,
    /// Physical reduction fraction as entered, before any armor reduction
    pub reduction: f64,
    /// Fraction 0..1
    pub magic_resistance: f64,
    /// Fraction 0..1
    pub evasion: f64,
    pub invalid_fields: Vec<&'static str>,
}

impl TargetInput {
    pub fn with_label(label: impl Into<String>) -> Self {
        TargetInput {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Armor value and reduction fraction of the defense field
    ///
    /// The armor value only matters once an attacker strips armor; the
    /// reduction is kept exactly as read.
    fn read_defense(&self, vars: &Variables) -> Option<(f64, f64)> {
        match self.mode {
            DefenseMode::Armor => {
                let reading = eval_armor_expression(&self.armor, vars);
                if !reading.valid {
                    return None;
                }
                let armor = reading
                    .armor
                    .unwrap_or_else(|| reduction_to_armor(reading.reduction_pct));
                Some((armor, reading.reduction_pct / 100.0))
            }
            DefenseMode::Reduction => expr::try_eval(&self.armor, vars)
                .map(|pct| (reduction_to_armor(pct), pct / 100.0)),
        }
    }

    /// Switch input mode, rewriting the field so its reduction is unchanged
    pub fn set_mode(&mut self, mode: DefenseMode, vars: &Variables) {
        if mode == self.mode {
            return;
        }
        let current = expr::eval_or(&self.armor, vars, 0.0);
        let converted = match mode {
            DefenseMode::Armor => reduction_to_armor(current),
            DefenseMode::Reduction => armor_to_reduction_percent(current),
        };
        self.armor = format!("{converted:.1}");
        self.mode = mode;
    }

    pub fn snapshot(&self, vars: &Variables) -> TargetSnapshot {
        let mut invalid = Vec::new();

        let hp = match expr::try_eval(&self.hp, vars) {
            Some(v) if v > 0.0 => Some(v),
            Some(_) => None,
            None => {
                invalid.push("hp");
                None
            }
        };
        let regen = expr::try_eval(&self.regen, vars).unwrap_or_else(|| {
            invalid.push("regen");
            0.0
        });
        let (armor, reduction) = self.read_defense(vars).unwrap_or_else(|| {
            invalid.push("armor");
            (0.0, 0.0)
        });
        let magic_resistance = expr::try_eval(&self.magic_resistance, vars).unwrap_or_else(|| {
            invalid.push("magic_resistance");
            25.0
        });
        let evasion = expr::try_eval(&self.evasion, vars).unwrap_or_else(|| {
            invalid.push("evasion");
            0.0
        });

        TargetSnapshot {
            id: self.id,
            label: self.label.clone(),
            enabled: self.enabled,
            hp,
            regen,
            armor,
            reduction,
            magic_resistance: clamp_percent(magic_resistance) / 100.0,
            evasion: clamp_percent(evasion) / 100.0,
            invalid_fields: invalid,
        }
    }
}

impl TargetSnapshot {
    /// Armor left after the attacker strips `armor_reduction`
    pub fn effective_armor(&self, armor_reduction: f64) -> f64 {
        self.armor - armor_reduction
    }

    /// Physical reduction fraction after `armor_reduction`
    pub fn physical_reduction(&self, armor_reduction: f64) -> f64 {
        if armor_reduction == 0.0 {
            return self.reduction;
        }
        armor_to_reduction(self.effective_armor(armor_reduction))
    }

    /// Damage remaining after this target's defenses against `damage_type`
    pub fn mitigate(&self, damage: f64, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Magic => apply_magic_resistance(damage, self.magic_resistance),
            DamageType::Physical => damage * (1.0 - self.physical_reduction(0.0)),
            DamageType::Pure => damage,
        }
    }

    /// Fraction of damage removed against `damage_type`
    pub fn reduction(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Magic => self.magic_resistance,
            DamageType::Physical => self.physical_reduction(0.0),
            DamageType::Pure => 0.0,
        }
    }
}
