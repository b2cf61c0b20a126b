//! Spell inputs

use crate::expr::{self, Variables};
use crate::modifier::ModifierLookup;
use crate::types::{DamageType, ModifierId, TargetId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellInput {
    pub label: String,
    pub enabled: bool,
    pub damage: String,
    pub instances: String,
    pub damage_type: DamageType,
    pub cast_time: String,
    pub cooldown: String,
    pub mana: String,
    pub duration: String,
    /// Display only
    pub stun: String,
    pub targets: Vec<TargetId>,
    pub modifiers: Vec<ModifierId>,
}

impl Default for SpellInput {
    fn default() -> Self {
        SpellInput {
            label: "Spell 1".to_string(),
            enabled: true,
            damage: "0".to_string(),
            instances: "1".to_string(),
            damage_type: DamageType::Magic,
            cast_time: "0".to_string(),
            cooldown: "0".to_string(),
            mana: "0".to_string(),
            duration: "0".to_string(),
            stun: "0".to_string(),
            targets: Vec::new(),
            modifiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpellValues {
    pub damage: f64,
    pub instances: u32,
    pub cast_time: f64,
    pub cooldown: f64,
    pub mana: f64,
    pub duration: f64,
    pub stun: f64,
    /// Damage after the modifier chain, times instances
    pub total_damage: f64,
}

impl SpellInput {
    pub fn with_label(label: impl Into<String>) -> Self {
        SpellInput {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn evaluate(&self, vars: &Variables, lookup: &impl ModifierLookup) -> SpellValues {
        let damage = expr::eval_or(&self.damage, vars, 0.0);
        let instances = expr::eval_count(&self.instances, vars);
        let per_instance = lookup.chain(&self.modifiers).damage_for_hit(1, damage);

        SpellValues {
            damage,
            instances,
            cast_time: expr::eval_non_negative(&self.cast_time, vars),
            cooldown: expr::eval_non_negative(&self.cooldown, vars),
            mana: expr::eval_non_negative(&self.mana, vars),
            duration: expr::eval_non_negative(&self.duration, vars),
            stun: expr::eval_non_negative(&self.stun, vars),
            total_damage: per_instance * instances as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{Modifier, ModifierKind, ModifierPool};

    #[test]
    fn test_fallbacks() {
        let spell = SpellInput {
            damage: "bad +".to_string(),
            instances: "0".to_string(),
            cooldown: "-3".to_string(),
            mana: "x".to_string(),
            ..Default::default()
        };
        let pool = ModifierPool::new();
        let vars = Variables::new();
        let values = spell.evaluate(&vars, &pool.snapshot(&vars));

        assert_eq!(values.damage, 0.0);
        assert_eq!(values.instances, 1);
        assert_eq!(values.cooldown, 0.0);
        assert_eq!(values.mana, 0.0);
    }

    #[test]
    fn test_chain_applies_per_instance() {
        let mut pool = ModifierPool::new();
        let amp = pool.add(Modifier::new(ModifierKind::PercentageDamage).with_field("value_var", "20"));
        let flat = pool.add(Modifier::new(ModifierKind::FlatDamage).with_field("value_var", "30"));

        let spell = SpellInput {
            damage: "100".to_string(),
            instances: "3".to_string(),
            modifiers: vec![amp, flat],
            ..Default::default()
        };
        let vars = Variables::new();
        let values = spell.evaluate(&vars, &pool.snapshot(&vars));

        // (100 * 1.2 + 30) * 3
        assert!((values.total_damage - 450.0).abs() < 1e-9);
    }
}
