//! Attack row inputs and section-level simple modifiers

use crate::config::AttackConstants;
use crate::expr::{self, Variables};
use crate::types::{ColumnFlags, ModifierId};
use serde::{Deserialize, Serialize};

use super::calculation;

/// One attacker as entered: every numeric field is a raw expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackRowInput {
    pub label: String,
    pub enabled: bool,
    pub base: String,
    pub bonus: String,
    pub hits: String,
    pub attack_speed: String,
    pub bat: String,
    pub columns: ColumnFlags,
    /// Ordered chain of pool modifiers applied after the simple modifiers
    pub modifiers: Vec<ModifierId>,
}

impl Default for AttackRowInput {
    fn default() -> Self {
        AttackRowInput {
            label: "Attack 1".to_string(),
            enabled: true,
            base: "0".to_string(),
            bonus: "0".to_string(),
            hits: "1".to_string(),
            attack_speed: "100".to_string(),
            bat: "1.7".to_string(),
            columns: ColumnFlags::default(),
            modifiers: Vec::new(),
        }
    }
}

/// Numeric view of an attack row after fallbacks
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttackRowValues {
    pub base: f64,
    pub bonus: f64,
    pub hits: u32,
    pub attack_speed: f64,
    pub bat: f64,
    /// Attacks per second
    pub rate: f64,
    /// Fields that failed to evaluate and used their fallback
    pub invalid_fields: Vec<&'static str>,
}

impl AttackRowInput {
    pub fn with_label(label: impl Into<String>) -> Self {
        AttackRowInput {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn evaluate(&self, vars: &Variables, constants: &AttackConstants) -> AttackRowValues {
        let mut invalid = Vec::new();
        let mut read = |key: &'static str, text: &str| {
            let value = expr::try_eval(text, vars);
            if value.is_none() {
                invalid.push(key);
            }
            value
        };

        let base = read("base", &self.base).unwrap_or(0.0);
        let bonus = read("bonus", &self.bonus).unwrap_or(0.0);
        let hits = match read("hits", &self.hits) {
            Some(v) if v >= 1.0 => v.trunc().min(u32::MAX as f64) as u32,
            _ => 1,
        };
        let attack_speed = match read("attack_speed", &self.attack_speed) {
            Some(v) if v != 0.0 => v,
            _ => constants.default_attack_speed,
        };
        let bat = match read("bat", &self.bat) {
            Some(v) if v > 0.0 => v,
            _ => constants.default_bat,
        };

        AttackRowValues {
            base,
            bonus,
            hits,
            attack_speed,
            bat,
            rate: calculation::attack_rate(attack_speed, bat),
            invalid_fields: invalid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimpleKind {
    #[default]
    Flat,
    Percent,
}

/// Section-wide flat or percentage bonus applied to every attack row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimpleModifier {
    pub name: String,
    pub enabled: bool,
    /// Flat damage, or a percentage given in percent
    pub value: String,
    pub kind: SimpleKind,
}

impl Default for SimpleModifier {
    fn default() -> Self {
        SimpleModifier {
            name: "Modifier".to_string(),
            enabled: true,
            value: "0".to_string(),
            kind: SimpleKind::Flat,
        }
    }
}

impl SimpleModifier {
    pub fn flat(name: impl Into<String>, value: impl Into<String>) -> Self {
        SimpleModifier {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn percent(name: impl Into<String>, value: impl Into<String>) -> Self {
        SimpleModifier {
            name: name.into(),
            value: value.into(),
            kind: SimpleKind::Percent,
            ..Default::default()
        }
    }

    /// Evaluated contribution; percentages become fractions. Disabled or
    /// invalid modifiers contribute 0.
    pub fn value(&self, vars: &Variables) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        let value = expr::eval_or(&self.value, vars, 0.0);
        match self.kind {
            SimpleKind::Flat => value,
            SimpleKind::Percent => value / 100.0,
        }
    }
}

/// Split simple modifiers into (flat values, percentage fractions)
pub fn simple_buckets(modifiers: &[SimpleModifier], vars: &Variables) -> (Vec<f64>, Vec<f64>) {
    let mut flats = Vec::new();
    let mut percents = Vec::new();
    for m in modifiers.iter().filter(|m| m.enabled) {
        match m.kind {
            SimpleKind::Flat => flats.push(m.value(vars)),
            SimpleKind::Percent => percents.push(m.value(vars)),
        }
    }
    (flats, percents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_fallbacks() {
        let constants = AttackConstants::default();
        let row = AttackRowInput {
            base: "oops".to_string(),
            hits: "2.9".to_string(),
            attack_speed: "0".to_string(),
            bat: "-1".to_string(),
            ..Default::default()
        };
        let values = row.evaluate(&Variables::new(), &constants);

        assert_eq!(values.base, 0.0);
        assert_eq!(values.hits, 2);
        assert!((values.attack_speed - 100.0).abs() < f64::EPSILON);
        assert!((values.bat - 1.7).abs() < f64::EPSILON);
        assert_eq!(values.invalid_fields, vec!["base"]);
    }

    #[test]
    fn test_hits_floor_is_one() {
        let constants = AttackConstants::default();
        let row = AttackRowInput {
            hits: "0".to_string(),
            ..Default::default()
        };
        assert_eq!(row.evaluate(&Variables::new(), &constants).hits, 1);
    }

    #[test]
    fn test_variables_in_row() {
        let constants = AttackConstants::default();
        let vars: Variables = [("dmg", 60.0), ("speed", 200.0)].into_iter().collect();
        let row = AttackRowInput {
            base: "dmg".to_string(),
            bonus: "dmg / 2".to_string(),
            attack_speed: "speed".to_string(),
            bat: "2".to_string(),
            ..Default::default()
        };
        let values = row.evaluate(&vars, &constants);

        assert!((values.base - 60.0).abs() < f64::EPSILON);
        assert!((values.bonus - 30.0).abs() < f64::EPSILON);
        // 200 / (100 * 2)
        assert!((values.rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_simple_buckets() {
        let vars = Variables::new();
        let mods = vec![
            SimpleModifier::flat("Blade", "20"),
            SimpleModifier::percent("Rage", "25"),
            SimpleModifier {
                enabled: false,
                ..SimpleModifier::flat("Off", "999")
            },
            SimpleModifier::flat("Broken", "2 +"),
        ];
        let (flats, percents) = simple_buckets(&mods, &vars);
        assert_eq!(flats, vec![20.0, 0.0]);
        assert_eq!(percents, vec![0.25]);
    }
}
