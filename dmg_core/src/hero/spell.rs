//! Levelled hero spells
//!
//! A spell keeps one [`SpellLevel`] per level up to its max level. Moving to
//! a level for the first time seeds it from the level below; levels already
//! visited keep their own edits.

use crate::expr::{self, Variables};
use crate::modifier::{lenient, Modifier};
use crate::spell::{mana_efficiency, spell_dps};
use crate::types::DamageType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const MAX_SPELL_LEVEL: usize = 10;
pub const DEFAULT_MAX_LEVEL: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellLevel {
    pub damage: String,
    pub damage_type: DamageType,
    pub hits: String,
    pub cast: String,
    pub stun: String,
    pub mana: String,
    pub cooldown: String,
    #[serde(with = "lenient")]
    pub modifiers: Vec<Modifier>,
}

impl Default for SpellLevel {
    fn default() -> Self {
        SpellLevel {
            damage: "0".to_string(),
            damage_type: DamageType::Magic,
            hits: "1".to_string(),
            cast: "0".to_string(),
            stun: "0".to_string(),
            mana: "0".to_string(),
            cooldown: "0".to_string(),
            modifiers: Vec::new(),
        }
    }
}

/// A spell with per-level data and a visited-level cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "HeroSpellRecord", into = "SavedHeroSpell")]
pub struct HeroSpell {
    pub name: String,
    levels: Vec<SpellLevel>,
    /// Zero-based
    current: usize,
    visited: BTreeSet<usize>,
}

impl Default for HeroSpell {
    fn default() -> Self {
        HeroSpell::new("Spell")
    }
}

/// Computed figures for the current level
#[derive(Debug, Clone, PartialEq)]
pub struct HeroSpellSummary {
    pub name: String,
    pub level: usize,
    pub damage: f64,
    pub damage_type: DamageType,
    pub dps: f64,
    pub mana_efficiency: f64,
    pub free_cast: bool,
    pub stun: f64,
}

fn clamp_level(level: usize) -> usize {
    level.clamp(1, MAX_SPELL_LEVEL)
}

impl HeroSpell {
    pub fn new(name: impl Into<String>) -> Self {
        let mut spell = HeroSpell {
            name: name.into(),
            levels: vec![SpellLevel::default()],
            current: 0,
            visited: BTreeSet::from([0]),
        };
        spell.set_max_level(DEFAULT_MAX_LEVEL);
        spell
    }

    pub fn max_level(&self) -> usize {
        self.levels.len()
    }

    /// One-based
    pub fn current_level(&self) -> usize {
        self.current + 1
    }

    pub fn levels(&self) -> &[SpellLevel] {
        &self.levels
    }

    pub fn current(&self) -> &SpellLevel {
        &self.levels[self.current]
    }

    pub fn current_mut(&mut self) -> &mut SpellLevel {
        &mut self.levels[self.current]
    }

    pub fn is_visited(&self, level: usize) -> bool {
        level >= 1 && self.visited.contains(&(level - 1))
    }

    /// Grow by copying the top level, or truncate; clamped to `1..=10`
    pub fn set_max_level(&mut self, max_level: usize) {
        let max_level = clamp_level(max_level);
        while self.levels.len() < max_level {
            let top = self.levels.last().cloned().unwrap_or_default();
            self.levels.push(top);
        }
        self.levels.truncate(max_level);

        self.visited.retain(|idx| *idx < max_level);
        self.visited.insert(0);
        if self.current >= max_level {
            self.current = max_level - 1;
            self.visited.insert(self.current);
        }
    }

    /// Switch level; a level seen for the first time starts as a copy of
    /// the level below it
    pub fn set_current_level(&mut self, level: usize) {
        let idx = clamp_level(level).min(self.max_level()) - 1;
        if !self.visited.contains(&idx) && idx > 0 {
            self.levels[idx] = self.levels[idx - 1].clone();
        }
        self.visited.insert(idx);
        self.current = idx;
    }

    pub fn summary(&self, vars: &Variables) -> HeroSpellSummary {
        let level = self.current();
        let snapshots: Vec<_> = level.modifiers.iter().map(|m| m.snapshot(vars)).collect();
        let chain = crate::modifier::ModifierChain::new(snapshots.iter().collect());

        let base = expr::eval_or(&level.damage, vars, 0.0);
        let hits = expr::eval_count(&level.hits, vars);
        let damage = chain.damage_for_hit(1, base) * hits as f64;
        let cast = expr::eval_non_negative(&level.cast, vars);
        let cooldown = expr::eval_non_negative(&level.cooldown, vars);
        let mana = expr::eval_non_negative(&level.mana, vars);

        HeroSpellSummary {
            name: self.name.clone(),
            level: self.current_level(),
            damage,
            damage_type: level.damage_type,
            dps: spell_dps(damage, cast, cooldown),
            mana_efficiency: mana_efficiency(damage, mana),
            free_cast: mana <= 0.0,
            stun: expr::eval_non_negative(&level.stun, vars),
        }
    }
}

/// Saved level numbers come as integers or strings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum LevelNumber {
    Int(i64),
    Text(String),
}

impl LevelNumber {
    fn parse(&self, default: usize) -> usize {
        let value = match self {
            LevelNumber::Int(n) => Some(*n),
            LevelNumber::Text(s) => s.trim().parse::<i64>().ok(),
        };
        match value {
            Some(n) => n.clamp(1, MAX_SPELL_LEVEL as i64) as usize,
            None => default,
        }
    }
}

/// Saved form, including the flat single-level layout of older files
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct HeroSpellRecord {
    name: Option<String>,
    max_level: Option<LevelNumber>,
    current_level: Option<LevelNumber>,
    levels: Vec<SpellLevel>,
    damage: Option<String>,
    damage_type: Option<DamageType>,
    hits: Option<String>,
    cast: Option<String>,
    stun: Option<String>,
    mana: Option<String>,
    cooldown: Option<String>,
    #[serde(deserialize_with = "lenient::deserialize")]
    modifiers: Vec<Modifier>,
}

impl HeroSpellRecord {
    fn legacy_level(&mut self) -> SpellLevel {
        let defaults = SpellLevel::default();
        SpellLevel {
            damage: self.damage.take().unwrap_or(defaults.damage),
            damage_type: self.damage_type.unwrap_or(defaults.damage_type),
            hits: self.hits.take().unwrap_or(defaults.hits),
            cast: self.cast.take().unwrap_or(defaults.cast),
            stun: self.stun.take().unwrap_or(defaults.stun),
            mana: self.mana.take().unwrap_or(defaults.mana),
            cooldown: self.cooldown.take().unwrap_or(defaults.cooldown),
            modifiers: std::mem::take(&mut self.modifiers),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SavedHeroSpell {
    name: String,
    max_level: usize,
    current_level: usize,
    levels: Vec<SpellLevel>,
}

impl From<HeroSpellRecord> for HeroSpell {
    fn from(mut record: HeroSpellRecord) -> Self {
        let mut levels = std::mem::take(&mut record.levels);
        levels.truncate(MAX_SPELL_LEVEL);
        if levels.is_empty() {
            levels.push(record.legacy_level());
        }
        let stored = levels.len();

        let mut spell = HeroSpell {
            name: record.name.take().unwrap_or_else(|| "Spell".to_string()),
            levels,
            current: 0,
            visited: BTreeSet::new(),
        };
        let max_level = record.max_level.as_ref().map_or(stored, |n| n.parse(stored));
        spell.set_max_level(max_level);
        spell.visited = (0..spell.max_level()).collect();

        let current = record.current_level.as_ref().map_or(1, |n| n.parse(1));
        spell.current = current.min(spell.max_level()) - 1;
        spell
    }
}

impl From<HeroSpell> for SavedHeroSpell {
    fn from(spell: HeroSpell) -> Self {
        SavedHeroSpell {
            name: spell.name,
            max_level: spell.levels.len(),
            current_level: spell.current + 1,
            levels: spell.levels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModifierKind;

    #[test]
    fn test_new_spell_has_four_levels() {
        let spell = HeroSpell::new("Nuke");
        assert_eq!(spell.max_level(), 4);
        assert_eq!(spell.current_level(), 1);
        assert!(spell.is_visited(1));
        assert!(!spell.is_visited(2));
    }

    #[test]
    fn test_unvisited_level_copies_previous() {
        let mut spell = HeroSpell::new("Nuke");
        spell.current_mut().damage = "100".to_string();
        spell
            .current_mut()
            .modifiers
            .push(Modifier::new(ModifierKind::PercentageDamage));

        spell.set_current_level(2);
        assert_eq!(spell.current().damage, "100");
        assert_eq!(spell.current().modifiers.len(), 1);

        // edits on level 2 don't leak back into level 1
        spell.current_mut().damage = "150".to_string();
        spell.current_mut().modifiers.clear();
        spell.set_current_level(1);
        assert_eq!(spell.current().damage, "100");
        assert_eq!(spell.current().modifiers.len(), 1);

        // revisit restores the saved level 2
        spell.set_current_level(2);
        assert_eq!(spell.current().damage, "150");
    }

    #[test]
    fn test_max_level_grow_and_shrink() {
        let mut spell = HeroSpell::new("Nuke");
        spell.set_current_level(4);
        spell.current_mut().damage = "400".to_string();

        spell.set_max_level(6);
        assert_eq!(spell.max_level(), 6);
        assert_eq!(spell.levels()[5].damage, "400");

        spell.set_max_level(2);
        assert_eq!(spell.max_level(), 2);
        assert_eq!(spell.current_level(), 2);
        assert!(!spell.is_visited(4));

        spell.set_max_level(25);
        assert_eq!(spell.max_level(), MAX_SPELL_LEVEL);
        spell.set_max_level(0);
        assert_eq!(spell.max_level(), 1);
    }

    #[test]
    fn test_round_trip_marks_levels_visited() {
        let mut spell = HeroSpell::new("Nuke");
        spell.set_current_level(3);
        spell.current_mut().damage = "300".to_string();

        let json = serde_json::to_value(&spell).unwrap();
        assert_eq!(json["max_level"], 4);
        assert_eq!(json["current_level"], 3);

        let loaded: HeroSpell = serde_json::from_value(json).unwrap();
        assert_eq!(loaded.current_level(), 3);
        assert_eq!(loaded.current().damage, "300");
        assert!((1..=4).all(|l| loaded.is_visited(l)));
    }

    #[test]
    fn test_legacy_single_level_payload() {
        let json = r#"{"name": "Old", "damage": "250", "damage_type": "Pure", "cooldown": "8",
                       "modifiers": [{"type": "Flat Damage", "values": {"value_var": "50"}}, 3]}"#;
        let spell: HeroSpell = serde_json::from_str(json).unwrap();

        assert_eq!(spell.max_level(), 1);
        assert_eq!(spell.current().damage, "250");
        assert_eq!(spell.current().damage_type, DamageType::Pure);
        assert_eq!(spell.current().modifiers.len(), 1);
    }

    #[test]
    fn test_string_level_numbers() {
        let json = r#"{"name": "S", "max_level": "3", "current_level": "9",
                       "levels": [{"damage": "10"}, {"damage": "20"}, {"damage": "30"}]}"#;
        let spell: HeroSpell = serde_json::from_str(json).unwrap();
        assert_eq!(spell.max_level(), 3);
        assert_eq!(spell.current_level(), 3);
    }

    #[test]
    fn test_summary() {
        let mut spell = HeroSpell::new("Nuke");
        {
            let level = spell.current_mut();
            level.damage = "100".to_string();
            level.hits = "2".to_string();
            level.cooldown = "10".to_string();
            level.mana = "50".to_string();
            level
                .modifiers
                .push(Modifier::new(ModifierKind::PercentageDamage).with_field("value_var", "50"));
        }
        let summary = spell.summary(&Variables::new());

        // 100 * 1.5 * 2
        assert!((summary.damage - 300.0).abs() < 1e-9);
        assert!((summary.dps - 30.0).abs() < 1e-9);
        assert!((summary.mana_efficiency - 6.0).abs() < 1e-9);
        assert!(!summary.free_cast);
    }
}
