//! Hero inputs as entered

use crate::expr::{self, Variables};
use crate::modifier::{lenient, Modifier};
use crate::types::AttributeType;
use serde::{Deserialize, Serialize};

use super::item::{AttachedItem, Item};
use super::spell::HeroSpell;

/// Raw hero stat fields; every value is an expression except the name and
/// attribute type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroFields {
    pub name: String,
    pub attribute_type: String,
    pub level: String,
    pub base_hp: String,
    pub base_hp_regen: String,
    pub movespeed: String,
    pub attack_speed: String,
    pub bat: String,
    pub base_damage: String,
    pub base_armor: String,
    pub base_magic_resist: String,
    pub evasion: String,
    pub strength: String,
    pub agility: String,
    pub intelligence: String,
    pub strength_per_level: String,
    pub agility_per_level: String,
    pub intelligence_per_level: String,
    /// Display only
    pub turn_rate: String,
}

impl Default for HeroFields {
    fn default() -> Self {
        let s = |v: &str| v.to_string();
        HeroFields {
            name: s("Hero"),
            attribute_type: s("Strength"),
            level: s("1"),
            base_hp: s("200"),
            base_hp_regen: s("0"),
            movespeed: s("300"),
            attack_speed: s("100"),
            bat: s("1.7"),
            base_damage: s("50"),
            base_armor: s("0"),
            base_magic_resist: s("25"),
            evasion: s("0"),
            strength: s("20"),
            agility: s("20"),
            intelligence: s("20"),
            strength_per_level: s("0"),
            agility_per_level: s("0"),
            intelligence_per_level: s("0"),
            turn_rate: s("0.6"),
        }
    }
}

/// Numeric hero fields; invalid entries read as 0 (level as 1)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeroValues {
    pub attribute_type: AttributeType,
    pub level: f64,
    pub base_hp: f64,
    pub base_hp_regen: f64,
    pub movespeed: f64,
    pub attack_speed: f64,
    pub bat: f64,
    pub base_damage: f64,
    pub base_armor: f64,
    /// Percent, clamped 0..100
    pub base_magic_resist: f64,
    /// Percent, clamped 0..100
    pub evasion: f64,
    pub strength: f64,
    pub agility: f64,
    pub intelligence: f64,
    pub strength_per_level: f64,
    pub agility_per_level: f64,
    pub intelligence_per_level: f64,
}

impl HeroFields {
    pub fn evaluate(&self, vars: &Variables) -> HeroValues {
        let num = |text: &str| expr::eval_or(text, vars, 0.0);
        HeroValues {
            attribute_type: AttributeType::parse_lenient(&self.attribute_type),
            level: expr::eval_or(&self.level, vars, 1.0).max(1.0),
            base_hp: num(&self.base_hp),
            base_hp_regen: num(&self.base_hp_regen),
            movespeed: num(&self.movespeed),
            attack_speed: num(&self.attack_speed),
            bat: num(&self.bat),
            base_damage: num(&self.base_damage),
            base_armor: num(&self.base_armor),
            base_magic_resist: num(&self.base_magic_resist).clamp(0.0, 100.0),
            evasion: num(&self.evasion).clamp(0.0, 100.0),
            strength: num(&self.strength),
            agility: num(&self.agility),
            intelligence: num(&self.intelligence),
            strength_per_level: num(&self.strength_per_level),
            agility_per_level: num(&self.agility_per_level),
            intelligence_per_level: num(&self.intelligence_per_level),
        }
    }
}

/// A hero with its own modifiers, attached items and spells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroInput {
    pub hero_id: u32,
    pub fields: HeroFields,
    #[serde(with = "lenient")]
    pub modifiers: Vec<Modifier>,
    pub spells: Vec<HeroSpell>,
    pub items: Vec<AttachedItem>,
}

impl HeroInput {
    pub fn new(name: impl Into<String>) -> Self {
        HeroInput {
            fields: HeroFields {
                name: name.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    /// Attach a copy of a library item, switched on
    pub fn attach_item(&mut self, item: &Item) {
        self.items.push(AttachedItem::from(item.clone()));
    }

    pub fn attach_spell(&mut self, spell: &HeroSpell) {
        self.spells.push(spell.clone());
    }
}
