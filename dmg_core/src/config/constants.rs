//! Tunable calculator constants

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunable formula constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalcConstants {
    #[serde(default)]
    pub attack: AttackConstants,
    #[serde(default)]
    pub hero: HeroConstants,
    #[serde(default)]
    pub columns: ColumnConstants,
}

impl CalcConstants {
    /// Reject constants that would make the formulas meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attack.default_bat <= 0.0 {
            return Err(ConfigError::ValidationError(
                "attack.default_bat must be positive".to_string(),
            ));
        }
        if self.attack.range_size == 0 {
            return Err(ConfigError::ValidationError(
                "attack.range_size must be at least 1".to_string(),
            ));
        }
        if self.columns.max_columns == 0 {
            return Err(ConfigError::ValidationError(
                "columns.max_columns must be at least 1".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.hero.bat_reduction_cap) {
            return Err(ConfigError::ValidationError(
                "hero.bat_reduction_cap must be in [0, 1)".to_string(),
            ));
        }
        if self.hero.min_bat <= 0.0 {
            return Err(ConfigError::ValidationError(
                "hero.min_bat must be positive".to_string(),
            ));
        }
        if self.hero.armor_per_agility_divisor <= 0.0 {
            return Err(ConfigError::ValidationError(
                "hero.armor_per_agility_divisor must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackConstants {
    /// Attack speed used when the field is invalid or zero
    #[serde(default = "default_attack_speed")]
    pub default_attack_speed: f64,
    /// Base attack time used when the field is invalid or not positive
    #[serde(default = "default_bat")]
    pub default_bat: f64,
    /// Rows in the 1..=N range tables
    #[serde(default = "default_range_size")]
    pub range_size: u32,
}

impl Default for AttackConstants {
    fn default() -> Self {
        AttackConstants {
            default_attack_speed: 100.0,
            default_bat: 1.7,
            range_size: 10,
        }
    }
}

fn default_attack_speed() -> f64 {
    100.0
}
fn default_bat() -> f64 {
    1.7
}
fn default_range_size() -> u32 {
    10
}

/// Hero attribute formulas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroConstants {
    #[serde(default = "default_hp_per_strength")]
    pub hp_per_strength: f64,
    #[serde(default = "default_hp_regen_per_strength")]
    pub hp_regen_per_strength: f64,
    #[serde(default = "default_base_mana")]
    pub base_mana: f64,
    #[serde(default = "default_mana_per_intelligence")]
    pub mana_per_intelligence: f64,
    #[serde(default = "default_mana_regen_per_intelligence")]
    pub mana_regen_per_intelligence: f64,
    /// Agility points per point of armor
    #[serde(default = "default_armor_per_agility_divisor")]
    pub armor_per_agility_divisor: f64,
    /// Magic resistance percent per intelligence point
    #[serde(default = "default_magic_resist_per_intelligence")]
    pub magic_resist_per_intelligence: f64,
    /// Share of all attributes a Universal hero gets as attack damage
    #[serde(default = "default_universal_blend")]
    pub universal_blend: f64,
    #[serde(default = "default_bat_reduction_cap")]
    pub bat_reduction_cap: f64,
    #[serde(default = "default_min_bat")]
    pub min_bat: f64,
}

impl Default for HeroConstants {
    fn default() -> Self {
        HeroConstants {
            hp_per_strength: 22.0,
            hp_regen_per_strength: 0.1,
            base_mana: 75.0,
            mana_per_intelligence: 12.0,
            mana_regen_per_intelligence: 0.05,
            armor_per_agility_divisor: 6.0,
            magic_resist_per_intelligence: 0.1,
            universal_blend: 0.45,
            bat_reduction_cap: 0.95,
            min_bat: 0.01,
        }
    }
}

fn default_hp_per_strength() -> f64 {
    22.0
}
fn default_hp_regen_per_strength() -> f64 {
    0.1
}
fn default_base_mana() -> f64 {
    75.0
}
fn default_mana_per_intelligence() -> f64 {
    12.0
}
fn default_mana_regen_per_intelligence() -> f64 {
    0.05
}
fn default_armor_per_agility_divisor() -> f64 {
    6.0
}
fn default_magic_resist_per_intelligence() -> f64 {
    0.1
}
fn default_universal_blend() -> f64 {
    0.45
}
fn default_bat_reduction_cap() -> f64 {
    0.95
}
fn default_min_bat() -> f64 {
    0.01
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConstants {
    #[serde(default = "default_max_columns")]
    pub max_columns: usize,
}

impl Default for ColumnConstants {
    fn default() -> Self {
        ColumnConstants { max_columns: 6 }
    }
}

fn default_max_columns() -> usize {
    6
}
