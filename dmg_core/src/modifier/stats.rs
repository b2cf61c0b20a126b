//! Hero stat contributions carried by a modifier

use serde::{Deserialize, Serialize};

/// Numeric stat bonuses from one modifier
///
/// Percent-style inputs are already converted: `movespeed_pct` and
/// `bat_reduction` are fractions, `magic_resistance` stays in percent because
/// each source stacks separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBonuses {
    pub strength: f64,
    pub agility: f64,
    pub intelligence: f64,
    pub armor: f64,
    pub attack_speed: f64,
    pub movespeed_flat: f64,
    pub movespeed_pct: f64,
    pub hp: f64,
    pub mana: f64,
    pub hp_regen: f64,
    pub mana_regen: f64,
    pub magic_resistance: f64,
    pub bat_reduction: f64,
}
