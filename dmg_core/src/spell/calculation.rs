//! Spell arithmetic

use crate::target::TargetSnapshot;
use crate::types::DamageType;

/// Damage per second over one cast cycle, `max(cast, cooldown)`; 0 without a cycle
pub fn spell_dps(damage: f64, cast_time: f64, cooldown: f64) -> f64 {
    let cycle = cast_time.max(cooldown);
    if cycle <= 0.0 {
        return 0.0;
    }
    damage / cycle
}

/// Damage per point of mana; infinite for a free spell that deals damage
pub fn mana_efficiency(damage: f64, mana_cost: f64) -> f64 {
    if mana_cost <= 0.0 {
        return if damage > 0.0 { f64::INFINITY } else { 0.0 };
    }
    damage / mana_cost
}

/// Combined mitigated damage of `(damage, type)` pairs landing on one target
pub fn burst_damage(spells: &[(f64, DamageType)], target: &TargetSnapshot) -> f64 {
    spells
        .iter()
        .map(|(damage, damage_type)| target.mitigate(*damage, *damage_type))
        .sum()
}
