//! Magic resistance

/// Clamp a percentage into `[0, 100]`
pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Damage left after a magic resistance fraction
pub fn apply_magic_resistance(damage: f64, resistance: f64) -> f64 {
    damage * (1.0 - resistance)
}

/// Stack bonus magic resistance multiplicatively onto a base percentage
///
/// Each bonus multiplies the remaining damage fraction by `1 - bonus/100`,
/// so two 50% sources give 75%, not 100%.
pub fn stack_magic_resistance(base_pct: f64, bonuses_pct: &[f64]) -> f64 {
    let mut remaining = 1.0 - clamp_percent(base_pct) / 100.0;
    for bonus in bonuses_pct {
        remaining *= 1.0 - clamp_percent(*bonus) / 100.0;
    }
    clamp_percent((1.0 - remaining) * 100.0)
}
