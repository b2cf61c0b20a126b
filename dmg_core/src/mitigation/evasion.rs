//! Evasion, true strike and effective HP
//!
//! Evasion stacks with physical reduction multiplicatively:
//! `combined = 1 - (1 - reduction)(1 - evasion)`.
//! True strike pierces evasion: `hit = 1 - evasion·(1 - true_strike)`.

/// Combined physical mitigation from reduction and evasion (fractions)
pub fn combine_with_evasion(reduction: f64, evasion: f64) -> f64 {
    1.0 - (1.0 - reduction) * (1.0 - evasion)
}

/// Combine independent true strike chances
pub fn combine_true_strike<I: IntoIterator<Item = f64>>(chances: I) -> f64 {
    let miss_all: f64 = chances
        .into_iter()
        .map(|c| 1.0 - c.clamp(0.0, 1.0))
        .product();
    1.0 - miss_all
}

/// Chance that an attack connects
pub fn hit_chance(evasion: f64, true_strike: f64) -> f64 {
    let evasion = evasion.clamp(0.0, 1.0);
    let true_strike = true_strike.clamp(0.0, 1.0);
    1.0 - evasion * (1.0 - true_strike)
}

/// Raw damage needed to remove `hp` under a mitigation fraction
pub fn effective_hp(hp: f64, mitigation: f64) -> f64 {
    let denominator = 1.0 - mitigation;
    if denominator <= 0.0 {
        return f64::INFINITY;
    }
    hp / denominator
}
