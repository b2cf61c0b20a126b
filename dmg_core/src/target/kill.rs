//! Kill projections against a regenerating target

/// Hits needed to bring `hp` to zero, or `None` when the target can't die
///
/// Regen is spread over the attack interval. Fractional hits round up.
pub fn hits_to_kill(hp: f64, damage_per_hit: f64, hp_regen: f64, attack_rate: f64) -> Option<u64> {
    if damage_per_hit <= 0.0 {
        return None;
    }

    let effective = if hp_regen <= 0.0 || attack_rate <= 0.0 {
        damage_per_hit
    } else {
        damage_per_hit - hp_regen / attack_rate
    };
    if effective <= 0.0 {
        return None;
    }

    let hits = (hp / effective).ceil();
    if hits.is_finite() && hits <= u64::MAX as f64 {
        Some(hits.max(0.0) as u64)
    } else {
        None
    }
}

/// Seconds to kill; infinite when nothing attacks or the target out-heals
pub fn time_to_kill(hp: f64, damage_per_hit: f64, attack_rate: f64, hp_regen: f64) -> f64 {
    if attack_rate <= 0.0 {
        return f64::INFINITY;
    }
    match hits_to_kill(hp, damage_per_hit, hp_regen, attack_rate) {
        Some(hits) => hits as f64 / attack_rate,
        None => f64::INFINITY,
    }
}

/// Hits and time to kill for one target in one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KillProjection {
    pub hits: Option<u64>,
    pub time: f64,
}

impl KillProjection {
    pub fn project(hp: f64, damage_per_hit: f64, hp_regen: f64, attack_rate: f64) -> Self {
        KillProjection {
            hits: hits_to_kill(hp, damage_per_hit, hp_regen, attack_rate),
            time: time_to_kill(hp, damage_per_hit, attack_rate, hp_regen),
        }
    }
}
