//! Auto-attack arithmetic

/// Attacks per second: `AS / (100 * BAT)`; 0 when BAT is not positive
pub fn attack_rate(attack_speed: f64, bat: f64) -> f64 {
    if bat <= 0.0 {
        return 0.0;
    }
    attack_speed / (100.0 * bat)
}

/// Two-bucket damage per hit
///
/// Flat values add to `base + bonus`, then every percentage (a fraction,
/// 0.25 for +25%) compounds on the result.
pub fn damage_per_hit(base: f64, bonus: f64, flats: &[f64], percents: &[f64]) -> f64 {
    let flat: f64 = flats.iter().sum();
    percents
        .iter()
        .fold(base + bonus + flat, |damage, pct| damage * (1.0 + pct))
}

pub fn damage_for_n_hits(damage_per_hit: f64, hits: u32) -> f64 {
    damage_per_hit * hits as f64
}

/// Seconds needed for `hits` attacks; infinite when nothing attacks
pub fn time_for_n_hits(hits: u32, attack_rate: f64) -> f64 {
    if attack_rate <= 0.0 {
        return f64::INFINITY;
    }
    hits as f64 / attack_rate
}

pub fn dps(damage_per_hit: f64, attack_rate: f64) -> f64 {
    damage_per_hit * attack_rate
}

pub fn damage_in_time(damage_per_hit: f64, attack_rate: f64, seconds: f64) -> f64 {
    damage_per_hit * attack_rate * seconds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_rate() {
        // 100 / (100 * 1.7)
        assert!((attack_rate(100.0, 1.7) - 0.588_235_294).abs() < 1e-6);
        assert!((attack_rate(200.0, 1.0) - 2.0).abs() < f64::EPSILON);
        assert_eq!(attack_rate(100.0, 0.0), 0.0);
        assert_eq!(attack_rate(100.0, -1.0), 0.0);
    }

    #[test]
    fn test_two_bucket_damage() {
        // (50 + 10 + 20) * 1.25 * 1.1 = 110
        let dph = damage_per_hit(50.0, 10.0, &[20.0], &[0.25, 0.1]);
        assert!((dph - 110.0).abs() < 1e-9);

        assert!((damage_per_hit(40.0, 0.0, &[], &[]) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_time_and_dps() {
        assert!((time_for_n_hits(4, 2.0) - 2.0).abs() < f64::EPSILON);
        assert!(time_for_n_hits(4, 0.0).is_infinite());
        assert!((dps(50.0, 2.0) - 100.0).abs() < f64::EPSILON);
        assert!((damage_in_time(50.0, 2.0, 3.0) - 300.0).abs() < f64::EPSILON);
        assert!((damage_for_n_hits(12.5, 4) - 50.0).abs() < f64::EPSILON);
    }
}
