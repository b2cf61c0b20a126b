//! Armor - physical damage reduction on a hyperbolic curve
//!
//! `reduction = 0.06·armor / (1 + 0.06·|armor|)`
//!
//! Negative armor yields a negative reduction, so damage taken grows but
//! never reaches double.

use super::constants::{ARMOR_FACTOR, MAX_ARMOR_SENTINEL};
use crate::expr::{self, Variables};

/// Physical reduction fraction for an armor value
pub fn armor_to_reduction(armor: f64) -> f64 {
    (ARMOR_FACTOR * armor) / (1.0 + ARMOR_FACTOR * armor.abs())
}

/// Physical reduction as a percentage
pub fn armor_to_reduction_percent(armor: f64) -> f64 {
    armor_to_reduction(armor) * 100.0
}

/// Armor needed for a reduction percentage
///
/// At 100% or above the curve has no finite inverse; the sentinel is
/// returned instead.
pub fn reduction_to_armor(reduction_pct: f64) -> f64 {
    if reduction_pct >= 100.0 {
        return MAX_ARMOR_SENTINEL;
    }
    // Solving r = f·a / (1 + f·a) for a:
    // r + r·f·a = f·a
    // a = r / (f·(1 - r)), with r as a percentage: a = R / (f·(100 - R))
    reduction_pct / (ARMOR_FACTOR * (100.0 - reduction_pct))
}

/// Damage left after armor
pub fn apply_armor(damage: f64, armor: f64) -> f64 {
    damage * (1.0 - armor_to_reduction(armor))
}

/// Result of reading an armor field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmorReading {
    /// Physical reduction in percent (unclamped)
    pub reduction_pct: f64,
    /// The armor value, when the field maps back to one
    pub armor: Option<f64>,
    pub valid: bool,
}

impl ArmorReading {
    fn from_armor(armor: f64) -> Self {
        ArmorReading {
            reduction_pct: armor_to_reduction_percent(armor),
            armor: Some(armor),
            valid: true,
        }
    }

    fn invalid() -> Self {
        ArmorReading {
            reduction_pct: 0.0,
            armor: Some(0.0),
            valid: false,
        }
    }
}

/// Evaluate an armor field where a trailing `* k` or `/ k` scales reduction
///
/// Addition and subtraction operate on armor (`10 + 5` is 15 armor), while
/// a trailing multiplier or divisor applies to the reduction of the
/// left-hand armor (`10 * 2` doubles the reduction of 10 armor). A scaled
/// reading has no single armor value.
pub fn eval_armor_expression(text: &str, vars: &Variables) -> ArmorReading {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ArmorReading::from_armor(0.0);
    }

    if let Ok(armor) = trimmed.parse::<f64>() {
        if armor.is_finite() {
            return ArmorReading::from_armor(armor);
        }
    }

    if let Some((left, factor)) = split_trailing(trimmed, '*') {
        if let Ok(left_armor) = expr::evaluate_with(left, vars) {
            return ArmorReading {
                reduction_pct: armor_to_reduction_percent(left_armor) * factor,
                armor: None,
                valid: true,
            };
        }
    }

    if let Some((left, divisor)) = split_trailing(trimmed, '/') {
        if divisor != 0.0 {
            if let Ok(left_armor) = expr::evaluate_with(left, vars) {
                return ArmorReading {
                    reduction_pct: armor_to_reduction_percent(left_armor) / divisor,
                    armor: None,
                    valid: true,
                };
            }
        }
    }

    match expr::evaluate_with(trimmed, vars) {
        Ok(armor) => ArmorReading::from_armor(armor),
        Err(err) => {
            tracing::debug!(input = text, error = %err, "armor expression rejected");
            ArmorReading::invalid()
        }
    }
}

/// Evaluate a reduction percentage field, 0 on failure
pub fn eval_reduction_expression(text: &str, vars: &Variables) -> f64 {
    expr::eval_or(text, vars, 0.0)
}

/// Split `left <op> literal` at the last `op`, where literal is digits and dots
fn split_trailing(text: &str, op: char) -> Option<(&str, f64)> {
    let idx = text.rfind(op)?;
    let left = text[..idx].trim();
    let right = text[idx + op.len_utf8()..].trim();
    if left.is_empty() || right.is_empty() {
        return None;
    }
    if !right.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    right.parse::<f64>().ok().map(|value| (left, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_armor() {
        assert!((armor_to_reduction(0.0) - 0.0).abs() < f64::EPSILON);
        assert!((apply_armor(100.0, 0.0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_known_values() {
        // 10 armor: 0.6 / 1.6 = 37.5%
        assert!((armor_to_reduction_percent(10.0) - 37.5).abs() < 1e-9);
        // 5 armor: 0.3 / 1.3 = 23.08%
        assert!((armor_to_reduction_percent(5.0) - 23.0769).abs() < 0.001);
    }

    #[test]
    fn test_negative_armor_amplifies_but_is_bounded() {
        // -10 armor: -0.6 / 1.6 = -37.5% reduction => 137.5 damage
        let taken = apply_armor(100.0, -10.0);
        assert!((taken - 137.5).abs() < 1e-9);

        let extreme = apply_armor(100.0, -1_000_000.0);
        assert!(extreme < 200.0);
        assert!(extreme > 199.0);
    }

    #[test]
    fn test_reduction_sentinel() {
        assert!((reduction_to_armor(100.0) - MAX_ARMOR_SENTINEL).abs() < f64::EPSILON);
        assert!((reduction_to_armor(150.0) - MAX_ARMOR_SENTINEL).abs() < f64::EPSILON);
        assert!(reduction_to_armor(99.999).is_finite());
    }

    #[test]
    fn test_round_trip_examples() {
        for r in [0.0, 12.5, 37.5, 50.0, 90.0, 99.0] {
            let back = armor_to_reduction_percent(reduction_to_armor(r));
            assert!((back - r).abs() < 1e-9, "round trip failed for {r}");
        }
    }

    #[test]
    fn test_armor_expression_plain_and_sum() {
        let vars = Variables::new();
        let plain = eval_armor_expression("10", &vars);
        assert_eq!(plain.armor, Some(10.0));
        assert!((plain.reduction_pct - 37.5).abs() < 1e-9);

        let sum = eval_armor_expression("4 + 6", &vars);
        assert_eq!(sum.armor, Some(10.0));
        assert!((sum.reduction_pct - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_armor_expression_scales_reduction() {
        let vars = Variables::new();
        let doubled = eval_armor_expression("10 * 2", &vars);
        assert_eq!(doubled.armor, None);
        assert!((doubled.reduction_pct - 75.0).abs() < 1e-9);

        let halved = eval_armor_expression("10 / 2", &vars);
        assert!((halved.reduction_pct - 18.75).abs() < 1e-9);
    }

    #[test]
    fn test_armor_expression_invalid() {
        let vars = Variables::new();
        let bad = eval_armor_expression("ten", &vars);
        assert!(!bad.valid);
        assert!((bad.reduction_pct - 0.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_armor_round_trip(armor in 0.0f64..500.0) {
            let back = reduction_to_armor(armor_to_reduction_percent(armor));
            prop_assert!((back - armor).abs() <= 1e-6 * armor.max(1.0));
        }

        #[test]
        fn prop_reduction_round_trip(r in 0.0f64..100.0) {
            let back = armor_to_reduction_percent(reduction_to_armor(r));
            prop_assert!((back - r).abs() <= 1e-9 * r.max(1.0));
        }

        #[test]
        fn prop_reduction_below_one(armor in -10_000.0f64..10_000.0) {
            let r = armor_to_reduction(armor);
            prop_assert!(r > -1.0 && r < 1.0);
        }
    }
}
