//! Mitigation math: armor curve, magic resistance, evasion and true strike

mod armor;
mod evasion;
mod resistance;

pub use armor::{
    apply_armor, armor_to_reduction, armor_to_reduction_percent, eval_armor_expression,
    eval_reduction_expression, reduction_to_armor, ArmorReading,
};
pub use evasion::{combine_true_strike, combine_with_evasion, effective_hp, hit_chance};
pub use resistance::{apply_magic_resistance, clamp_percent, stack_magic_resistance};

/// Mitigation constants
pub mod constants {
    /// Armor curve factor: reduction = f·a / (1 + f·|a|)
    pub const ARMOR_FACTOR: f64 = 0.06;
    /// Armor reported for a reduction of 100% or more
    pub const MAX_ARMOR_SENTINEL: f64 = 999.0;
}
