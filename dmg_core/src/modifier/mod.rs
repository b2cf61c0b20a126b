//! Modifier engine
//!
//! A modifier transforms physical damage per hit and may independently emit
//! magic damage, pierce evasion (true strike) or strip target armor. Rows
//! hold an ordered selection of modifiers; [`ModifierChain`] applies them in
//! that order.

mod chain;
mod effect;
mod kind;
mod params;
mod pool;
mod record;
mod stats;

pub use chain::{ChainResult, HitProfile, ModifierChain};
pub use effect::{Effect, ModifierSnapshot};
pub use kind::{available_types, ModifierKind, REGISTRY};
pub use params::{FieldValue, Modifier, ModifierParams, StatBonusParams, STAT_BONUS_FIELDS};
pub use pool::{ModifierLookup, ModifierPool, PoolSnapshot};
pub use record::{lenient, modifiers_from_records, ModifierRecord, RecordError, RecordValue};
pub use stats::StatBonuses;

/// Per-hit damage transform with optional side channels
///
/// `base_dph` is the damage per hit before this modifier. The side-channel
/// methods default to contributing nothing.
pub trait HitModifier {
    /// Physical damage of hit `hit` (1-indexed)
    fn damage_for_hit(&self, hit: u32, base_dph: f64) -> f64;

    /// Physical damage over hits `1..=hits`; agrees with summing
    /// [`damage_for_hit`](HitModifier::damage_for_hit)
    fn total_damage_for_hits(&self, hits: u32, base_dph: f64) -> f64;

    /// Map an affine per-hit profile through this modifier
    fn transform(&self, profile: HitProfile) -> HitProfile;

    /// Magic emitted on hit `hit`, given that hit's physical damage
    fn magic_damage_for_hit(&self, _hit: u32, _physical: f64) -> f64 {
        0.0
    }

    /// Magic emitted over `hits` hits, given their total physical damage
    fn total_magic_damage_for_hits(&self, _hits: u32, _total_physical: f64) -> f64 {
        0.0
    }

    /// Chance (0..1) to ignore target evasion
    fn true_strike_chance(&self) -> f64 {
        0.0
    }

    /// Armor removed from the target
    fn armor_reduction(&self) -> f64 {
        0.0
    }
}
