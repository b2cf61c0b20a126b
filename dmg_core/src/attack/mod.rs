//! Auto-attack section
//!
//! Rows of attackers resolved into per-column damage, attack rate and the
//! side channels (magic, true strike, armor reduction) targets consume.

mod calculation;
mod row;
mod section;

pub use calculation::{
    attack_rate, damage_for_n_hits, damage_in_time, damage_per_hit, dps, time_for_n_hits,
};
pub use row::{simple_buckets, AttackRowInput, AttackRowValues, SimpleKind, SimpleModifier};
pub use section::{
    AttackReport, AttackRowReport, AttackSection, ColumnAttack, RangeTable, RowColumnResult,
};
