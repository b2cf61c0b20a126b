//! Spells: bursts of typed damage with cast time, cooldown and mana cost

mod calculation;
mod row;
mod section;

pub use calculation::{burst_damage, mana_efficiency, spell_dps};
pub use row::{SpellInput, SpellValues};
pub use section::{SpellReport, SpellSection, SpellSummary, SpellTargetResult};
