//! Hero lab: heroes, attached items, leveled spells and derived totals

mod item;
mod row;
mod source;
mod spell;
mod totals;

pub use item::{AttachedItem, Item, ItemFields};
pub use row::{HeroFields, HeroInput, HeroValues};
pub use source::{ItemSource, StatAccumulator, StatSource};
pub use spell::{HeroSpell, HeroSpellSummary, SpellLevel, DEFAULT_MAX_LEVEL, MAX_SPELL_LEVEL};
pub use totals::HeroTotals;
