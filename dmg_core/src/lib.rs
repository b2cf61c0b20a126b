//! dmg_core - Damage modelling engine for MOBA-style heroes
//!
//! This library provides:
//! - Expression fields: numeric inputs that may be arithmetic over variables
//! - Mitigation: armor curve, magic resistance, evasion and effective HP
//! - Modifiers: typed damage modifiers composed into per-hit chains
//! - Attacks, targets and spells resolved across comparison columns
//! - Hero totals aggregated from stats, items and modifiers
//! - JSON libraries of saved heroes, items and spells
//! - Session: one synchronous recompute over every section

pub mod attack;
pub mod config;
pub mod error;
pub mod expr;
pub mod hero;
pub mod library;
pub mod mitigation;
pub mod modifier;
pub mod prelude;
pub mod session;
pub mod sheet;
pub mod spell;
pub mod target;
pub mod types;

// Re-export core types for convenience
pub use attack::{AttackReport, AttackRowInput, AttackSection, ColumnAttack, SimpleModifier};
pub use config::{CalcConstants, ConfigError};
pub use error::StructureError;
pub use expr::{ExprError, VariableTable, Variables};
pub use hero::{AttachedItem, HeroInput, HeroSpell, HeroTotals, Item, StatSource};
pub use library::{Library, LibraryEntry, LibraryError};
pub use modifier::{
    HitModifier, Modifier, ModifierChain, ModifierKind, ModifierLookup, ModifierPool,
    ModifierSnapshot,
};
pub use session::{Report, Scenario, Session};
pub use sheet::{DamageSheet, SheetReport};
pub use spell::{SpellInput, SpellReport, SpellSection};
pub use target::{DefenseMode, KillProjection, TargetInput, TargetReport, TargetSection};
pub use types::{AttributeType, DamageType, ModifierId, TargetId};
