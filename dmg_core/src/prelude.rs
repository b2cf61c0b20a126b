//! Prelude module for convenient imports
//!
//! ```rust
//! use dmg_core::prelude::*;
//! ```

// Core types
pub use crate::types::{AttributeType, ColumnFlags, DamageType, ModifierId, TargetId};
pub use crate::expr::{VariableTable, Variables};

// Modifiers
pub use crate::modifier::{HitModifier, Modifier, ModifierKind, ModifierLookup, ModifierPool};

// Sections
pub use crate::attack::{AttackRowInput, AttackSection, SimpleModifier};
pub use crate::sheet::{DamageSheet, RowMode, SheetRow};
pub use crate::spell::{SpellInput, SpellSection};
pub use crate::target::{DefenseMode, TargetInput, TargetSection};

// Heroes
pub use crate::hero::{AttachedItem, HeroInput, HeroSpell, Item, StatSource};

// Session
pub use crate::config::CalcConstants;
pub use crate::library::{Library, LibraryEntry};
pub use crate::session::{Report, Session};
