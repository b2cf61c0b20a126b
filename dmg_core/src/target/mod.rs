//! Targets: HP, regen and defenses that attacks and spells are measured against

mod kill;
mod row;
mod section;

pub use kill::{hits_to_kill, time_to_kill, KillProjection};
pub use row::{DefenseMode, TargetInput, TargetSnapshot};
pub use section::{resolve_column, TargetColumnResult, TargetReport, TargetSection};
