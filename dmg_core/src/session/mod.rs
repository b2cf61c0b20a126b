//! Session - owns every section and runs the recompute pass
//!
//! A recompute is one synchronous sweep:
//! variables -> modifier snapshots -> attacks -> targets -> spells ->
//! sheet -> heroes. Nothing is cached between passes.

mod scenario;

pub use scenario::{LibraryPaths, Scenario};

use std::path::PathBuf;

use crate::attack::{AttackReport, AttackSection};
use crate::config::CalcConstants;
use crate::error::StructureError;
use crate::expr::{VariableIssue, VariableTable, Variables};
use crate::hero::{HeroInput, HeroSpell, HeroTotals, Item};
use crate::library::{Library, LibraryEntry, LibraryError};
use crate::modifier::{Modifier, ModifierPool};
use crate::sheet::{DamageSheet, SheetReport};
use crate::spell::{SpellReport, SpellSection};
use crate::target::{TargetInput, TargetReport, TargetSection};
use crate::types::{ModifierId, TargetId};

/// Everything one recompute pass produces
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub variables: Variables,
    pub variable_issues: Vec<VariableIssue>,
    pub attacks: AttackReport,
    pub targets: Vec<TargetReport>,
    pub spells: SpellReport,
    pub sheet: SheetReport,
    pub heroes: Vec<HeroTotals>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub variables: VariableTable,
    columns: usize,
    pub pool: ModifierPool,
    pub attacks: AttackSection,
    pub targets: TargetSection,
    pub spells: SpellSection,
    pub sheet: DamageSheet,
    pub heroes: Vec<HeroInput>,
    pub constants: CalcConstants,
    pub libraries: LibraryPaths,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(CalcConstants::default())
    }
}

impl Session {
    pub fn new(constants: CalcConstants) -> Self {
        Session {
            variables: VariableTable::new(),
            columns: 1,
            pool: ModifierPool::new(),
            attacks: AttackSection::default(),
            targets: TargetSection::default(),
            spells: SpellSection::default(),
            sheet: DamageSheet::default(),
            heroes: vec![HeroInput::default()],
            constants,
            libraries: LibraryPaths::default(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn add_column(&mut self) -> Result<usize, StructureError> {
        let max = self.constants.columns.max_columns;
        if self.columns >= max {
            tracing::warn!(max, "refused to add a column");
            return Err(StructureError::TooManyColumns(max));
        }
        self.columns += 1;
        self.sheet.resize_columns(self.columns);
        Ok(self.columns)
    }

    /// Drop the last column, along with any per-row switches for it
    pub fn remove_column(&mut self) -> Result<usize, StructureError> {
        if self.columns <= 1 {
            tracing::warn!("refused to remove the last column");
            return Err(StructureError::LastEntry("column"));
        }
        self.columns -= 1;
        self.attacks.truncate_columns(self.columns);
        self.sheet.resize_columns(self.columns);
        Ok(self.columns)
    }

    pub fn add_modifier(&mut self, modifier: Modifier) -> ModifierId {
        self.pool.add(modifier)
    }

    /// Delete a pool modifier and every selection that refers to it
    pub fn remove_modifier(&mut self, id: ModifierId) -> Result<Modifier, StructureError> {
        let removed = self
            .pool
            .remove(id)
            .ok_or(StructureError::UnknownModifier(id))?;
        self.attacks.prune_modifier(id);
        self.spells.prune_modifier(id);
        Ok(removed)
    }

    /// Delete a target and drop it from every spell's selection
    pub fn remove_target(&mut self, id: TargetId) -> Result<TargetInput, StructureError> {
        let removed = self.targets.remove(id)?;
        self.spells.prune_target(id);
        Ok(removed)
    }

    pub fn recompute(&self) -> Report {
        let (variables, variable_issues) = self.variables.resolve();
        let pool = self.pool.snapshot(&variables);

        let attacks = self
            .attacks
            .resolve(&variables, &pool, self.columns, &self.constants.attack);
        let targets = self.targets.resolve(&variables, &attacks.columns);
        let target_snapshots: Vec<_> = targets.iter().map(|t| t.target.clone()).collect();
        let spells = self.spells.resolve(&variables, &pool, &target_snapshots);
        let sheet = self.sheet.resolve(&variables);
        let heroes = self
            .heroes
            .iter()
            .map(|h| h.totals(&variables, &self.constants.hero))
            .collect();

        tracing::debug!(
            variables = variables.len(),
            issues = variable_issues.len(),
            modifiers = pool.len(),
            columns = self.columns,
            "recompute finished"
        );

        Report {
            variables,
            variable_issues,
            attacks,
            targets,
            spells,
            sheet,
            heroes,
        }
    }

    fn library_dir(&self) -> PathBuf {
        self.libraries
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn open_library<T: LibraryEntry>(&self) -> Result<Library<T>, LibraryError> {
        Library::open(self.library_dir())
    }

    pub fn hero_library(&self) -> Result<Library<HeroInput>, LibraryError> {
        self.open_library()
    }

    pub fn item_library(&self) -> Result<Library<Item>, LibraryError> {
        self.open_library()
    }

    pub fn spell_library(&self) -> Result<Library<HeroSpell>, LibraryError> {
        self.open_library()
    }
}
