//! Scenario files: a whole session described in TOML

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Session;
use crate::attack::AttackSection;
use crate::config::{self, CalcConstants, ConfigError};
use crate::expr::VariableTable;
use crate::hero::HeroInput;
use crate::modifier::ModifierPool;
use crate::sheet::DamageSheet;
use crate::spell::SpellSection;
use crate::target::TargetSection;

/// Where the hero, item and spell libraries live
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryPaths {
    /// Directory holding `*_library.json`; the working directory when unset
    pub dir: Option<PathBuf>,
}

fn default_columns() -> usize {
    1
}

fn default_heroes() -> Vec<HeroInput> {
    vec![HeroInput::default()]
}

/// On-disk shape of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_columns")]
    pub columns: usize,
    #[serde(default)]
    pub constants: CalcConstants,
    #[serde(default)]
    pub variables: VariableTable,
    #[serde(default)]
    pub modifiers: ModifierPool,
    #[serde(default)]
    pub attacks: AttackSection,
    #[serde(default)]
    pub targets: TargetSection,
    #[serde(default)]
    pub spells: SpellSection,
    #[serde(default)]
    pub sheet: DamageSheet,
    #[serde(default = "default_heroes")]
    pub heroes: Vec<HeroInput>,
    #[serde(default)]
    pub libraries: LibraryPaths,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            columns: default_columns(),
            constants: CalcConstants::default(),
            variables: VariableTable::default(),
            modifiers: ModifierPool::default(),
            attacks: AttackSection::default(),
            targets: TargetSection::default(),
            spells: SpellSection::default(),
            sheet: DamageSheet::default(),
            heroes: default_heroes(),
            libraries: LibraryPaths::default(),
        }
    }
}

impl Scenario {
    pub fn into_session(self) -> Result<Session, ConfigError> {
        self.constants.validate()?;
        let max = self.constants.columns.max_columns;
        if self.columns == 0 || self.columns > max {
            return Err(ConfigError::ValidationError(format!(
                "columns must be between 1 and {max}, got {}",
                self.columns
            )));
        }

        let mut attacks = self.attacks;
        attacks.truncate_columns(self.columns);
        let mut sheet = self.sheet;
        sheet.resize_columns(self.columns);

        Ok(Session {
            variables: self.variables,
            columns: self.columns,
            pool: self.modifiers,
            attacks,
            targets: self.targets,
            spells: self.spells,
            sheet,
            heroes: self.heroes,
            constants: self.constants,
            libraries: self.libraries,
        })
    }
}

impl Session {
    /// Load a scenario file; a relative library directory is taken from
    /// the scenario's own directory
    pub fn load(path: &Path) -> Result<Session, ConfigError> {
        let mut scenario: Scenario = config::load_toml(path)?;
        if let (Some(dir), Some(base)) = (&scenario.libraries.dir, path.parent()) {
            if dir.is_relative() {
                scenario.libraries.dir = Some(base.join(dir));
            }
        }
        let session = scenario.into_session()?;
        tracing::info!(path = %path.display(), columns = session.columns, "scenario loaded");
        Ok(session)
    }

    pub fn parse(content: &str) -> Result<Session, ConfigError> {
        config::parse_toml::<Scenario>(content)?.into_session()
    }
}
