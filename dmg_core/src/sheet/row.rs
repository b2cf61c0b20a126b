//! One damage line on the sheet

use crate::expr::{self, Variables};
use crate::types::ColumnFlags;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowMode {
    /// The damage is a single hit
    #[default]
    Basic,
    /// The damage repeats at `AS / (100 * BAT)` per second
    Dps,
}

impl RowMode {
    pub fn toggled(self) -> Self {
        match self {
            RowMode::Basic => RowMode::Dps,
            RowMode::Dps => RowMode::Basic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetRow {
    pub enabled: bool,
    pub mode: RowMode,
    pub damage: String,
    pub attack_speed: String,
    pub bat: String,
    pub columns: ColumnFlags,
}

impl Default for SheetRow {
    fn default() -> Self {
        SheetRow {
            enabled: true,
            mode: RowMode::Basic,
            damage: "0".to_string(),
            attack_speed: "100".to_string(),
            bat: "1.7".to_string(),
            columns: ColumnFlags::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowCell {
    Value(f64),
    /// The column is switched off for this row
    Off,
}

impl RowCell {
    pub fn value(&self) -> f64 {
        match self {
            RowCell::Value(v) => *v,
            RowCell::Off => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRowResult {
    pub enabled: bool,
    pub mode: RowMode,
    /// `None` when the damage field does not evaluate
    pub damage: Option<f64>,
    /// Repeats per second; 1 in basic mode
    pub rate: f64,
    pub cells: Vec<RowCell>,
}

impl SheetRowResult {
    pub fn is_invalid(&self) -> bool {
        self.enabled && self.damage.is_none()
    }

    /// Contribution of this row to each column total
    pub fn contributions(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().map(|c| c.value())
    }
}

impl SheetRow {
    /// Repeats per second in DPS mode, 1 when either field is unusable
    pub fn rate(&self, vars: &Variables) -> f64 {
        if self.mode == RowMode::Basic {
            return 1.0;
        }
        match (
            expr::try_eval(&self.attack_speed, vars),
            expr::try_eval(&self.bat, vars),
        ) {
            (Some(attack_speed), Some(bat)) if bat > 0.0 => attack_speed / (100.0 * bat),
            _ => 1.0,
        }
    }

    /// Damage after each column's reduction percentage
    pub fn resolve(&self, vars: &Variables, reductions: &[f64]) -> SheetRowResult {
        if !self.enabled {
            return SheetRowResult {
                enabled: false,
                mode: self.mode,
                damage: None,
                rate: 1.0,
                cells: vec![RowCell::Off; reductions.len()],
            };
        }

        let damage = expr::try_eval(&self.damage, vars);
        let rate = self.rate(vars);
        let cells = reductions
            .iter()
            .enumerate()
            .map(|(i, reduction)| match damage {
                Some(d) if self.columns.is_enabled(i) => {
                    RowCell::Value(d * (1.0 - reduction / 100.0) * rate)
                }
                Some(_) => RowCell::Off,
                None => RowCell::Value(0.0),
            })
            .collect();

        SheetRowResult {
            enabled: true,
            mode: self.mode,
            damage,
            rate,
            cells,
        }
    }
}
