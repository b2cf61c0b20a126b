//! Damage sheet: quick per-type damage totals against comparison columns
//!
//! Physical rows are reduced by each column's armor, magic rows by its
//! magic reduction, and pure rows are never reduced.

mod row;

pub use row::{RowCell, RowMode, SheetRow, SheetRowResult};

use crate::error::{remove_keeping_one, StructureError};
use crate::expr::{self, Variables};
use crate::mitigation::{
    clamp_percent, eval_armor_expression, eval_reduction_expression, reduction_to_armor,
};
use crate::target::DefenseMode;
use crate::types::DamageType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetColumn {
    /// Armor or physical reduction, depending on the sheet's mode
    pub physical: String,
    /// Magic reduction in percent
    pub magic: String,
    /// Optional; blank hides the remaining HP
    pub hp: String,
}

impl Default for SheetColumn {
    fn default() -> Self {
        SheetColumn {
            physical: "0".to_string(),
            magic: "0".to_string(),
            hp: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageSheet {
    pub physical_mode: DefenseMode,
    pub columns: Vec<SheetColumn>,
    pub physical: Vec<SheetRow>,
    pub magic: Vec<SheetRow>,
    pub pure: Vec<SheetRow>,
}

impl Default for DamageSheet {
    fn default() -> Self {
        DamageSheet {
            physical_mode: DefenseMode::Armor,
            columns: vec![SheetColumn::default()],
            physical: vec![SheetRow::default()],
            magic: vec![SheetRow::default()],
            pure: vec![SheetRow::default()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetColumnTotals {
    /// Percentages, clamped to 0..100
    pub physical_reduction: f64,
    pub magic_reduction: f64,
    pub physical: f64,
    pub magic: f64,
    pub pure: f64,
    pub total: f64,
    /// `hp - total` when the column has a usable HP
    pub remaining_hp: Option<f64>,
    pub dead: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetReport {
    pub physical: Vec<SheetRowResult>,
    pub magic: Vec<SheetRowResult>,
    pub pure: Vec<SheetRowResult>,
    pub columns: Vec<SheetColumnTotals>,
}

impl DamageSheet {
    fn rows_mut(&mut self, damage_type: DamageType) -> &mut Vec<SheetRow> {
        match damage_type {
            DamageType::Physical => &mut self.physical,
            DamageType::Magic => &mut self.magic,
            DamageType::Pure => &mut self.pure,
        }
    }

    pub fn add_row(&mut self, damage_type: DamageType) -> usize {
        let rows = self.rows_mut(damage_type);
        rows.push(SheetRow::default());
        rows.len() - 1
    }

    pub fn remove_row(
        &mut self,
        damage_type: DamageType,
        index: usize,
    ) -> Result<SheetRow, StructureError> {
        let kind = match damage_type {
            DamageType::Physical => "physical row",
            DamageType::Magic => "magic row",
            DamageType::Pure => "pure row",
        };
        remove_keeping_one(self.rows_mut(damage_type), index, kind)
    }

    /// Grow or shrink to `count` columns; new columns take defaults
    pub fn resize_columns(&mut self, count: usize) {
        self.columns.resize_with(count.max(1), SheetColumn::default);
        for row in self.physical.iter_mut().chain(self.magic.iter_mut()) {
            row.columns.truncate(self.columns.len());
        }
    }

    /// Switch how physical fields are read, converting every column
    pub fn set_physical_mode(&mut self, mode: DefenseMode, vars: &Variables) {
        if mode == self.physical_mode {
            return;
        }
        for column in &mut self.columns {
            let converted = match mode {
                DefenseMode::Armor => {
                    reduction_to_armor(eval_reduction_expression(&column.physical, vars))
                }
                DefenseMode::Reduction => {
                    eval_armor_expression(&column.physical, vars).reduction_pct
                }
            };
            column.physical = format!("{converted:.1}");
        }
        self.physical_mode = mode;
    }

    fn physical_reduction(&self, column: &SheetColumn, vars: &Variables) -> f64 {
        let text = if column.physical.trim().is_empty() {
            "0"
        } else {
            &column.physical
        };
        let reduction = match self.physical_mode {
            DefenseMode::Armor => eval_armor_expression(text, vars).reduction_pct,
            DefenseMode::Reduction => eval_reduction_expression(text, vars),
        };
        clamp_percent(reduction)
    }

    pub fn resolve(&self, vars: &Variables) -> SheetReport {
        let physical_reductions: Vec<f64> = self
            .columns
            .iter()
            .map(|c| self.physical_reduction(c, vars))
            .collect();
        let magic_reductions: Vec<f64> = self
            .columns
            .iter()
            .map(|c| clamp_percent(eval_reduction_expression(&c.magic, vars)))
            .collect();

        let physical: Vec<SheetRowResult> = self
            .physical
            .iter()
            .map(|r| r.resolve(vars, &physical_reductions))
            .collect();
        let magic: Vec<SheetRowResult> = self
            .magic
            .iter()
            .map(|r| r.resolve(vars, &magic_reductions))
            .collect();
        let pure: Vec<SheetRowResult> = self.pure.iter().map(|r| r.resolve(vars, &[0.0])).collect();

        let column_sum = |rows: &[SheetRowResult], col: usize| -> f64 {
            rows.iter()
                .filter_map(|r| r.cells.get(col))
                .map(|c| c.value())
                .sum()
        };
        let pure_total = column_sum(&pure, 0);

        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let physical_total = column_sum(&physical, i);
                let magic_total = column_sum(&magic, i);
                let total = physical_total + magic_total + pure_total;
                let remaining_hp = if column.hp.trim().is_empty() {
                    None
                } else {
                    expr::try_eval(&column.hp, vars).map(|hp| hp - total)
                };
                SheetColumnTotals {
                    physical_reduction: physical_reductions[i],
                    magic_reduction: magic_reductions[i],
                    physical: physical_total,
                    magic: magic_total,
                    pure: pure_total,
                    total,
                    remaining_hp,
                    dead: remaining_hp.is_some_and(|hp| hp < 0.0),
                }
            })
            .collect();

        tracing::debug!(columns = self.columns.len(), "damage sheet resolved");
        SheetReport {
            physical,
            magic,
            pure,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn damage_row(damage: &str) -> SheetRow {
        SheetRow {
            damage: damage.to_string(),
            ..Default::default()
        }
    }

    fn sheet() -> DamageSheet {
        DamageSheet {
            physical_mode: DefenseMode::Reduction,
            columns: vec![
                SheetColumn {
                    physical: "50".to_string(),
                    magic: "25".to_string(),
                    hp: "500".to_string(),
                },
                SheetColumn {
                    physical: "150".to_string(),
                    magic: "-10".to_string(),
                    hp: String::new(),
                },
            ],
            physical: vec![damage_row("200"), damage_row("100")],
            magic: vec![damage_row("100")],
            pure: vec![damage_row("50")],
        }
    }

    #[test]
    fn test_totals_per_column() {
        let report = sheet().resolve(&Variables::new());
        let first = &report.columns[0];

        // (200 + 100) * 0.5
        assert!((first.physical - 150.0).abs() < 1e-9);
        assert!((first.magic - 75.0).abs() < 1e-9);
        assert!((first.pure - 50.0).abs() < 1e-9);
        assert!((first.total - 275.0).abs() < 1e-9);
        assert_eq!(first.remaining_hp, Some(225.0));
        assert!(!first.dead);

        // Reductions clamp to 0..100
        let second = &report.columns[1];
        assert_eq!(second.physical, 0.0);
        assert!((second.magic - 100.0).abs() < 1e-9);
        assert_eq!(second.remaining_hp, None);
    }

    #[test]
    fn test_dead_flag() {
        let mut s = sheet();
        s.columns[0].hp = "100".to_string();
        let report = s.resolve(&Variables::new());
        assert_eq!(report.columns[0].remaining_hp, Some(-175.0));
        assert!(report.columns[0].dead);
    }

    #[test]
    fn test_armor_mode_reads_armor() {
        let mut s = DamageSheet::default();
        s.columns[0].physical = "10".to_string();
        s.physical[0].damage = "100".to_string();
        let report = s.resolve(&Variables::new());
        // 10 armor: 0.6 / 1.6 = 37.5%
        assert!((report.columns[0].physical_reduction - 37.5).abs() < 1e-9);
        assert!((report.columns[0].physical - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_mode_switch_converts_fields() {
        let vars = Variables::new();
        let mut s = DamageSheet::default();
        s.columns[0].physical = "10".to_string();
        s.set_physical_mode(DefenseMode::Reduction, &vars);
        assert_eq!(s.columns[0].physical, "37.5");
        s.set_physical_mode(DefenseMode::Armor, &vars);
        assert_eq!(s.columns[0].physical, "10.0");
    }

    #[test]
    fn test_last_row_is_kept() {
        let mut s = DamageSheet::default();
        assert_eq!(
            s.remove_row(DamageType::Pure, 0),
            Err(StructureError::LastEntry("pure row"))
        );
        s.add_row(DamageType::Pure);
        assert!(s.remove_row(DamageType::Pure, 0).is_ok());
    }

    #[test]
    fn test_resize_columns() {
        let mut s = DamageSheet::default();
        s.physical[0].columns.set(3, false);
        s.resize_columns(3);
        assert_eq!(s.columns.len(), 3);
        assert_eq!(s.physical[0].columns.0.len(), 3);
        s.resize_columns(0);
        assert_eq!(s.columns.len(), 1);
    }

    #[test]
    fn test_invalid_row_contributes_nothing() {
        let mut s = sheet();
        s.magic[0].damage = "1 +".to_string();
        let report = s.resolve(&Variables::new());
        assert!(report.magic[0].is_invalid());
        assert_eq!(report.columns[0].magic, 0.0);
    }
}
