//! Attack section resolution
//!
//! Each row's damage per hit is first built two-bucket from the section's
//! simple modifiers, then pushed through the row's modifier chain. Rows are
//! summed per comparison column into a [`ColumnAttack`] that feeds targets.

use crate::config::AttackConstants;
use crate::error::{remove_keeping_one, StructureError};
use crate::expr::Variables;
use crate::mitigation::combine_true_strike;
use crate::modifier::{ChainResult, ModifierLookup};
use crate::types::ModifierId;
use serde::{Deserialize, Serialize};

use super::calculation;
use super::row::{simple_buckets, AttackRowInput, AttackRowValues, SimpleModifier};

/// Attack rows plus the simple modifiers shared by all of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackSection {
    pub rows: Vec<AttackRowInput>,
    pub simple_modifiers: Vec<SimpleModifier>,
}

impl Default for AttackSection {
    fn default() -> Self {
        AttackSection {
            rows: vec![AttackRowInput::default()],
            simple_modifiers: Vec::new(),
        }
    }
}

/// One row's outcome in one column
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RowColumnResult {
    pub damage_per_hit: f64,
    pub total_damage: f64,
    pub magic_per_hit: f64,
    pub magic_total: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackRowReport {
    pub label: String,
    pub enabled: bool,
    pub values: AttackRowValues,
    /// Damage per hit after the simple modifiers, before the chain
    pub base_damage_per_hit: f64,
    pub chain: ChainResult,
    pub columns: Vec<RowColumnResult>,
}

/// Everything targets need from the attacks of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnAttack {
    pub damage_per_hit: f64,
    pub total_damage: f64,
    pub magic_per_hit: f64,
    pub magic_total: f64,
    /// Mean attack rate of contributing rows
    pub rate: f64,
    pub true_strike: f64,
    pub armor_reduction: f64,
}

impl Default for ColumnAttack {
    fn default() -> Self {
        ColumnAttack {
            damage_per_hit: 0.0,
            total_damage: 0.0,
            magic_per_hit: 0.0,
            magic_total: 0.0,
            rate: 1.0,
            true_strike: 0.0,
            armor_reduction: 0.0,
        }
    }
}

/// Damage and timing projections over `1..=n` hits or seconds
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeTable {
    pub damage_for_hits: Vec<f64>,
    pub time_for_hits: Vec<f64>,
    pub dps: f64,
    pub damage_in_time: Vec<f64>,
}

impl RangeTable {
    pub fn build(column: &ColumnAttack, size: u32) -> Self {
        let steps = 1..=size;
        RangeTable {
            damage_for_hits: steps
                .clone()
                .map(|n| calculation::damage_for_n_hits(column.damage_per_hit, n))
                .collect(),
            time_for_hits: steps
                .clone()
                .map(|n| calculation::time_for_n_hits(n, column.rate))
                .collect(),
            dps: calculation::dps(column.damage_per_hit, column.rate),
            damage_in_time: steps
                .map(|n| calculation::damage_in_time(column.damage_per_hit, column.rate, n as f64))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttackReport {
    pub rows: Vec<AttackRowReport>,
    pub columns: Vec<ColumnAttack>,
    pub ranges: Vec<RangeTable>,
}

impl AttackSection {
    pub fn add_row(&mut self) -> usize {
        let label = format!("Attack {}", self.rows.len() + 1);
        self.rows.push(AttackRowInput::with_label(label));
        self.rows.len() - 1
    }

    pub fn remove_row(&mut self, index: usize) -> Result<AttackRowInput, StructureError> {
        remove_keeping_one(&mut self.rows, index, "attack row")
    }

    pub fn add_simple_modifier(&mut self, modifier: SimpleModifier) {
        self.simple_modifiers.push(modifier);
    }

    pub fn remove_simple_modifier(&mut self, index: usize) -> Result<SimpleModifier, StructureError> {
        if index >= self.simple_modifiers.len() {
            return Err(StructureError::UnknownRow {
                kind: "simple modifier",
                index,
            });
        }
        Ok(self.simple_modifiers.remove(index))
    }

    /// Drop a deleted pool modifier from every row's chain
    pub fn prune_modifier(&mut self, id: ModifierId) {
        for row in &mut self.rows {
            row.modifiers.retain(|m| *m != id);
        }
    }

    pub fn truncate_columns(&mut self, columns: usize) {
        for row in &mut self.rows {
            row.columns.truncate(columns);
        }
    }

    pub fn resolve(
        &self,
        vars: &Variables,
        lookup: &impl ModifierLookup,
        columns: usize,
        constants: &AttackConstants,
    ) -> AttackReport {
        let (flats, percents) = simple_buckets(&self.simple_modifiers, vars);

        let rows: Vec<AttackRowReport> = self
            .rows
            .iter()
            .map(|row| resolve_row(row, vars, lookup, columns, constants, &flats, &percents))
            .collect();

        let columns: Vec<ColumnAttack> = (0..columns)
            .map(|col| aggregate_column(&self.rows, &rows, col))
            .collect();

        let ranges = columns
            .iter()
            .map(|c| RangeTable::build(c, constants.range_size))
            .collect();

        tracing::debug!(rows = rows.len(), columns = columns.len(), "attack section resolved");

        AttackReport {
            rows,
            columns,
            ranges,
        }
    }
}

fn resolve_row(
    row: &AttackRowInput,
    vars: &Variables,
    lookup: &impl ModifierLookup,
    columns: usize,
    constants: &AttackConstants,
    flats: &[f64],
    percents: &[f64],
) -> AttackRowReport {
    let values = row.evaluate(vars, constants);
    let base_dph = calculation::damage_per_hit(values.base, values.bonus, flats, percents);

    let chain = lookup.chain(&row.modifiers);
    let result = if chain.is_empty() {
        ChainResult {
            damage_per_hit: base_dph,
            total_damage: calculation::damage_for_n_hits(base_dph, values.hits),
            ..Default::default()
        }
    } else {
        chain.resolve(values.hits, base_dph)
    };

    let per_column = RowColumnResult {
        damage_per_hit: result.damage_per_hit,
        total_damage: result.total_damage,
        magic_per_hit: result.magic_per_hit,
        magic_total: result.magic_total,
        rate: values.rate,
    };
    let columns = (0..columns)
        .map(|col| {
            if row.enabled && row.columns.is_enabled(col) {
                per_column
            } else {
                RowColumnResult::default()
            }
        })
        .collect();

    AttackRowReport {
        label: row.label.clone(),
        enabled: row.enabled,
        values,
        base_damage_per_hit: base_dph,
        chain: result,
        columns,
    }
}

fn aggregate_column(
    inputs: &[AttackRowInput],
    rows: &[AttackRowReport],
    col: usize,
) -> ColumnAttack {
    let mut column = ColumnAttack {
        rate: 0.0,
        ..Default::default()
    };
    let mut rates = Vec::new();
    let mut chances = Vec::new();

    for (input, report) in inputs.iter().zip(rows) {
        if !(input.enabled && input.columns.is_enabled(col)) {
            continue;
        }
        let r = report.columns[col];
        column.damage_per_hit += r.damage_per_hit;
        column.total_damage += r.total_damage;
        column.magic_per_hit += r.magic_per_hit;
        column.magic_total += r.magic_total;
        if r.rate > 0.0 {
            rates.push(r.rate);
        }
        chances.push(report.chain.true_strike);
        column.armor_reduction += report.chain.armor_reduction;
    }

    column.rate = if rates.is_empty() {
        1.0
    } else {
        rates.iter().sum::<f64>() / rates.len() as f64
    };
    column.true_strike = combine_true_strike(chances);
    column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{Modifier, ModifierKind, ModifierPool};

    fn row(base: &str, attack_speed: &str) -> AttackRowInput {
        AttackRowInput {
            base: base.to_string(),
            attack_speed: attack_speed.to_string(),
            bat: "1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_simple_modifiers_apply_to_every_row() {
        let mut section = AttackSection {
            rows: vec![row("50", "100"), row("30", "100")],
            simple_modifiers: vec![
                SimpleModifier::flat("Blade", "10"),
                SimpleModifier::percent("Rage", "50"),
            ],
        };
        section.rows[1].bonus = "10".to_string();

        let pool = ModifierPool::new();
        let vars = Variables::new();
        let report = section.resolve(&vars, &pool.snapshot(&vars), 2, &AttackConstants::default());

        // (50 + 10) * 1.5 = 90 ; (30 + 10 + 10) * 1.5 = 75
        assert!((report.rows[0].columns[0].damage_per_hit - 90.0).abs() < 1e-9);
        assert!((report.rows[1].columns[0].damage_per_hit - 75.0).abs() < 1e-9);
        assert!((report.columns[0].damage_per_hit - 165.0).abs() < 1e-9);
        assert!((report.columns[1].damage_per_hit - 165.0).abs() < 1e-9);
    }

    #[test]
    fn test_disabled_row_and_column_contribute_nothing() {
        let mut section = AttackSection {
            rows: vec![row("50", "100"), row("40", "200")],
            simple_modifiers: Vec::new(),
        };
        section.rows[0].columns.set(1, false);
        section.rows[1].enabled = false;

        let pool = ModifierPool::new();
        let vars = Variables::new();
        let report = section.resolve(&vars, &pool.snapshot(&vars), 2, &AttackConstants::default());

        assert!((report.columns[0].damage_per_hit - 50.0).abs() < f64::EPSILON);
        assert!((report.columns[0].rate - 1.0).abs() < f64::EPSILON);
        assert_eq!(report.columns[1].damage_per_hit, 0.0);
        // no contributing rows: rate falls back to 1
        assert!((report.columns[1].rate - 1.0).abs() < f64::EPSILON);
        assert_eq!(report.rows[1].columns[0], RowColumnResult::default());
    }

    #[test]
    fn test_rate_is_averaged() {
        let section = AttackSection {
            rows: vec![row("10", "100"), row("10", "300")],
            simple_modifiers: Vec::new(),
        };
        let pool = ModifierPool::new();
        let vars = Variables::new();
        let report = section.resolve(&vars, &pool.snapshot(&vars), 1, &AttackConstants::default());

        // (1 + 3) / 2
        assert!((report.columns[0].rate - 2.0).abs() < f64::EPSILON);
        let table = &report.ranges[0];
        assert_eq!(table.damage_for_hits.len(), 10);
        assert!((table.dps - 40.0).abs() < f64::EPSILON);
        assert!((table.time_for_hits[3] - 2.0).abs() < f64::EPSILON);
        assert!((table.damage_in_time[2] - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_chain_and_side_channels() {
        let mut pool = ModifierPool::new();
        let fury = pool.add(Modifier::new(ModifierKind::FurySwipes).with_field("damage_var", "10"));
        let corruption = pool.add(Modifier::new(ModifierKind::Corruption));
        let strike = pool.add(Modifier::new(ModifierKind::TrueStrike).with_field("chance_var", "50"));

        let mut first = row("100", "100");
        first.hits = "3".to_string();
        first.modifiers = vec![fury, corruption];
        let mut second = row("0", "100");
        second.modifiers = vec![strike];

        let section = AttackSection {
            rows: vec![first, second],
            simple_modifiers: Vec::new(),
        };
        let vars = Variables::new();
        let report = section.resolve(&vars, &pool.snapshot(&vars), 1, &AttackConstants::default());

        // 110 + 120 + 130
        assert!((report.rows[0].chain.total_damage - 360.0).abs() < 1e-9);
        assert!((report.columns[0].damage_per_hit - 110.0).abs() < 1e-9);
        assert!((report.columns[0].armor_reduction - 6.0).abs() < f64::EPSILON);
        assert!((report.columns[0].true_strike - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_last_row_is_kept() {
        let mut section = AttackSection::default();
        assert_eq!(section.add_row(), 1);
        assert_eq!(section.rows[1].label, "Attack 2");
        assert!(section.remove_row(0).is_ok());
        assert_eq!(
            section.remove_row(0),
            Err(StructureError::LastEntry("attack row"))
        );
    }

    #[test]
    fn test_prune_modifier() {
        let mut section = AttackSection::default();
        section.rows[0].modifiers = vec![ModifierId(1), ModifierId(2), ModifierId(1)];
        section.prune_modifier(ModifierId(1));
        assert_eq!(section.rows[0].modifiers, vec![ModifierId(2)]);
    }
}
