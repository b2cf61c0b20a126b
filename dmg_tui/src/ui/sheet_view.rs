//! Damage sheet tab view

use super::{column_headers, header_line, section, table_line};
use crate::app::App;
use dmg_core::sheet::{RowCell, RowMode, SheetRowResult};
use dmg_core::types::format_value;
use dmg_core::DefenseMode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn row_lines(title: &str, rows: &[SheetRowResult], lines: &mut Vec<Line<'static>>) {
    lines.push(section(title));
    for (i, row) in rows.iter().enumerate() {
        let label = match row.mode {
            RowMode::Basic => format!("#{}", i + 1),
            RowMode::Dps => format!("#{} x{}/s", i + 1, format_value(row.rate, 2)),
        };
        let (cells, style) = if !row.enabled {
            (vec!["off".to_string()], Style::default().fg(Color::DarkGray))
        } else if row.is_invalid() {
            (vec!["invalid".to_string()], Style::default().fg(Color::Red))
        } else {
            let cells = row
                .cells
                .iter()
                .map(|c| match c {
                    RowCell::Value(v) => format_value(*v, 1),
                    RowCell::Off => "-".to_string(),
                })
                .collect();
            (cells, Style::default().fg(Color::White))
        };
        lines.push(table_line(&label, &cells, style));
    }
    lines.push(Line::from(""));
}

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let report = &app.report.sheet;
    let value_style = Style::default().fg(Color::White);
    let physical_label = match app.session.sheet.physical_mode {
        DefenseMode::Armor => "Physical (armor)",
        DefenseMode::Reduction => "Physical (reduction)",
    };

    let mut lines = vec![header_line("", &column_headers(report.columns.len()))];
    row_lines(physical_label, &report.physical, &mut lines);
    row_lines("Magic", &report.magic, &mut lines);
    row_lines("Pure", &report.pure, &mut lines);

    lines.push(section("Totals"));
    lines.push(header_line("", &column_headers(report.columns.len())));
    let cells = |cell: &dyn Fn(usize) -> String| -> Vec<String> {
        (0..report.columns.len()).map(cell).collect()
    };
    lines.push(table_line(
        "Phys reduction",
        &cells(&|i| format!("{}%", format_value(report.columns[i].physical_reduction, 1))),
        value_style,
    ));
    lines.push(table_line(
        "Magic reduction",
        &cells(&|i| format!("{}%", format_value(report.columns[i].magic_reduction, 1))),
        value_style,
    ));
    lines.push(table_line(
        "Physical",
        &cells(&|i| format_value(report.columns[i].physical, 1)),
        value_style,
    ));
    lines.push(table_line(
        "Magic",
        &cells(&|i| format_value(report.columns[i].magic, 1)),
        value_style,
    ));
    lines.push(table_line(
        "Pure",
        &cells(&|i| format_value(report.columns[i].pure, 1)),
        value_style,
    ));
    lines.push(table_line(
        "Total",
        &cells(&|i| format_value(report.columns[i].total, 1)),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));
    lines.push(table_line(
        "Remaining HP",
        &cells(&|i| {
            let column = &report.columns[i];
            match column.remaining_hp {
                Some(_) if column.dead => "DEAD".to_string(),
                Some(hp) => format_value(hp, 0),
                None => "-".to_string(),
            }
        }),
        Style::default().fg(Color::Red),
    ));

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Damage Sheet "))
        .scroll((app.scroll as u16, 0));

    f.render_widget(paragraph, area);
}
