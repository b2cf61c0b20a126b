//! Attacks tab view

use super::{column_headers, header_line, invalid_line, section, table_line};
use crate::app::App;
use dmg_core::types::format_value;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    draw_attacks(f, app, chunks[0]);
    draw_variables(f, app, chunks[1]);
}

fn draw_attacks(f: &mut Frame, app: &App, area: Rect) {
    let report = &app.report.attacks;
    let value_style = Style::default().fg(Color::White);
    let mut lines = vec![section("Rows")];

    for row in &report.rows {
        let style = if row.enabled {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(row.label.clone(), style)));
        lines.push(table_line(
            "  hit / total",
            &[
                format_value(row.chain.damage_per_hit, 1),
                format_value(row.chain.total_damage, 1),
                format!("{} hits", row.values.hits),
                format!("{}/s", format_value(row.values.rate, 2)),
            ],
            value_style,
        ));
        if row.chain.magic_total > 0.0 {
            lines.push(table_line(
                "  magic",
                &[
                    format_value(row.chain.magic_per_hit, 1),
                    format_value(row.chain.magic_total, 1),
                ],
                value_style,
            ));
        }
        lines.extend(invalid_line(&row.values.invalid_fields));
    }

    lines.push(Line::from(""));
    lines.push(section("Columns"));
    lines.push(header_line("", &column_headers(report.columns.len())));

    let per_column = |cell: &dyn Fn(usize) -> String| -> Vec<String> {
        (0..report.columns.len()).map(cell).collect()
    };
    lines.push(table_line(
        "Damage / hit",
        &per_column(&|i| format_value(report.columns[i].damage_per_hit, 1)),
        value_style,
    ));
    lines.push(table_line(
        "Total damage",
        &per_column(&|i| format_value(report.columns[i].total_damage, 1)),
        value_style,
    ));
    lines.push(table_line(
        "Magic / hit",
        &per_column(&|i| format_value(report.columns[i].magic_per_hit, 1)),
        value_style,
    ));
    lines.push(table_line(
        "Attacks / s",
        &per_column(&|i| format_value(report.columns[i].rate, 3)),
        value_style,
    ));
    lines.push(table_line(
        "True strike",
        &per_column(&|i| format!("{}%", format_value(report.columns[i].true_strike * 100.0, 0))),
        value_style,
    ));
    lines.push(table_line(
        "Armor reduction",
        &per_column(&|i| format_value(report.columns[i].armor_reduction, 1)),
        value_style,
    ));
    lines.push(table_line(
        "DPS",
        &per_column(&|i| {
            report
                .ranges
                .get(i)
                .map_or_else(|| "-".to_string(), |r| format_value(r.dps, 1))
        }),
        Style::default().fg(Color::Yellow),
    ));

    if let Some(range) = report.ranges.first() {
        lines.push(Line::from(""));
        lines.push(section("Column 1 ranges"));
        lines.push(header_line("", &["Damage".to_string(), "Time (s)".to_string()]));
        for (n, (damage, time)) in range
            .damage_for_hits
            .iter()
            .zip(&range.time_for_hits)
            .enumerate()
        {
            lines.push(table_line(
                &format!("{} hits", n + 1),
                &[format_value(*damage, 1), format_value(*time, 2)],
                value_style,
            ));
        }
        for (n, damage) in range.damage_in_time.iter().enumerate() {
            lines.push(table_line(
                &format!("{} s", n + 1),
                &[format_value(*damage, 1)],
                value_style,
            ));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Attacks "))
        .scroll((app.scroll as u16, 0));

    f.render_widget(paragraph, area);
}

fn draw_variables(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![section("Variables")];
    for (name, value) in app.report.variables.sorted() {
        lines.push(super::stat_line(name, value));
    }

    if !app.report.variable_issues.is_empty() {
        lines.push(Line::from(""));
        lines.push(section("Problems"));
        for issue in &app.report.variable_issues {
            lines.push(Line::from(Span::styled(
                format!("row {}: {}: {}", issue.row + 1, issue.name, issue.error),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(section("Modifier pool"));
    for (id, modifier) in app.session.pool.iter() {
        let style = if modifier.enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(
            format!("#{:<3} {} ({})", id.0, modifier.label, modifier.kind().type_name()),
            style,
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Inputs "));

    f.render_widget(paragraph, area);
}
