//! Targets tab view

use super::{column_headers, header_line, invalid_line, table_line};
use crate::app::App;
use dmg_core::types::format_value;
use dmg_core::KillProjection;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn kill_cells(kill: Option<KillProjection>) -> (String, String) {
    match kill {
        Some(KillProjection { hits: Some(hits), time }) => (hits.to_string(), format_value(time, 2)),
        Some(_) => ("never".to_string(), "INF".to_string()),
        None => ("-".to_string(), "-".to_string()),
    }
}

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let value_style = Style::default().fg(Color::White);
    let mut lines = Vec::new();

    for report in &app.report.targets {
        let target = &report.target;
        let title_style = if target.enabled {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let hp = target.hp.map_or_else(|| "-".to_string(), |hp| format_value(hp, 0));
        lines.push(Line::from(vec![
            Span::styled(format!("═══ {} ═══", target.label), title_style),
            Span::styled(
                format!(
                    "  HP {}  regen {}  armor {}  MR {}%  evasion {}%",
                    hp,
                    format_value(target.regen, 1),
                    format_value(target.armor, 1),
                    format_value(target.magic_resistance * 100.0, 1),
                    format_value(target.evasion * 100.0, 1),
                ),
                Style::default().fg(Color::Gray),
            ),
        ]));
        lines.extend(invalid_line(&target.invalid_fields));

        if !target.enabled {
            lines.push(Line::from(""));
            continue;
        }

        lines.push(header_line("", &column_headers(report.columns.len())));
        let cells = |cell: &dyn Fn(usize) -> String| -> Vec<String> {
            (0..report.columns.len()).map(cell).collect()
        };
        lines.push(table_line(
            "Armor",
            &cells(&|i| format_value(report.columns[i].effective_armor, 1)),
            value_style,
        ));
        lines.push(table_line(
            "Phys reduction",
            &cells(&|i| format!("{}%", format_value(report.columns[i].physical_reduction * 100.0, 1))),
            value_style,
        ));
        lines.push(table_line(
            "Hit chance",
            &cells(&|i| format!("{}%", format_value(report.columns[i].hit_chance * 100.0, 1))),
            value_style,
        ));
        lines.push(table_line(
            "Damage / hit",
            &cells(&|i| format_value(report.columns[i].damage_per_hit, 1)),
            value_style,
        ));
        lines.push(table_line(
            "Total damage",
            &cells(&|i| format_value(report.columns[i].total_damage, 1)),
            value_style,
        ));
        lines.push(table_line(
            "Hits to kill",
            &cells(&|i| kill_cells(report.columns[i].kill).0),
            Style::default().fg(Color::Yellow),
        ));
        lines.push(table_line(
            "Time to kill",
            &cells(&|i| kill_cells(report.columns[i].kill).1),
            Style::default().fg(Color::Yellow),
        ));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Targets "))
        .scroll((app.scroll as u16, 0));

    f.render_widget(paragraph, area);
}
