//! Spells tab view

use super::{header_line, section, table_line};
use crate::app::App;
use dmg_core::types::format_value;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_spells(f, app, chunks[0]);
    draw_pairs(f, app, chunks[1]);
}

fn draw_spells(f: &mut Frame, app: &App, area: Rect) {
    let headers: Vec<String> = ["Type", "Damage", "Instances", "Cast", "Cooldown", "Mana", "Stun"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut lines = vec![header_line("Spell", &headers)];

    for spell in &app.report.spells.spells {
        let style = if spell.enabled {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let values = &spell.values;
        lines.push(table_line(
            &spell.label,
            &[
                spell.damage_type.name().to_string(),
                format_value(values.total_damage, 1),
                values.instances.to_string(),
                format_value(values.cast_time, 2),
                format_value(values.cooldown, 1),
                format_value(values.mana, 0),
                format_value(values.stun, 2),
            ],
            style,
        ));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Spells "));

    f.render_widget(paragraph, area);
}

fn draw_pairs(f: &mut Frame, app: &App, area: Rect) {
    let value_style = Style::default().fg(Color::White);
    let headers: Vec<String> = ["Target", "Raw", "Dealt", "Reduced", "DPS", "Dmg/mana"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut lines = vec![header_line("Spell", &headers)];

    for pair in &app.report.spells.pairs {
        let efficiency = if pair.free_cast {
            "free".to_string()
        } else {
            format_value(pair.mana_efficiency, 2)
        };
        lines.push(table_line(
            &pair.spell_label,
            &[
                pair.target_label.clone(),
                format_value(pair.raw_damage, 1),
                format_value(pair.mitigated_damage, 1),
                format!("{}%", format_value(pair.reduction_pct, 1)),
                format_value(pair.dps, 1),
                efficiency,
            ],
            value_style,
        ));
    }

    lines.push(Line::from(""));
    lines.push(section("Burst per target"));
    for report in &app.report.targets {
        let target = &report.target;
        if !target.enabled {
            continue;
        }
        let burst = app.report.spells.burst(target.id);
        let mut cells = vec![format_value(burst, 1)];
        if let Some(hp) = target.hp {
            let verdict = if burst >= hp { "kills" } else { "survives" };
            cells.push(format!("{} HP", format_value(hp - burst, 0)));
            cells.push(verdict.to_string());
        }
        lines.push(table_line(&target.label, &cells, Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Spell vs Target "))
        .scroll((app.scroll as u16, 0));

    f.render_widget(paragraph, area);
}
