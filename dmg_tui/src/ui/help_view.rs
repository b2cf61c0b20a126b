//! Help tab view

use super::section;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let scenario = match &app.scenario_path {
        Some(path) => path.display().to_string(),
        None => "(defaults)".to_string(),
    };

    let lines = vec![
        section("Navigation"),
        key_line("1-6", "Jump to tab (Attacks/Targets/Spells/Heroes/Sheet/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Scroll"),
        key_line("q / Ctrl+C", "Quit"),
        Line::from(""),
        section("Scenario"),
        key_line("+ / -", "Add or remove a comparison column"),
        key_line("r", "Reload the scenario file"),
        Line::from(Span::styled(
            format!("  Loaded from {}", scenario),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        section("Heroes"),
        key_line("←/→", "Select hero"),
        key_line("↑/↓", "Select spell"),
        key_line("[ / ]", "Lower or raise the spell level"),
        key_line("s", "Save hero to the library as a new version"),
        Line::from(""),
        section("Formulas"),
        Line::from(Span::styled("Armor:", Style::default().fg(Color::Yellow))),
        Line::from("  Reduction = 0.06 × armor / (1 + 0.06 × |armor|)"),
        Line::from(""),
        Line::from(Span::styled("Attack rate:", Style::default().fg(Color::Yellow))),
        Line::from("  Attacks/s = attack speed / (100 × BAT)"),
        Line::from(""),
        Line::from(Span::styled("Evasion:", Style::default().fg(Color::Yellow))),
        Line::from("  Hit chance = 1 - evasion × (1 - true strike)"),
        Line::from(""),
        Line::from(Span::styled("Magic resistance:", Style::default().fg(Color::Yellow))),
        Line::from("  Sources stack multiplicatively: 1 - Π(1 - r)"),
        Line::from(""),
        Line::from(Span::styled("Kill projection:", Style::default().fg(Color::Yellow))),
        Line::from("  Hits = ⌈HP / (damage - regen per attack)⌉"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help & Formulas "))
        .scroll((app.scroll as u16, 0));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:20}", key),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
