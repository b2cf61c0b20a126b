//! UI rendering

mod attack_view;
mod help_view;
mod hero_view;
mod sheet_view;
mod spell_view;
mod target_view;

use crate::app::{App, StatusKind, Tab};
use dmg_core::types::format_value;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status line
            Constraint::Length(3), // Keybindings footer
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);

    match app.current_tab {
        Tab::Attacks => attack_view::draw(f, app, chunks[1]),
        Tab::Targets => target_view::draw(f, app, chunks[1]),
        Tab::Spells => spell_view::draw(f, app, chunks[1]),
        Tab::Heroes => hero_view::draw(f, app, chunks[1]),
        Tab::Sheet => sheet_view::draw(f, app, chunks[1]),
        Tab::Help => help_view::draw(f, app, chunks[1]),
    }

    draw_status(f, app, chunks[2]);
    draw_keybindings(f, app, chunks[3]);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status {
        Some((StatusKind::Error, message)) => Line::from(Span::styled(
            format!(" ! {message}"),
            Style::default().fg(Color::Red),
        )),
        Some((StatusKind::Info, message)) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![
        ("+/-", "Columns"),
        ("r", "Reload"),
        ("Tab", "Next tab"),
        ("q", "Quit"),
    ];

    let tab_keys: Vec<(&str, &str)> = match app.current_tab {
        Tab::Heroes => vec![
            ("←/→", "Hero"),
            ("↑/↓", "Spell"),
            ("[/]", "Spell level"),
            ("s", "Save version"),
        ],
        Tab::Help => vec![],
        _ => vec![("↑/↓", "Scroll")],
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in tab_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::White),
        ));
    }

    if !tab_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|t| {
            let style = if *t == app.current_tab {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(t.name(), style))
        })
        .collect();

    let title = format!(" Damage Calculator ({} columns) ", app.session.columns());
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider("|");

    f.render_widget(tabs, area);
}

pub fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("═══ {} ═══", title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

pub fn stat_line(name: &str, value: f64) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:22}", name), Style::default().fg(Color::Gray)),
        Span::styled(format_value(value, 1), Style::default().fg(Color::White)),
    ])
}

pub fn percent_line(name: &str, value: f64) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:22}", name), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}%", format_value(value, 1)),
            Style::default().fg(Color::White),
        ),
    ])
}

/// One row of right-aligned cells after a fixed-width label
pub fn table_line(label: &str, cells: &[String], style: Style) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("{:16}", label), Style::default().fg(Color::Gray))];
    spans.extend(cells.iter().map(|c| Span::styled(format!("{:>12}", c), style)));
    Line::from(spans)
}

pub fn header_line(label: &str, cells: &[String]) -> Line<'static> {
    table_line(
        label,
        cells,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )
}

pub fn column_headers(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Col {}", i)).collect()
}

pub fn invalid_line(fields: &[&str]) -> Option<Line<'static>> {
    if fields.is_empty() {
        return None;
    }
    Some(Line::from(Span::styled(
        format!("  invalid: {}", fields.join(", ")),
        Style::default().fg(Color::Red),
    )))
}
