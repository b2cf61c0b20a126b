//! Heroes tab view

use super::{percent_line, section, stat_line};
use crate::app::App;
use dmg_core::types::format_value;
use dmg_core::HeroTotals;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(totals) = app.report.heroes.get(app.selected_hero) else {
        let paragraph = Paragraph::new("No heroes in this scenario")
            .block(Block::default().borders(Borders::ALL).title(" Heroes "));
        f.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let title = format!(
        " {} ({}/{}) ",
        totals.name,
        app.selected_hero + 1,
        app.report.heroes.len()
    );
    draw_core(f, totals, &title, chunks[0]);
    draw_combat(f, totals, chunks[1]);
    draw_loadout(f, app, totals, chunks[2]);
}

fn draw_core(f: &mut Frame, totals: &HeroTotals, title: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            format!("{} level {}", totals.attribute_type.name(), totals.level),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        section("Attributes"),
        stat_line("Strength", totals.strength),
        stat_line("Agility", totals.agility),
        stat_line("Intelligence", totals.intelligence),
        Line::from(""),
        section("Resources"),
        stat_line("HP", totals.hp),
        stat_line("HP regen", totals.hp_regen),
        stat_line("Mana", totals.mana),
        stat_line("Mana regen", totals.mana_regen),
        stat_line("Movespeed", totals.movespeed),
        stat_line("Gold", totals.gold),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    f.render_widget(paragraph, area);
}

fn draw_combat(f: &mut Frame, totals: &HeroTotals, area: Rect) {
    let lines = vec![
        section("Offense"),
        stat_line("Attack speed", totals.attack_speed),
        stat_line("BAT", totals.bat),
        Line::from(vec![
            Span::styled(format!("{:22}", "Attacks / s"), Style::default().fg(Color::Gray)),
            Span::styled(
                format_value(totals.attacks_per_second, 3),
                Style::default().fg(Color::White),
            ),
        ]),
        stat_line("Base damage", totals.base_damage),
        stat_line("Bonus damage", totals.bonus_damage),
        stat_line("Auto attack", totals.auto_attack_damage),
        stat_line("Est. physical", totals.estimated_physical),
        stat_line("Est. magic", totals.estimated_magic),
        stat_line("Est. damage", totals.estimated_damage),
        Line::from(vec![
            Span::styled(format!("{:22}", "Est. DPS"), Style::default().fg(Color::Gray)),
            Span::styled(
                format_value(totals.estimated_dps, 1),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        section("Defense"),
        stat_line("Armor", totals.armor),
        percent_line("Phys reduction", totals.physical_reduction),
        percent_line("Magic resist", totals.magic_resistance),
        percent_line("Evasion", totals.evasion),
        percent_line("Phys + evasion", totals.physical_and_evasion),
        Line::from(""),
        section("Effective HP"),
        stat_line("vs physical", totals.ehp_physical),
        stat_line("vs evadable", totals.ehp_evasion),
        stat_line("vs phys + evasion", totals.ehp_physical_evasion),
        stat_line("vs magic", totals.ehp_magic),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Combat "));

    f.render_widget(paragraph, area);
}

fn draw_loadout(f: &mut Frame, app: &App, totals: &HeroTotals, area: Rect) {
    let mut lines = vec![section("Spells")];
    if totals.spells.is_empty() {
        lines.push(Line::from(Span::styled("  none", Style::default().fg(Color::DarkGray))));
    }
    for (i, spell) in totals.spells.iter().enumerate() {
        let marker = if i == app.selected_spell { "> " } else { "  " };
        let style = if i == app.selected_spell {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{} (lv {})", marker, spell.name, spell.level),
            style,
        )));
        let efficiency = if spell.free_cast {
            "free".to_string()
        } else {
            format_value(spell.mana_efficiency, 2)
        };
        lines.push(Line::from(Span::styled(
            format!(
                "    {} {}  dps {}  dmg/mana {}  stun {}",
                format_value(spell.damage, 1),
                spell.damage_type.name(),
                format_value(spell.dps, 1),
                efficiency,
                format_value(spell.stun, 2),
            ),
            Style::default().fg(Color::Gray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(section("Items"));
    let items = app.hero().map(|h| h.items.as_slice()).unwrap_or_default();
    if items.is_empty() {
        lines.push(Line::from(Span::styled("  none", Style::default().fg(Color::DarkGray))));
    }
    for attached in items {
        let (marker, style) = if attached.enabled {
            ("[x]", Style::default().fg(Color::White))
        } else {
            ("[ ]", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(Span::styled(
            format!("  {} {}", marker, attached.item.name()),
            style,
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Loadout "));

    f.render_widget(paragraph, area);
}
