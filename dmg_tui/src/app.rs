//! Application state

use dmg_core::{ConfigError, HeroInput, Report, Session};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Attacks,
    Targets,
    Spells,
    Heroes,
    Sheet,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Attacks, Tab::Targets, Tab::Spells, Tab::Heroes, Tab::Sheet, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Attacks => "Attacks",
            Tab::Targets => "Targets",
            Tab::Spells => "Spells",
            Tab::Heroes => "Heroes",
            Tab::Sheet => "Sheet",
            Tab::Help => "Help",
        }
    }
}

/// Severity of the last status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

pub struct App {
    pub current_tab: Tab,
    pub session: Session,
    pub report: Report,
    pub scenario_path: Option<PathBuf>,
    pub selected_hero: usize,
    pub selected_spell: usize,
    pub scroll: usize,
    pub status: Option<(StatusKind, String)>,
}

impl App {
    pub fn new(session: Session, scenario_path: Option<PathBuf>) -> Self {
        let report = session.recompute();
        App {
            current_tab: Tab::Attacks,
            session,
            report,
            scenario_path,
            selected_hero: 0,
            selected_spell: 0,
            scroll: 0,
            status: None,
        }
    }

    /// Start from a scenario file, or from defaults when none is given
    pub fn load(scenario_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let session = match &scenario_path {
            Some(path) => Session::load(path)?,
            None => Session::default(),
        };
        let mut app = App::new(session, scenario_path);
        let message = match &app.scenario_path {
            Some(path) => format!("Loaded {}", path.display()),
            None => "No scenario given, using defaults".to_string(),
        };
        app.info(message);
        Ok(app)
    }

    fn recompute(&mut self) {
        self.report = self.session.recompute();
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let heroes = self.session.heroes.len();
        if self.selected_hero >= heroes {
            self.selected_hero = heroes.saturating_sub(1);
        }
        let spells = self.hero().map_or(0, |h| h.spells.len());
        if self.selected_spell >= spells {
            self.selected_spell = spells.saturating_sub(1);
        }
    }

    fn info(&mut self, message: impl Into<String>) {
        self.status = Some((StatusKind::Info, message.into()));
    }

    fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "action rejected");
        self.status = Some((StatusKind::Error, message));
    }

    pub fn hero(&self) -> Option<&HeroInput> {
        self.session.heroes.get(self.selected_hero)
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(current_idx + 1) % tabs.len()];
        self.scroll = 0;
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
        self.scroll = 0;
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.current_tab = tabs[index];
            self.scroll = 0;
        }
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Heroes => {
                if self.selected_spell > 0 {
                    self.selected_spell -= 1;
                }
            }
            _ => {
                if self.scroll > 0 {
                    self.scroll -= 1;
                }
            }
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Heroes => {
                let spells = self.hero().map_or(0, |h| h.spells.len());
                if self.selected_spell + 1 < spells {
                    self.selected_spell += 1;
                }
            }
            _ => self.scroll += 1,
        }
    }

    pub fn on_left(&mut self) {
        if self.current_tab == Tab::Heroes && self.selected_hero > 0 {
            self.selected_hero -= 1;
            self.selected_spell = 0;
        }
    }

    pub fn on_right(&mut self) {
        if self.current_tab == Tab::Heroes && self.selected_hero + 1 < self.session.heroes.len() {
            self.selected_hero += 1;
            self.selected_spell = 0;
        }
    }

    pub fn add_column(&mut self) {
        match self.session.add_column() {
            Ok(columns) => {
                self.recompute();
                self.info(format!("{columns} columns"));
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    pub fn remove_column(&mut self) {
        match self.session.remove_column() {
            Ok(columns) => {
                self.recompute();
                self.info(format!("{columns} columns"));
            }
            Err(e) => self.error(e.to_string()),
        }
    }

    fn shift_spell_level(&mut self, up: bool) {
        let Some(spell) = self
            .session
            .heroes
            .get_mut(self.selected_hero)
            .and_then(|h| h.spells.get_mut(self.selected_spell))
        else {
            self.error("The selected hero has no spells");
            return;
        };

        let level = spell.current_level();
        let next = if up { level + 1 } else { level.saturating_sub(1) };
        if next < 1 || next > spell.max_level() {
            let bound = if up { "highest" } else { "lowest" };
            let message = format!("{} is already at its {bound} level", spell.name);
            self.error(message);
            return;
        }
        spell.set_current_level(next);
        let message = format!("{} level {next}", spell.name);
        self.recompute();
        self.info(message);
    }

    pub fn spell_level_up(&mut self) {
        self.shift_spell_level(true);
    }

    pub fn spell_level_down(&mut self) {
        self.shift_spell_level(false);
    }

    /// Store the selected hero under the next free "name vN"
    pub fn save_hero_version(&mut self) {
        let Some(hero) = self.hero().cloned() else {
            self.error("No hero to save");
            return;
        };
        let saved = self
            .session
            .hero_library()
            .and_then(|mut library| library.save_new_version(&hero));
        match saved {
            Ok(name) => self.info(format!("Saved hero as '{name}'")),
            Err(e) => self.error(e.to_string()),
        }
    }

    /// Re-read the scenario file; the current session survives a failed load
    pub fn reload(&mut self) {
        let loaded = match &self.scenario_path {
            Some(path) => Session::load(path),
            None => Ok(Session::default()),
        };
        match loaded {
            Ok(session) => {
                self.session = session;
                self.recompute();
                self.info("Scenario reloaded");
            }
            Err(e) => self.error(e.to_string()),
        }
    }
}
