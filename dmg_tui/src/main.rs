//! dmg_tui - Interactive TUI for exploring damage scenarios

mod app;
mod ui;

use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> io::Result<()> {
    // Logs go to a file; the terminal belongs to the UI
    let appender = tracing_appender::rolling::never(std::env::temp_dir(), "dmg_tui.log");
    let (writer, _guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::from_default_env().add_directive(Level::INFO.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    let scenario = std::env::args().nth(1).map(PathBuf::from);
    let mut app = App::load(scenario).map_err(io::Error::other)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Tab, _) => app.next_tab(),
                    (KeyCode::BackTab, _) => app.prev_tab(),
                    (KeyCode::Char(c @ '1'..='6'), _) => {
                        app.set_tab(c as usize - '1' as usize)
                    }
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
                    (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.on_left(),
                    (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.on_right(),
                    (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => app.add_column(),
                    (KeyCode::Char('-'), _) => app.remove_column(),
                    (KeyCode::Char('['), _) => app.spell_level_down(),
                    (KeyCode::Char(']'), _) => app.spell_level_up(),
                    (KeyCode::Char('s'), _) => app.save_hero_version(),
                    (KeyCode::Char('r'), _) => app.reload(),
                    _ => {}
                }
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
