use anyhow::{Context, Result};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    layout::Rect,
    Terminal,
};
use std::io;
use std::time::Duration;

mod app;
mod console;
mod logger;
mod theme;
mod views;

use app::App;
use logview_config::AppConfig;

/// Poll interval while entries are waiting to be shown
const DRAIN_FRAME: Duration = Duration::from_millis(16);
/// Poll interval when idle
const IDLE_FRAME: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let log_file = logger::init()?;

    log::info!("Starting logview, logging to {}", log_file.display());

    let config = AppConfig::load();

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(config, Rect::new(0, 0, size.width, size.height));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("Exiting with error: {:#}", err);
    }

    log::info!("Exiting logview");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.present_frame();

        terminal.draw(|frame| {
            let area = frame.area();
            views::render(app, area, frame);
        })?;

        if !app.running {
            break;
        }

        let timeout = if app.is_busy() { DRAIN_FRAME } else { IDLE_FRAME };
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}
