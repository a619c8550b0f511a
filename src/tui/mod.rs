pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use crate::scoring::{Scoreboard, Visibility};
use crate::snapshot::Snapshot;
use crate::store::JsonStore;

/// Run the live public scoreboard until quit.
///
/// The data file is re-read on the poll interval and on manual refresh; each
/// reload rebuilds the whole board from one snapshot. A local file read is
/// immediate, so the reload happens inline in the event loop.
pub async fn run_tui(mut app: App, mut store: JsonStore) -> anyhow::Result<()> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    // 250ms tick for flash timeouts, poll interval from config
    let mut events = EventHandler::new(250, app.refresh_interval);

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
            Event::Refresh => app.needs_refresh = true,
        }

        if app.needs_refresh {
            app.needs_refresh = false;
            match reload_board(&mut store) {
                Ok(board) => app.update_board(board),
                Err(e) => app.show_flash(format!("Refresh failed: {}", e)),
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    ratatui::restore();
    Ok(())
}

fn reload_board(store: &mut JsonStore) -> anyhow::Result<Scoreboard> {
    store.reload()?;
    let snapshot = Snapshot::load(store)?;
    Ok(Scoreboard::build(&snapshot, Visibility::Public))
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Tab switching
                KeyCode::Tab => app.toggle_tab(),

                // Breakdown sorting
                KeyCode::Char('t') => app.sort_by_total(),
                KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                    app.sort_by_round_column(c as usize - '0' as usize);
                }

                // Manual refresh
                KeyCode::Char('r') => {
                    app.needs_refresh = true;
                    app.show_flash("Refreshing...".to_string());
                }

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
