//! Terminal setup and the event loop
use crossterm::event::{self, Event};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use tracing::debug;

use super::app::App;
use super::ui;

/// Run the viewer until the user quits
pub fn run_viewer(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    app.handle_key(key);
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                    app.handle_resize(width, height);
                }
                _ => {
                    // Ignore other events (mouse, focus, etc.)
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
