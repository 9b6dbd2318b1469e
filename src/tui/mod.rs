use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc};
use tokio::sync::mpsc;

pub mod app;
pub mod events;
pub mod theme;
pub mod tracing_layer;
pub mod ui;
pub mod widgets;

pub use app::{App, UILogEntry};
use events::run_app_loop;

use crate::config::Config;
use crate::provider::ItemProvider;

/// Main function to run the TUI.
///
/// Puts the terminal into raw mode on the alternate screen, runs the event
/// loop until the user quits and restores the terminal afterwards, also when
/// the loop fails.
pub async fn run_tui(
    config: Arc<Config>,
    provider: Box<dyn ItemProvider>,
    log_receiver: mpsc::UnboundedReceiver<UILogEntry>,
) -> Result<()> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(config, provider, log_receiver);

    let res = run_app_loop(&mut terminal, app).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("TUI event loop failed: {:?}", err);
        return Err(err);
    }

    Ok(())
}
