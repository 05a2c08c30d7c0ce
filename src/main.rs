use std::io;
use std::time::Duration;

use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use miette::IntoDiagnostic;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use peer_observatory::config::AppConfig;
use peer_observatory::core::data_source;
use peer_observatory::tui::app::AppState;
use peer_observatory::tui::events::AppEvent;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    let _log_guard = peer_observatory::core::logging::init_tui();
    tracing::info!(
        name = peer_observatory::NAME,
        version = peer_observatory::VERSION,
        "peer observatory starting"
    );

    let config = AppConfig::load();
    let location = config.data_location();

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(event_rx, event_tx, &config);

    // One-shot dataset load; the dashboard renders while it is in flight.
    let loaded_tx = app.sender();
    tokio::spawn(async move {
        let outcome = data_source::load_session(&location).await;
        if loaded_tx.send(AppEvent::DataLoaded(outcome.clone())).is_err() {
            tracing::debug!("dashboard closed before the dataset arrived");
        }
    });

    // Setup terminal
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange).into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture).into_diagnostic()?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).into_diagnostic()?;

    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms.max(1));
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode().into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture).into_diagnostic()?;
    }
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen).into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "event loop failed");
    }
    tracing::info!("peer observatory stopped");
    result.into_diagnostic()
}
