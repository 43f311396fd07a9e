//! Terminal management and main run loop

use std::io::{self, Stdout};

use aegis_core::{AegisConfig, Backends, Shell};
use anyhow::{Context, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use super::app::App;
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the dashboard until the user quits
pub async fn run(config: AegisConfig) -> Result<()> {
    let tick_rate = config.ui.tick_rate();
    let shell = Shell::new(Backends::simulated(&config), config);
    let mut app = App::new(shell);
    info!(module = %app.shell.active_module(), "starting dashboard");

    let mut terminal = init_terminal()?;

    let result = run_loop(&mut terminal, &mut app, tick_rate);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    info!("dashboard closed");
    result
}

/// Main event loop
///
/// Completions run on the runtime's worker threads; this loop only applies
/// them between key events.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    tick_rate: std::time::Duration,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let event = tokio::task::block_in_place(|| poll_event(tick_rate))?;
        if let Some(Event::Key(key)) = event {
            if handle_key(app, key) == HandleResult::Quit {
                app.should_quit = true;
            }
        }

        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
