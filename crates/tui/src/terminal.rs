//! Terminal lifecycle.
//!
//! The booking screens run on the alternate screen in raw mode with mouse
//! capture on, because the date popovers close on outside clicks. Every way
//! out (normal teardown or a panic) goes through [`leave_screen`], so the
//! shell gets its terminal back either way.

use std::io::{self, Stdout, Write};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

/// The terminal the application draws on.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Errors from switching the terminal in and out of UI mode.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// The terminal could not be prepared.
    #[error("cannot prepare the terminal: {0}")]
    Setup(#[source] io::Error),

    /// The terminal could not be handed back.
    #[error("cannot restore the terminal: {0}")]
    Restore(#[source] io::Error),
}

fn enter_screen(out: &mut impl Write) -> io::Result<()> {
    enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
}

fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, DisableMouseCapture, LeaveAlternateScreen)
}

/// Switches stdout into UI mode and wraps it in a Ratatui terminal.
///
/// # Errors
///
/// Returns [`TerminalError::Setup`] if raw mode, the alternate screen or
/// mouse capture cannot be enabled.
///
/// # Examples
///
/// ```no_run
/// use beiramar_tui::terminal;
///
/// let mut terminal = terminal::setup_terminal()?;
/// terminal::restore_terminal(&mut terminal)?;
/// # Ok::<(), beiramar_tui::terminal::TerminalError>(())
/// ```
pub fn setup_terminal() -> Result<AppTerminal, TerminalError> {
    let mut stdout = io::stdout();
    enter_screen(&mut stdout).map_err(TerminalError::Setup)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(TerminalError::Setup)?;
    debug!("terminal in UI mode");
    Ok(terminal)
}

/// Leaves UI mode and shows the cursor again.
///
/// # Errors
///
/// Returns [`TerminalError::Restore`] if any step fails.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<(), TerminalError> {
    leave_screen(terminal.backend_mut()).map_err(TerminalError::Restore)?;
    terminal.show_cursor().map_err(TerminalError::Restore)?;
    debug!("terminal restored");
    Ok(())
}

/// Chains a panic hook that leaves UI mode before the previous hook prints
/// the panic message.
///
/// Call it once, before [`setup_terminal`].
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = leave_screen(&mut io::stdout());
        previous(info);
    }));
}
