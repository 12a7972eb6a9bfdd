//! beiramar - A terminal hotel booking demo.
//!
//! This is the main binary that launches the TUI application.

mod logging;

use beiramar_config::{Config, persistence};
use beiramar_store::Storage;
use beiramar_tui::{App, terminal};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging(&persistence::log_file_path()?)?;

    let config = Config::load()?;
    let storage_dir = config.storage_dir()?;
    info!(storage = %storage_dir.display(), language = config.language.code(), "starting");
    let storage = Storage::open(storage_dir)?;

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();

    let mut terminal = terminal::setup_terminal()?;
    let mut app = App::new(config, storage);

    // Run the main loop
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}
