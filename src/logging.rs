//! Tracing setup for the binary.
//!
//! The terminal belongs to the UI, so events go to a log file under the
//! data directory instead of stderr.

use std::fs::{self, File};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_LOG_FILTER: &str = "info";

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initializes a process-wide subscriber writing to `path`.
///
/// `RUST_LOG` takes precedence over the default filter. Calling this again
/// is a no-op.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub fn init_logging(path: &Path) -> anyhow::Result<()> {
    if LOGGING_INITIALIZED.get().is_some() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;

    LOGGING_INITIALIZED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    });
    Ok(())
}
