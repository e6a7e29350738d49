//! File logging for the terminal app.
//!
//! The terminal is owned by the UI, so tracing output goes to a log file
//! next to the app data. `PRELOADER_LOG` takes an `EnvFilter` directive.

use std::{fs, path::PathBuf, sync::Mutex};

use color_eyre::eyre::WrapErr;
use preloader_config::Config;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PRELOADER_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber, returning the log file path.
pub fn init() -> color_eyre::Result<PathBuf> {
    let path = Config::log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    }
    let file = fs::File::create(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}
