use std::sync::Once;
use std::{env, fs, path::Path, path::PathBuf};

use crate::errors::{FinanceError, Result};

const DEFAULT_DIR_NAME: &str = ".finance_core";
const STATE_FILE: &str = "state.json";
const CONFIG_FILE: &str = "config.json";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("finance_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.finance_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FINANCE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the shared state file (dashboard window start, etc.).
pub fn state_file_in(base: &Path) -> PathBuf {
    base.join(STATE_FILE)
}

/// Path to the configuration file.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Creates the directory (and parents) when missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::create_dir_all(path)
        .map_err(|err| FinanceError::StorageError(format!("{}: {}", path.display(), err)))
}
