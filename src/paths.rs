//! Path resolution for the doproject database.
//!
//! Follows the XDG base directory layout.

use std::env;
use std::path::PathBuf;

use tracing::debug;

/// Environment variable overriding the database file location.
pub const DB_ENV: &str = "DOPROJECT_DB";

const APP_DIR: &str = "doproject";
const DB_FILE: &str = "doproject.db";

/// Get XDG-compliant data directory for doproject.
///
/// Uses `$XDG_DATA_HOME/doproject`, then `$HOME/.local/share/doproject`,
/// then `./doproject` when neither variable is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|_| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Get database file path (data_dir/doproject.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join(DB_FILE)
}

/// Resolve the database path: CLI flag, then `DOPROJECT_DB`, then the XDG default.
pub fn resolve_db_path(cli: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli {
        return path;
    }

    match env::var(DB_ENV) {
        Ok(raw) if !raw.trim().is_empty() => {
            debug!(path = %raw, "Using database path from {}", DB_ENV);
            PathBuf::from(raw)
        }
        _ => get_db_path(),
    }
}
