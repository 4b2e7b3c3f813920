//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve database path and logging settings for CLI/FFI front ends.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; invalid log settings surface at `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Database path override.
pub const ENV_DB_PATH: &str = "STICKYNOTE_DB_PATH";
/// Enables file logging into this absolute directory.
pub const ENV_LOG_DIR: &str = "STICKYNOTE_LOG_DIR";
/// Log level override (`trace|debug|info|warn|error`).
pub const ENV_LOG_LEVEL: &str = "STICKYNOTE_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "stickynote.sqlite3";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickyConfig {
    /// SQLite file backing the key-value store.
    pub db_path: PathBuf,
    /// Rolling log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
}

impl StickyConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            log_dir: non_blank(ENV_LOG_DIR).map(PathBuf::from),
            log_level: non_blank(ENV_LOG_LEVEL)
                .unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}

/// Default database location under the system temp directory.
pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}
