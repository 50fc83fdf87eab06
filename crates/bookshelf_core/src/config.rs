//! Runtime configuration for the catalog.
//!
//! # Responsibility
//! - Hold the database location and logging settings.
//! - Apply environment overrides on top of built-in defaults.
//!
//! # Invariants
//! - Empty or whitespace-only override values are ignored.
//! - Loading configuration never fails; level validation happens in
//!   [`crate::logging::init_logging`].

use crate::logging::default_log_level;
use crate::service::catalog_store::DEFAULT_DB_FILE_NAME;
use std::path::PathBuf;

/// Overrides the database file location.
pub const ENV_DB_PATH: &str = "BOOKSHELF_DB_PATH";
/// Overrides the log level (`trace|debug|info|warn|error`).
pub const ENV_LOG_LEVEL: &str = "BOOKSHELF_LOG_LEVEL";
/// Enables file logging into the given absolute directory.
pub const ENV_LOG_DIR: &str = "BOOKSHELF_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// `None` leaves file logging disabled.
    pub log_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CatalogConfig {
    /// Loads defaults overridden by `BOOKSHELF_*` process variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads defaults overridden by values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut config = Self::default();
        if let Some(db_path) = value(ENV_DB_PATH) {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(level) = value(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = value(ENV_LOG_DIR).map(PathBuf::from);
        config
    }
}
