//! SQLite storage bootstrap.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the catalog.
//! - Ensure the single `library` table exists before data access.
//!
//! # Invariants
//! - Schema setup is idempotent (`CREATE TABLE IF NOT EXISTS`).
//! - There is no schema versioning; the table shape is fixed.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{ensure_schema, open_db, open_db_in_memory};

/// Name of the only table managed by the catalog.
pub const LIBRARY_TABLE: &str = "library";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
