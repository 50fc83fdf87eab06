//! Catalog store: the five catalog operations over one SQLite file.
//!
//! # Responsibility
//! - Own the configured database location.
//! - Run every operation on its own scoped connection.
//! - Turn business-rule rejections and store failures into typed outcomes.
//!
//! # Invariants
//! - No `rusqlite` error escapes an operation; failures become `Failed`.
//! - Connections are dropped before an operation returns, on every path.
//! - Check-then-write sequences run inside one immediate transaction, so a
//!   failure before commit leaves the table unchanged.
//! - Status text is stored as given; choosing a recognized value is the
//!   caller's job.

use crate::config::CatalogConfig;
use crate::db::{open_db, DbResult};
use crate::model::book::{Book, BookId};
use crate::repo::book_repo::{BookRepository, RepoResult, SqliteBookRepository};
use log::{error, info, warn};
use rusqlite::{Connection, TransactionBehavior};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Database file used when no location is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "library.sqlite3";

/// Result of [`CatalogStore::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(BookId),
    /// A row with the same title, author and year already exists.
    Duplicate,
    Failed(String),
}

/// Result of [`CatalogStore::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(BookId),
    NotFound(BookId),
    Failed(String),
}

/// Result of [`CatalogStore::update_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatusOutcome {
    Updated { id: BookId, status: String },
    NotFound(BookId),
    Failed(String),
}

/// Result of [`CatalogStore::search`].
///
/// `Empty` means the query ran and matched nothing; `Failed` means it did not
/// run to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<Book>),
    Empty,
    Failed(String),
}

impl Display for AddOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added(_) => f.write_str("Book added successfully."),
            Self::Duplicate => f.write_str("Book already exists in the catalog."),
            Self::Failed(message) => write!(f, "An error occurred: {message}"),
        }
    }
}

impl Display for DeleteOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deleted(_) => f.write_str("Book deleted successfully."),
            Self::NotFound(_) => f.write_str("Book not found."),
            Self::Failed(message) => write!(f, "An error occurred: {message}"),
        }
    }
}

impl Display for UpdateStatusOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Updated { status, .. } => write!(f, "Book status updated to {status}."),
            Self::NotFound(_) => f.write_str("Book not found."),
            Self::Failed(message) => write!(f, "An error occurred: {message}"),
        }
    }
}

impl Display for SearchOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found(books) => write!(f, "Found {} book(s).", books.len()),
            Self::Empty => f.write_str("No books found."),
            Self::Failed(message) => write!(f, "An error occurred: {message}"),
        }
    }
}

/// Book catalog persisted in a single SQLite table.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    db_path: PathBuf,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE_NAME)
    }
}

impl CatalogStore {
    /// Creates a store for the database file at `db_path`.
    ///
    /// Nothing is opened until the first operation runs.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Creates a store from loaded configuration.
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.db_path.clone())
    }

    /// Returns the configured database location.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Opens a connection with the `library` table in place.
    ///
    /// Catalog operations call this once each and drop the handle before
    /// returning.
    pub fn connect(&self) -> DbResult<Connection> {
        open_db(&self.db_path)
    }

    /// Returns every stored book, or an empty list when the store fails.
    ///
    /// Use [`Self::try_list_all`] when a failure must be told apart from an
    /// empty catalog.
    pub fn list_all(&self) -> Vec<Book> {
        self.try_list_all().unwrap_or_default()
    }

    /// Returns every stored book, surfacing store failures.
    pub fn try_list_all(&self) -> RepoResult<Vec<Book>> {
        match self.read(|repo| repo.list_books()) {
            Ok(books) => {
                info!(
                    "event=catalog_list module=service status=ok count={}",
                    books.len()
                );
                Ok(books)
            }
            Err(err) => {
                error!("event=catalog_list module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Adds `book` unless a row with the same title, author and year exists.
    ///
    /// `book.id` is ignored; the store assigns a fresh id.
    pub fn add(&self, book: &Book) -> AddOutcome {
        let result = self.write(|repo| {
            if repo.find_same_edition(book)?.is_some() {
                return Ok(AddOutcome::Duplicate);
            }
            repo.insert_book(book).map(AddOutcome::Added)
        });

        match result {
            Ok(AddOutcome::Added(id)) => {
                info!("event=catalog_add module=service status=ok book_id={id}");
                AddOutcome::Added(id)
            }
            Ok(outcome) => {
                warn!(
                    "event=catalog_add module=service status=rejected reason=duplicate year={}",
                    book.year
                );
                outcome
            }
            Err(err) => {
                error!("event=catalog_add module=service status=error error={err}");
                AddOutcome::Failed(err.to_string())
            }
        }
    }

    /// Deletes the book with `id`.
    pub fn delete(&self, id: BookId) -> DeleteOutcome {
        let result = self.write(|repo| {
            if repo.get_book(id)?.is_none() {
                return Ok(DeleteOutcome::NotFound(id));
            }
            repo.delete_book(id)?;
            Ok(DeleteOutcome::Deleted(id))
        });

        match result {
            Ok(outcome @ DeleteOutcome::Deleted(_)) => {
                info!("event=catalog_delete module=service status=ok book_id={id}");
                outcome
            }
            Ok(outcome) => {
                warn!("event=catalog_delete module=service status=rejected reason=not_found book_id={id}");
                outcome
            }
            Err(err) => {
                error!("event=catalog_delete module=service status=error book_id={id} error={err}");
                DeleteOutcome::Failed(err.to_string())
            }
        }
    }

    /// Finds books whose title or author contains `query`, or whose year
    /// equals it.
    ///
    /// `query` is matched as given: an empty query matches every row.
    pub fn search(&self, query: &str) -> SearchOutcome {
        match self.read(|repo| repo.search_books(query)) {
            Ok(books) if books.is_empty() => {
                info!("event=catalog_search module=service status=ok count=0");
                SearchOutcome::Empty
            }
            Ok(books) => {
                info!(
                    "event=catalog_search module=service status=ok count={}",
                    books.len()
                );
                SearchOutcome::Found(books)
            }
            Err(err) => {
                error!("event=catalog_search module=service status=error error={err}");
                SearchOutcome::Failed(err.to_string())
            }
        }
    }

    /// Sets the status text of the book with `id`. Other fields are untouched.
    pub fn update_status(&self, id: BookId, status: &str) -> UpdateStatusOutcome {
        let result = self.write(|repo| {
            if repo.get_book(id)?.is_none() {
                return Ok(UpdateStatusOutcome::NotFound(id));
            }
            repo.set_status(id, status)?;
            Ok(UpdateStatusOutcome::Updated {
                id,
                status: status.to_string(),
            })
        });

        match result {
            Ok(outcome @ UpdateStatusOutcome::Updated { .. }) => {
                info!(
                    "event=catalog_update_status module=service status=ok book_id={id} new_status={status}"
                );
                outcome
            }
            Ok(outcome) => {
                warn!("event=catalog_update_status module=service status=rejected reason=not_found book_id={id}");
                outcome
            }
            Err(err) => {
                error!(
                    "event=catalog_update_status module=service status=error book_id={id} error={err}"
                );
                UpdateStatusOutcome::Failed(err.to_string())
            }
        }
    }

    fn read<T>(
        &self,
        work: impl FnOnce(&SqliteBookRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = self.connect()?;
        work(&SqliteBookRepository::new(&conn))
    }

    fn write<T>(
        &self,
        work: impl FnOnce(&SqliteBookRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut conn = self.connect()?;
        // Immediate: take the write lock before the existence check.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = work(&SqliteBookRepository::new(&tx))?;
        tx.commit()?;
        Ok(value)
    }
}
