//! Core data access for the Bookshelf catalog.
//! This crate owns the `library` table and every rule applied to it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CatalogConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookId, BookStatus};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::catalog_store::{
    AddOutcome, CatalogStore, DeleteOutcome, SearchOutcome, UpdateStatusOutcome,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
