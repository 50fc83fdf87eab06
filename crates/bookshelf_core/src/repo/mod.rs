//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define row-level data access contracts for the catalog.
//! - Isolate SQLite query details from catalog orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Repositories do not log; the catalog store owns event logging.

pub mod book_repo;
