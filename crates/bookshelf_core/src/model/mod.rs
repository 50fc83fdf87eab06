//! Catalog domain model.
//!
//! # Responsibility
//! - Define the book record handed between callers and the catalog store.
//!
//! # Invariants
//! - Records are identified by a store-assigned integer `BookId`.
//! - Deletion is a hard delete; ids are never reused.

pub mod book;
