//! Catalog use-case services.
//!
//! # Responsibility
//! - Run each catalog intent as one scoped unit of work.
//! - Keep menu callers decoupled from connections and SQL errors.

pub mod catalog_store;
