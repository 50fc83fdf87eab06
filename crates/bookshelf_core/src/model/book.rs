//! Book catalog record.
//!
//! # Responsibility
//! - Define the single record shape persisted in the `library` table.
//! - Name the status values recognized by menu callers.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one on insert.
//! - `title`, `author` and `year` never change after insert; only `status`
//!   is mutable through the catalog store.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier.
pub type BookId = i64;

/// Status text written by [`Book::new`].
pub const DEFAULT_STATUS: &str = "available";

/// Display label for rows persisted without a status.
pub const UNSPECIFIED_STATUS_LABEL: &str = "Not specified";

/// Availability values offered by the menu.
///
/// The store persists status as free text, so rows may carry values outside
/// this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookStatus {
    /// On the shelf.
    Available,
    /// Lent out.
    CheckedOut,
}

impl BookStatus {
    /// Returns the text persisted for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::CheckedOut => "checked-out",
        }
    }

    /// Parses persisted status text. Returns `None` for free-form values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(Self::Available),
            "checked-out" => Some(Self::CheckedOut),
            _ => None,
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    pub title: String,
    pub author: String,
    /// Publication year. Not range-checked.
    pub year: i64,
    /// `None` only for rows stored with a NULL status.
    pub status: Option<String>,
}

impl Book {
    /// Creates an unsaved book with the default `available` status.
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i64) -> Self {
        Self::with_status(title, author, year, DEFAULT_STATUS)
    }

    /// Creates an unsaved book with a caller-chosen status text.
    pub fn with_status(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
        status: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            year,
            status: Some(status.into()),
        }
    }

    /// Returns the status text, or `Not specified` when absent.
    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or(UNSPECIFIED_STATUS_LABEL)
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = self
            .id
            .map_or_else(|| "unsaved".to_string(), |id| id.to_string());
        write!(
            f,
            "Book({}, {}, {}, {}, {})",
            self.title,
            self.author,
            self.year,
            self.status_label(),
            id
        )
    }
}
