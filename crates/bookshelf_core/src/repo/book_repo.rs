//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide row-level APIs over the `library` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Repositories borrow a connection (or transaction) and never open one.
//! - Write paths touch at most one row.
//! - Status updates never modify title, author or year.

use crate::db::DbError;
use crate::model::book::{Book, BookId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    year,
    status
FROM library";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(BookId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the `library` table.
pub trait BookRepository {
    /// Gets one book by id.
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Finds the stored row sharing `book`'s (title, author, year) triple.
    fn find_same_edition(&self, book: &Book) -> RepoResult<Option<Book>>;
    /// Inserts `book` and returns the store-assigned id. Ignores `book.id`.
    fn insert_book(&self, book: &Book) -> RepoResult<BookId>;
    /// Hard-deletes one row.
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
    /// Replaces the status text of one row.
    fn set_status(&self, id: BookId, status: &str) -> RepoResult<()>;
    /// Lists every row.
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Matches title/author substrings or an exact year.
    fn search_books(&self, text: &str) -> RepoResult<Vec<Book>>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Wraps a connection whose schema is already in place.
    ///
    /// A `rusqlite::Transaction` derefs to `Connection`, so repository calls
    /// can run inside a caller-owned transaction.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let book = self
            .conn
            .query_row(
                &format!("{BOOK_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_book_row,
            )
            .optional()?;
        Ok(book)
    }

    fn find_same_edition(&self, book: &Book) -> RepoResult<Option<Book>> {
        let existing = self
            .conn
            .query_row(
                &format!("{BOOK_SELECT_SQL} WHERE title = ?1 AND author = ?2 AND year = ?3 LIMIT 1;"),
                params![book.title.as_str(), book.author.as_str(), book.year],
                parse_book_row,
            )
            .optional()?;
        Ok(existing)
    }

    fn insert_book(&self, book: &Book) -> RepoResult<BookId> {
        self.conn.execute(
            "INSERT INTO library (title, author, year, status) VALUES (?1, ?2, ?3, ?4);",
            params![
                book.title.as_str(),
                book.author.as_str(),
                book.year,
                book.status.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM library WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn set_status(&self, id: BookId, status: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE library SET status = ?1 WHERE id = ?2;",
            params![status, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id;"))?;
        let books = stmt
            .query_map([], parse_book_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(books)
    }

    fn search_books(&self, text: &str) -> RepoResult<Vec<Book>> {
        let pattern = format!("%{}%", escape_like(text));

        // `year` has INTEGER affinity, so numeric text such as "1965.0" is
        // converted before comparing; other text never equals a year.
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL}
             WHERE title LIKE ?1 ESCAPE '\\'
                OR author LIKE ?1 ESCAPE '\\'
                OR year = ?2
             ORDER BY id;"
        ))?;
        let books = stmt
            .query_map(params![pattern, text], parse_book_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(books)
    }
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        author: row.get("author")?,
        year: row.get("year")?,
        status: row.get("status")?,
    })
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
