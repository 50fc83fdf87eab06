//! Operator-facing rendering of catalog rows.

use bookshelf_core::Book;

const SEPARATOR_WIDTH: usize = 30;
const NO_DATA: &str = "No data to display.";

/// Renders each book as a labelled block followed by a dashed separator.
pub fn format_books(books: &[Book]) -> String {
    if books.is_empty() {
        return NO_DATA.to_string();
    }

    let separator = "-".repeat(SEPARATOR_WIDTH);
    books
        .iter()
        .map(|book| {
            let id = book
                .id
                .map_or_else(|| "-".to_string(), |id| id.to_string());
            format!(
                "ID: {id}\nTitle: {}\nAuthor: {}\nYear: {}\nStatus: {}\n{separator}",
                book.title,
                book.author,
                book.year,
                book.status_label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
