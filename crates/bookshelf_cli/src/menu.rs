//! Interactive text menu over the catalog store.
//!
//! # Responsibility
//! - Collect operator input and hand well-formed arguments to the store.
//! - Print outcome messages and formatted rows.
//!
//! # Invariants
//! - Malformed ids and years are re-prompted, never passed to the store.
//! - End of input ends the session like the exit command.

use crate::format::format_books;
use bookshelf_core::{Book, BookId, BookStatus, CatalogStore, SearchOutcome};
use log::debug;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const WELCOME: &str = "Welcome to the Bookshelf catalog manager!
Choose one of 6 commands:
1. Add a book
2. Delete a book
3. Search books
4. List all books
5. Change book status
6. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Add,
    Delete,
    Search,
    ListAll,
    ChangeStatus,
    Exit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::Add),
            "2" => Some(Self::Delete),
            "3" => Some(Self::Search),
            "4" => Some(Self::ListAll),
            "5" => Some(Self::ChangeStatus),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Maps a menu answer onto a recognized status.
///
/// Accepts the option number or the stored spelling.
fn parse_status_choice(input: &str) -> Option<BookStatus> {
    match input {
        "1" => Some(BookStatus::Available),
        "2" => Some(BookStatus::CheckedOut),
        other => BookStatus::parse(other),
    }
}

/// Runs the menu until the exit command or end of input.
pub fn run<R: BufRead, W: Write>(store: &CatalogStore, input: R, output: W) -> io::Result<()> {
    Menu {
        store,
        input,
        output,
    }
    .run()
}

struct Menu<'a, R, W> {
    store: &'a CatalogStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{WELCOME}")?;

        loop {
            let Some(answer) = self.prompt("\nEnter command number: ")? else {
                break;
            };
            let Some(command) = Command::parse(&answer) else {
                writeln!(self.output, "Unknown command. Enter a number from 1 to 6.")?;
                continue;
            };
            debug!("event=menu_command module=cli status=ok command={command:?}");

            let handled = match command {
                Command::Add => self.add()?,
                Command::Delete => self.delete()?,
                Command::Search => self.search()?,
                Command::ListAll => self.list_all()?,
                Command::ChangeStatus => self.change_status()?,
                Command::Exit => None,
            };
            if handled.is_none() {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()
    }

    // Handlers return `None` when input ended mid-command.

    fn add(&mut self) -> io::Result<Option<()>> {
        let Some(title) = self.prompt_non_empty("Title: ")? else {
            return Ok(None);
        };
        let Some(author) = self.prompt_non_empty("Author: ")? else {
            return Ok(None);
        };
        let Some(year) = self.prompt_number::<i64>("Publication year: ")? else {
            return Ok(None);
        };
        let Some(status) = self.prompt_status(true)? else {
            return Ok(None);
        };

        let book = Book::with_status(title, author, year, status.as_str());
        let outcome = self.store.add(&book);
        writeln!(self.output, "{outcome}")?;
        Ok(Some(()))
    }

    fn delete(&mut self) -> io::Result<Option<()>> {
        let Some(id) = self.prompt_number::<BookId>("Book id: ")? else {
            return Ok(None);
        };
        let outcome = self.store.delete(id);
        writeln!(self.output, "{outcome}")?;
        Ok(Some(()))
    }

    fn search(&mut self) -> io::Result<Option<()>> {
        let Some(query) = self.prompt("Search by title, author or year: ")? else {
            return Ok(None);
        };
        let outcome = self.store.search(&query);
        writeln!(self.output, "{outcome}")?;
        if let SearchOutcome::Found(books) = &outcome {
            writeln!(self.output, "{}", format_books(books))?;
        }
        Ok(Some(()))
    }

    fn list_all(&mut self) -> io::Result<Option<()>> {
        let books = self.store.list_all();
        writeln!(self.output, "{}", format_books(&books))?;
        Ok(Some(()))
    }

    fn change_status(&mut self) -> io::Result<Option<()>> {
        let Some(id) = self.prompt_number::<BookId>("Book id: ")? else {
            return Ok(None);
        };
        let Some(status) = self.prompt_status(false)? else {
            return Ok(None);
        };
        let outcome = self.store.update_status(id, status.as_str());
        writeln!(self.output, "{outcome}")?;
        Ok(Some(()))
    }

    /// Reads one trimmed line. `None` on end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_non_empty(&mut self, label: &str) -> io::Result<Option<String>> {
        loop {
            match self.prompt(label)? {
                Some(value) if value.is_empty() => {
                    writeln!(self.output, "Value cannot be empty.")?;
                }
                other => return Ok(other),
            }
        }
    }

    fn prompt_number<T: FromStr>(&mut self, label: &str) -> io::Result<Option<T>> {
        loop {
            let Some(raw) = self.prompt(label)? else {
                return Ok(None);
            };
            match raw.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a whole number.")?,
            }
        }
    }

    fn prompt_status(&mut self, allow_default: bool) -> io::Result<Option<BookStatus>> {
        let label = if allow_default {
            "Status (1 = available, 2 = checked-out, empty = available): "
        } else {
            "New status (1 = available, 2 = checked-out): "
        };
        loop {
            let Some(raw) = self.prompt(label)? else {
                return Ok(None);
            };
            if allow_default && raw.is_empty() {
                return Ok(Some(BookStatus::Available));
            }
            match parse_status_choice(&raw) {
                Some(status) => return Ok(Some(status)),
                None => writeln!(self.output, "Choose 1 or 2.")?,
            }
        }
    }
}
