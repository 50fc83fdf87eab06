//! Bookshelf console entry point.
//!
//! # Responsibility
//! - Load configuration and start file logging when a log dir is set.
//! - Run the interactive menu over stdin/stdout.

mod format;
mod menu;

use bookshelf_core::{init_logging, CatalogConfig, CatalogStore};
use log::info;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CatalogConfig::from_env();

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("bookshelf: {err}");
            return ExitCode::FAILURE;
        }
    }

    let store = CatalogStore::from_config(&config);
    info!(
        "event=cli_start module=cli status=ok db_path={} core_version={}",
        store.db_path().display(),
        bookshelf_core::core_version()
    );

    let stdin = io::stdin();
    match menu::run(&store, stdin.lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bookshelf: terminal I/O failed: {err}");
            ExitCode::FAILURE
        }
    }
}
