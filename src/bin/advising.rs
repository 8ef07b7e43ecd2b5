//! Interactive advising menu over a course catalog file.
//!
//! Reads menu choices from stdin and prints results to stdout. Logging goes
//! to stderr and is filtered by `ADVISING_LOG`. When `ADVISING_CATALOG_FILE`
//! is set, an empty answer to the file prompt loads that file.

use advising_catalog::{AdvisingMenu, Settings, init_logging};
use anyhow::{Context, Result};
use std::io;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = Settings::from_env();
    init_logging(&settings.log_filter);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = AdvisingMenu::new(stdin.lock(), stdout.lock())
        .with_default_catalog(settings.default_catalog);
    menu.run().context("advising menu I/O failed")
}
