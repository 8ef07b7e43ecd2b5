//! Interactive advising menu.
//!
//! The menu owns the course store for the session and talks to the user over
//! any `BufRead`/`Write` pair. Options 2 and 3 stay locked until a load
//! produces at least one course; a failed or empty load locks them again.
//! End of input is treated like choosing Exit.
//!
//! Input is read as a token stream: `1 courses.csv` on one line picks Load
//! and answers the file prompt, and `3 cs200` describes CS200.

use crate::catalog::CourseStore;
use crate::loader::{LoadError, LoadStatus, load_path};
use crate::query::{CatalogQuery, Lookup};
use crate::render::{NO_DATA_MESSAGE, write_course_detail, write_course_list, write_load_report};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Load,
    List,
    Describe,
    Exit,
    Unknown,
}

impl MenuChoice {
    fn from_number(value: i64) -> Self {
        match value {
            1 => MenuChoice::Load,
            2 => MenuChoice::List,
            3 => MenuChoice::Describe,
            9 => MenuChoice::Exit,
            _ => MenuChoice::Unknown,
        }
    }
}

pub struct AdvisingMenu<R, W> {
    input: R,
    output: W,
    store: CourseStore,
    data_loaded: bool,
    default_catalog: Option<PathBuf>,
    /// Unconsumed remainder of the last line read, already trimmed.
    pending: Option<String>,
}

impl<R: BufRead, W: Write> AdvisingMenu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        AdvisingMenu {
            input,
            output,
            store: CourseStore::new(),
            data_loaded: false,
            default_catalog: None,
            pending: None,
        }
    }

    /// File to load when the user answers the file prompt with an empty line.
    pub fn with_default_catalog(mut self, path: Option<PathBuf>) -> Self {
        self.default_catalog = path;
        self
    }

    pub fn store(&self) -> &CourseStore {
        &self.store
    }

    pub fn has_data(&self) -> bool {
        self.data_loaded
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user picks 9 or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(token) = self.read_token()? else {
                debug!("input closed; leaving menu");
                return Ok(());
            };

            let choice = match token.parse::<i64>() {
                Ok(number) => MenuChoice::from_number(number),
                Err(_) => {
                    self.pending = None;
                    writeln!(
                        self.output,
                        "Invalid input. Please enter a number from the menu."
                    )?;
                    continue;
                }
            };

            match choice {
                MenuChoice::Load => self.load()?,
                MenuChoice::List => self.list()?,
                MenuChoice::Describe => self.describe()?,
                MenuChoice::Exit => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                MenuChoice::Unknown => {
                    self.pending = None;
                    writeln!(self.output, "Invalid option. Please choose 1, 2, 3, or 9.")?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        write!(
            self.output,
            "\n===== ABCU Advising Assistance =====\n  1. Load Data Structure\n  2. Print Course List\n  3. Print Course Information\n  9. Exit\nSelect an option: "
        )
    }

    fn load(&mut self) -> io::Result<()> {
        write!(self.output, "Please enter the file name: ")?;
        let entry = match self.pending.take() {
            Some(rest) => rest,
            None => match self.read_line()? {
                Some(line) => line,
                None => return Ok(()),
            },
        };

        let path = match (entry.is_empty(), &self.default_catalog) {
            (false, _) => PathBuf::from(entry),
            (true, Some(default)) => default.clone(),
            (true, None) => {
                writeln!(self.output, "Error: No file name entered.")?;
                return Ok(());
            }
        };

        match load_path(&mut self.store, &path) {
            Ok(report) => {
                write_load_report(&mut self.output, &path, &report)?;
                self.data_loaded = report.status() == LoadStatus::Loaded;
            }
            Err(err) => {
                warn!(error = %err, "course catalog load failed");
                match err {
                    LoadError::SourceUnavailable { .. } => writeln!(
                        self.output,
                        "Error: Could not open file \"{}\".",
                        path.display()
                    )?,
                    LoadError::Read { line, .. } => writeln!(
                        self.output,
                        "Error: Could not read line {line} of \"{}\".",
                        path.display()
                    )?,
                }
                self.data_loaded = false;
            }
        }
        Ok(())
    }

    fn list(&mut self) -> io::Result<()> {
        if !self.data_loaded || self.store.is_empty() {
            return writeln!(self.output, "{NO_DATA_MESSAGE}");
        }
        write_course_list(&mut self.output, CatalogQuery::new(&self.store).list_all())
    }

    fn describe(&mut self) -> io::Result<()> {
        if !self.data_loaded || self.store.is_empty() {
            return writeln!(self.output, "{NO_DATA_MESSAGE}");
        }

        write!(self.output, "Enter course number: ")?;
        let Some(token) = self.read_token()? else {
            return Ok(());
        };

        match CatalogQuery::new(&self.store).describe(&token) {
            Lookup::Found(detail) => write_course_detail(&mut self.output, &detail),
            Lookup::NotFound(key) => writeln!(self.output, "Course \"{key}\" not found."),
        }
    }

    /// Next line with surrounding whitespace removed, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Next whitespace-separated token, skipping blank lines. Whatever follows
    /// the token on its line is kept for the next prompt.
    fn read_token(&mut self) -> io::Result<Option<String>> {
        let line = match self.pending.take() {
            Some(rest) => rest,
            None => loop {
                match self.read_line()? {
                    Some(line) if line.is_empty() => continue,
                    Some(line) => break line,
                    None => return Ok(None),
                }
            },
        };
        let (token, rest) = split_token(&line);
        self.pending = rest;
        Ok(Some(token))
    }
}

/// Split a trimmed, non-empty line into its first token and the trimmed rest.
fn split_token(line: &str) -> (String, Option<String>) {
    match line.split_once(char::is_whitespace) {
        Some((token, rest)) => {
            let rest = rest.trim();
            (token.to_string(), (!rest.is_empty()).then(|| rest.to_string()))
        }
        None => (line.to_string(), None),
    }
}
