//! Shared library for the advising catalog tools.
//!
//! The crate loads `KEY,TITLE[,PREREQ...]` course files into an ordered
//! in-memory store and answers two questions about them: the full course list
//! in key order, and one course with its prerequisites' titles. The
//! `advising` binary wraps this in an interactive menu; `catalog-query` runs a
//! single query and exits.
//!
//! Keys are normalized (trimmed, uppercased) at every entry point: when a
//! record is parsed and again when a lookup key arrives. Prerequisites are
//! plain keys and may name courses that are not in the file.

pub mod catalog;
pub mod config;
pub mod loader;
pub mod logging;
pub mod menu;
pub mod query;
pub mod render;

pub use catalog::{
    Course, CourseKey, CourseStore, FIELD_DELIMITER, Insertion, MalformedRecord, normalize_key,
    parse_record,
};
pub use config::Settings;
pub use loader::{LoadError, LoadReport, LoadStatus, RejectedLine, load_lines, load_path, load_reader};
pub use logging::init_logging;
pub use menu::AdvisingMenu;
pub use query::{
    CatalogQuery, CourseDetail, CourseSummary, Lookup, MISSING_TITLE, PrereqTitle, ResolvedPrereq,
};
