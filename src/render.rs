//! Text and JSON output for catalog query results.
//!
//! The text layout matches the advising menu: a framed course list and a
//! two-line course detail. Writers are generic so the menu and the one-shot
//! CLI share the same formatting and tests can capture it in a buffer.

use crate::loader::{LoadReport, LoadStatus};
use crate::query::{CourseDetail, CourseSummary};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

const RULE: &str = "----------------------------------------";

pub const NO_DATA_MESSAGE: &str =
    "No data loaded. Please choose option 1 to load a data file first.";

/// Write the framed `KEY: Title` listing.
pub fn write_course_list<'a, W, I>(out: &mut W, courses: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = CourseSummary<'a>>,
{
    writeln!(out, "\nCourse List (alphanumeric):")?;
    writeln!(out, "{RULE}")?;
    for course in courses {
        writeln!(out, "{}: {}", course.key, course.title)?;
    }
    writeln!(out, "{RULE}")
}

/// Write `KEY, Title` followed by the prerequisite line.
pub fn write_course_detail<W: Write>(out: &mut W, detail: &CourseDetail) -> io::Result<()> {
    writeln!(out, "\n{}, {}", detail.key, detail.title)?;
    writeln!(out, "Prerequisites: {}", prerequisite_line(detail))
}

/// `None`, or `KEY (Title)` pairs joined by `, `.
pub fn prerequisite_line(detail: &CourseDetail) -> String {
    if detail.prerequisites.is_empty() {
        return "None".to_string();
    }
    detail
        .prerequisites
        .iter()
        .map(|prereq| format!("{} ({})", prereq.key, prereq.title))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-line warnings plus the summary line for a finished load.
pub fn write_load_report<W: Write>(out: &mut W, source: &Path, report: &LoadReport) -> io::Result<()> {
    for line in report.rejected_lines() {
        writeln!(out, "Warning: Invalid line {line} skipped.")?;
    }
    match report.status() {
        LoadStatus::Empty => writeln!(out, "Warning: No valid courses found in file."),
        LoadStatus::Loaded => writeln!(
            out,
            "Loaded {} course(s) from \"{}\".",
            report.inserted,
            source.display()
        ),
    }
}

/// Pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
