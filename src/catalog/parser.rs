//! Record parser for `KEY,TITLE[,PREREQ...]` lines.
//!
//! Parsing is pure: a line either becomes a normalized `Course` or a
//! `MalformedRecord` describing why it was refused. There is no escaping, so a
//! comma inside a title splits it.

use crate::catalog::identity::CourseKey;
use crate::catalog::model::Course;
use serde::Serialize;
use thiserror::Error;

pub const FIELD_DELIMITER: char = ',';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
/// Reasons a line cannot become a course.
pub enum MalformedRecord {
    #[error("expected at least a course number and a title")]
    TooFewFields,
    #[error("course number is empty")]
    EmptyKey,
    #[error("course title is empty")]
    EmptyTitle,
}

/// Parse one raw line into a course.
///
/// Fields are trimmed; the key and every prerequisite are uppercased, the title
/// is kept as written. Prerequisite fields that trim to nothing are dropped
/// without complaint.
pub fn parse_record(line: &str) -> Result<Course, MalformedRecord> {
    let mut fields = line.split(FIELD_DELIMITER).map(str::trim);

    let (Some(raw_key), Some(title)) = (fields.next(), fields.next()) else {
        return Err(MalformedRecord::TooFewFields);
    };

    let key = CourseKey::new(raw_key);
    if key.is_empty() {
        return Err(MalformedRecord::EmptyKey);
    }
    if title.is_empty() {
        return Err(MalformedRecord::EmptyTitle);
    }

    let prerequisites = fields
        .filter(|field| !field.is_empty())
        .map(CourseKey::new)
        .collect();

    Ok(Course::new(key, title, prerequisites))
}
