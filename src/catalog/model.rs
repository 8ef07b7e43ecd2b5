//! Course record held by the catalog store.
//!
//! A `Course` is what the record parser produces and what the store owns.
//! Prerequisites are plain keys into the same store; nothing guarantees they
//! resolve, and the query layer treats a missing target as an ordinary case.

use crate::catalog::identity::CourseKey;
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// One catalog entry: key, display title, and prerequisite keys in file order.
pub struct Course {
    pub key: CourseKey,
    pub title: String,
    pub prerequisites: Vec<CourseKey>,
}

impl Course {
    pub fn new(key: CourseKey, title: impl Into<String>, prerequisites: Vec<CourseKey>) -> Self {
        Course {
            key,
            title: title.into(),
            prerequisites,
        }
    }
}
