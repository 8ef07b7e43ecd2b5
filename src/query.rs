//! Read-only queries over a loaded `CourseStore`.
//!
//! `describe` resolves each prerequisite key with a second store lookup. A
//! prerequisite that is not in the catalog is reported as
//! `PrereqTitle::Missing` and never fails the surrounding lookup.

use crate::catalog::{Course, CourseKey, CourseStore};
use serde::{Serialize, Serializer};
use std::fmt;

/// Placeholder shown for a prerequisite whose key is not in the catalog.
pub const MISSING_TITLE: &str = "title not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// One line of the course listing.
pub struct CourseSummary<'a> {
    pub key: &'a CourseKey,
    pub title: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrereqTitle {
    Known(String),
    Missing,
}

impl PrereqTitle {
    pub fn as_str(&self) -> &str {
        match self {
            PrereqTitle::Known(title) => title,
            PrereqTitle::Missing => MISSING_TITLE,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, PrereqTitle::Missing)
    }
}

impl fmt::Display for PrereqTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PrereqTitle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PrereqTitle::Known(title) => serializer.serialize_some(title),
            PrereqTitle::Missing => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPrereq {
    pub key: CourseKey,
    pub title: PrereqTitle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A course plus its prerequisites, each paired with the title it resolves to.
pub struct CourseDetail {
    pub key: CourseKey,
    pub title: String,
    pub prerequisites: Vec<ResolvedPrereq>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(CourseDetail),
    /// Carries the normalized key that was searched for.
    NotFound(CourseKey),
}

/// Query view borrowing a store.
#[derive(Clone, Copy)]
pub struct CatalogQuery<'a> {
    store: &'a CourseStore,
}

impl<'a> CatalogQuery<'a> {
    pub fn new(store: &'a CourseStore) -> Self {
        CatalogQuery { store }
    }

    /// Every course as `(key, title)` in ascending key order. An empty store
    /// yields an empty sequence; refusing to list is the caller's call.
    pub fn list_all(self) -> impl Iterator<Item = CourseSummary<'a>> + 'a {
        self.store.iter().map(|course| CourseSummary {
            key: &course.key,
            title: &course.title,
        })
    }

    pub fn describe(&self, key: &str) -> Lookup {
        let key = CourseKey::new(key);
        match self.store.find(key.as_str()) {
            Some(course) => Lookup::Found(self.detail(course)),
            None => Lookup::NotFound(key),
        }
    }

    fn detail(&self, course: &Course) -> CourseDetail {
        let prerequisites = course
            .prerequisites
            .iter()
            .map(|prereq| ResolvedPrereq {
                key: prereq.clone(),
                title: match self.store.find(prereq.as_str()) {
                    Some(found) => PrereqTitle::Known(found.title.clone()),
                    None => PrereqTitle::Missing,
                },
            })
            .collect();

        CourseDetail {
            key: course.key.clone(),
            title: course.title.clone(),
            prerequisites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_record;

    fn store_from(lines: &[&str]) -> CourseStore {
        let mut store = CourseStore::new();
        for line in lines {
            store.insert(parse_record(line).unwrap());
        }
        store
    }

    #[test]
    fn list_all_is_sorted_by_key() {
        let store = store_from(&[
            "MATH201,Discrete Mathematics",
            "CS200,Data Structures,CS100",
            "CS100,Intro",
        ]);
        let query = CatalogQuery::new(&store);
        let listed: Vec<(&str, &str)> = query
            .list_all()
            .map(|summary| (summary.key.as_str(), summary.title))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("CS100", "Intro"),
                ("CS200", "Data Structures"),
                ("MATH201", "Discrete Mathematics"),
            ]
        );
    }

    #[test]
    fn list_all_on_empty_store_is_empty() {
        let store = CourseStore::new();
        assert_eq!(CatalogQuery::new(&store).list_all().count(), 0);
    }

    #[test]
    fn describe_resolves_known_and_dangling_prerequisites() {
        let store = store_from(&["CS100,Intro", "CS200,Data Structures,CS100,MATH101"]);
        let Lookup::Found(detail) = CatalogQuery::new(&store).describe("cs200") else {
            panic!("CS200 should be present");
        };

        assert_eq!(detail.key.as_str(), "CS200");
        assert_eq!(detail.title, "Data Structures");
        assert_eq!(detail.prerequisites.len(), 2);
        assert_eq!(detail.prerequisites[0].key.as_str(), "CS100");
        assert_eq!(detail.prerequisites[0].title, PrereqTitle::Known("Intro".into()));
        assert_eq!(detail.prerequisites[1].key.as_str(), "MATH101");
        assert!(detail.prerequisites[1].title.is_missing());
        assert_eq!(detail.prerequisites[1].title.to_string(), MISSING_TITLE);
    }

    #[test]
    fn describe_keeps_prerequisite_order_and_repeats() {
        let store = store_from(&["A1,Alpha", "B1,Beta", "C1,Gamma,B1,A1,B1"]);
        let Lookup::Found(detail) = CatalogQuery::new(&store).describe("C1") else {
            panic!("C1 should be present");
        };
        let order: Vec<&str> = detail
            .prerequisites
            .iter()
            .map(|prereq| prereq.title.as_str())
            .collect();
        assert_eq!(order, vec!["Beta", "Alpha", "Beta"]);
    }

    #[test]
    fn describe_missing_key_reports_normalized_key() {
        let store = store_from(&["CS100,Intro"]);
        assert_eq!(
            CatalogQuery::new(&store).describe("  cs999 "),
            Lookup::NotFound(CourseKey::new("CS999"))
        );
    }

    #[test]
    fn detail_serializes_missing_titles_as_null() {
        let store = store_from(&["CS200,Data Structures,CS100"]);
        let Lookup::Found(detail) = CatalogQuery::new(&store).describe("CS200") else {
            panic!("CS200 should be present");
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["key"], "CS200");
        assert_eq!(json["prerequisites"][0]["key"], "CS100");
        assert!(json["prerequisites"][0]["title"].is_null());
    }
}
