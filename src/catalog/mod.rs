//! Course catalog core.
//!
//! `parser` turns raw CSV lines into normalized `Course` records and `store`
//! keeps them ordered by key. Loading and querying live one level up in
//! `loader` and `query`; this module only owns the data and its invariants.

pub mod identity;
pub mod model;
pub mod parser;
pub mod store;

pub use identity::{CourseKey, normalize_key};
pub use model::Course;
pub use parser::{FIELD_DELIMITER, MalformedRecord, parse_record};
pub use store::{CourseStore, Insertion, Iter};
