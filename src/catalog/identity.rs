use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized course identifier (e.g., `CS200`).
///
/// Keys are trimmed and ASCII-uppercased on construction, so two keys that
/// differ only in case or surrounding whitespace compare equal. Ordering is the
/// byte-wise ordering of the normalized string.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseKey(String);

impl CourseKey {
    /// Normalize raw input into a key. Normalizing an already-normalized key is
    /// a no-op.
    pub fn new(raw: &str) -> Self {
        CourseKey(normalize_key(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CourseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim surrounding whitespace and uppercase ASCII letters.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
