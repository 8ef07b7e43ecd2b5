//! Environment-driven settings shared by the binaries.
//!
//! Only two knobs exist: a default catalog file and the log filter. Empty
//! values are treated as unset so `VAR=` in a shell does not select an empty
//! path.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

pub const CATALOG_FILE_ENV: &str = "ADVISING_CATALOG_FILE";
pub const LOG_FILTER_ENV: &str = "ADVISING_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub default_catalog: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_catalog: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_vars(env::var_os(CATALOG_FILE_ENV), env::var_os(LOG_FILTER_ENV))
    }

    fn from_vars(catalog: Option<OsString>, log_filter: Option<OsString>) -> Self {
        let default_catalog = catalog
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let log_filter = log_filter
            .and_then(|value| value.into_string().ok())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Settings {
            default_catalog,
            log_filter,
        }
    }
}
