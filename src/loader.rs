//! Batch loading of course records into a `CourseStore`.
//!
//! A load always replaces the store's contents. Records are staged into a
//! fresh store and swapped in once the whole source has been read, so an
//! open or read failure leaves the caller's store exactly as it was. Within
//! one load, a repeated key overwrites the earlier record.

use crate::catalog::{CourseStore, Insertion, MalformedRecord, parse_record};
use serde::Serialize;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// A non-blank line the parser refused, with its 1-based line number.
pub struct RejectedLine {
    pub line: usize,
    pub reason: MalformedRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Loaded,
    /// The source was readable but produced no courses.
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Counters for one load.
///
/// `inserted` counts distinct new keys; a later line repeating a key bumps
/// `updated` instead. Blank lines are counted separately and never rejected.
pub struct LoadReport {
    pub inserted: usize,
    pub updated: usize,
    pub blank_lines: usize,
    pub rejected: Vec<RejectedLine>,
}

impl LoadReport {
    pub fn status(&self) -> LoadStatus {
        if self.inserted == 0 {
            LoadStatus::Empty
        } else {
            LoadStatus::Loaded
        }
    }

    /// Records that parsed, counting overwrites.
    pub fn parsed(&self) -> usize {
        self.inserted + self.updated
    }

    pub fn rejected_lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.rejected.iter().map(|rejected| rejected.line)
    }
}

/// Open `path` and load it into `store`.
pub fn load_path(store: &mut CourseStore, path: &Path) -> Result<LoadReport, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let report = load_reader(store, BufReader::new(file))?;
    info!(
        path = %path.display(),
        inserted = report.inserted,
        updated = report.updated,
        rejected = report.rejected.len(),
        "loaded course catalog"
    );
    Ok(report)
}

/// Load every line of `reader` into `store`.
///
/// Lines are split on `\n` with a trailing `\r` dropped. Bytes that are not
/// valid UTF-8 are replaced with U+FFFD rather than failing the load; only an
/// I/O error from the reader aborts.
pub fn load_reader<R: BufRead>(store: &mut CourseStore, mut reader: R) -> Result<LoadReport, LoadError> {
    let mut staging = Staging::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        line_number += 1;
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LoadError::Read {
                line: line_number,
                source,
            })?;
        if read == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            debug!(line = line_number, "replaced invalid UTF-8 in course record");
        }
        staging.feed(line_number, &line);
    }

    Ok(staging.finish(store))
}

/// Load an already-split line sequence into `store`.
///
/// Line numbers in the report are 1-based positions in `lines`, blank lines
/// included.
pub fn load_lines<I, S>(store: &mut CourseStore, lines: I) -> Result<LoadReport, LoadError>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut staging = Staging::default();

    for (idx, line) in lines.into_iter().enumerate() {
        let line_number = idx + 1;
        let line = line.map_err(|source| LoadError::Read {
            line: line_number,
            source,
        })?;
        staging.feed(line_number, line.as_ref());
    }

    Ok(staging.finish(store))
}

// Courses collected so far in one load; swapped into the caller's store only
// once the source is exhausted.
#[derive(Default)]
struct Staging {
    store: CourseStore,
    report: LoadReport,
}

impl Staging {
    fn feed(&mut self, line_number: usize, line: &str) {
        if line.trim().is_empty() {
            self.report.blank_lines += 1;
            return;
        }

        match parse_record(line) {
            Ok(course) => match self.store.insert(course) {
                Insertion::Inserted => self.report.inserted += 1,
                Insertion::Updated => self.report.updated += 1,
            },
            Err(reason) => {
                debug!(line = line_number, %reason, "skipping malformed course record");
                self.report.rejected.push(RejectedLine {
                    line: line_number,
                    reason,
                });
            }
        }
    }

    fn finish(self, store: &mut CourseStore) -> LoadReport {
        let Staging {
            store: staged,
            report,
        } = self;

        debug!(
            blank_lines = report.blank_lines,
            parsed = report.parsed(),
            "finished reading course records"
        );
        if report.status() == LoadStatus::Empty {
            warn!(
                rejected = report.rejected.len(),
                "course source contained no valid records"
            );
        }

        *store = staged;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ok_lines<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = io::Result<&'a str>> + 'a {
        lines.iter().map(|line| Ok::<_, io::Error>(*line))
    }

    #[test]
    fn blank_lines_are_skipped_and_bad_lines_reported() {
        let mut store = CourseStore::new();
        let report = load_lines(
            &mut store,
            ok_lines(&["CS100,Intro", "", "CS200,Data Structures,CS100", "bad_line"]),
        )
        .unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(report.blank_lines, 1);
        assert_eq!(report.rejected_lines().collect::<Vec<_>>(), vec![4]);
        assert_eq!(report.rejected[0].reason, MalformedRecord::TooFewFields);
        assert_eq!(report.status(), LoadStatus::Loaded);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn duplicate_keys_overwrite_within_one_load() {
        let mut store = CourseStore::new();
        let report = load_lines(&mut store, ok_lines(&["CS100,Intro", "CS100,Introduction"])).unwrap();

        assert_eq!(report.inserted, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(report.parsed(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.find("CS100").unwrap().title, "Introduction");
    }

    #[test]
    fn second_load_replaces_prior_contents() {
        let mut store = CourseStore::new();
        load_lines(&mut store, ok_lines(&["CS100,Intro", "CS200,Data"])).unwrap();
        load_lines(&mut store, ok_lines(&["MATH201,Discrete"])).unwrap();

        let keys: Vec<&str> = store.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["MATH201"]);
    }

    #[test]
    fn whitespace_only_source_is_an_empty_result() {
        let mut store = CourseStore::new();
        load_lines(&mut store, ok_lines(&["CS100,Intro"])).unwrap();

        let report = load_reader(&mut store, Cursor::new("  \n\t\nnot a record\n")).unwrap();
        assert_eq!(report.status(), LoadStatus::Empty);
        assert_eq!(report.blank_lines, 2);
        assert_eq!(report.rejected_lines().collect::<Vec<_>>(), vec![3]);
        assert!(store.is_empty());
    }

    #[test]
    fn read_failure_leaves_store_untouched() {
        let mut store = CourseStore::new();
        load_lines(&mut store, ok_lines(&["CS100,Intro"])).unwrap();

        let lines: Vec<io::Result<String>> = vec![
            Ok("CS200,Data".to_string()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad bytes")),
        ];
        let err = load_lines(&mut store, lines).unwrap_err();
        assert!(matches!(err, LoadError::Read { line: 2, .. }));
        assert_eq!(store.len(), 1);
        assert!(store.contains("CS100"));
    }

    #[test]
    fn undecodable_bytes_do_not_abort_the_load() {
        let mut store = CourseStore::new();
        let bytes: &[u8] = b"CS100,Intro\nFR101,Fran\xe7ais I\nCS200,Data,CS100\n";
        let report = load_reader(&mut store, Cursor::new(bytes)).unwrap();

        assert_eq!(report.inserted, 3);
        assert!(report.rejected.is_empty());
        let french = store.find("FR101").unwrap();
        assert_eq!(french.title, "Fran\u{FFFD}ais I");
        assert_eq!(store.find("CS200").unwrap().prerequisites[0].as_str(), "CS100");
    }

    #[test]
    fn undecodable_key_is_still_reported_per_line() {
        let mut store = CourseStore::new();
        let bytes: &[u8] = b"CS100,Intro\n\xff\xfe\nCS200,Data\n";
        let report = load_reader(&mut store, Cursor::new(bytes)).unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(report.rejected_lines().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn reader_error_is_a_read_failure() {
        struct FailingReader;

        impl io::Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk went away"))
            }
        }

        let mut store = CourseStore::new();
        load_lines(&mut store, ok_lines(&["CS100,Intro"])).unwrap();
        let err = load_reader(&mut store, BufReader::new(FailingReader)).unwrap_err();
        assert!(matches!(err, LoadError::Read { line: 1, .. }));
        assert!(store.contains("CS100"));
    }

    #[test]
    fn final_line_without_newline_is_loaded() {
        let mut store = CourseStore::new();
        let report = load_reader(&mut store, Cursor::new("CS100,Intro\r\nCS200,Data")).unwrap();
        assert_eq!(report.inserted, 2);
        assert_eq!(store.find("CS100").unwrap().title, "Intro");
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let mut store = CourseStore::new();
        load_lines(&mut store, ok_lines(&["CS100,Intro"])).unwrap();

        let err = load_path(&mut store, &path).unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
        assert!(err.to_string().contains("missing.csv"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        let mut store = CourseStore::new();
        let report = load_reader(&mut store, Cursor::new("CS100,Intro\r\nCS200,Data,cs100\r\n")).unwrap();
        assert_eq!(report.inserted, 2);
        let cs200 = store.find("CS200").unwrap();
        assert_eq!(cs200.title, "Data");
        assert_eq!(cs200.prerequisites[0].as_str(), "CS100");
    }
}
