//! One-shot catalog query.
//!
//! Loads a course file, then either lists every course or describes one
//! course with its prerequisites. Output is the same text the advising menu
//! prints, or pretty JSON with `--json`. Skipped lines are reported on stderr.

use advising_catalog::render::{write_course_detail, write_course_list, write_json};
use advising_catalog::{
    CatalogQuery, CourseStore, LoadStatus, Lookup, Settings, init_logging, load_path,
};
use anyhow::{Context, Result, bail};
use serde_json::json;
use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = Settings::from_env();
    init_logging(&settings.log_filter);

    let args = CliArgs::parse(env::args_os().skip(1))?;
    let path = match args.file.or(settings.default_catalog) {
        Some(path) => path,
        None => bail!("no catalog file given; pass --file or set ADVISING_CATALOG_FILE"),
    };

    let mut store = CourseStore::new();
    let report = load_path(&mut store, &path)
        .with_context(|| format!("loading course catalog {}", path.display()))?;
    for line in report.rejected_lines() {
        eprintln!("warning: {}:{line}: invalid course record skipped", path.display());
    }
    if report.status() == LoadStatus::Empty {
        bail!("no valid courses found in {}", path.display());
    }

    let query = CatalogQuery::new(&store);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.action {
        Action::List => {
            if args.json {
                let listing: Vec<_> = query.list_all().collect();
                write_json(&mut out, &listing)?;
            } else {
                write_course_list(&mut out, query.list_all())?;
            }
        }
        Action::Describe(key) => match query.describe(&key) {
            Lookup::Found(detail) => {
                if args.json {
                    write_json(&mut out, &detail)?;
                } else {
                    write_course_detail(&mut out, &detail)?;
                }
            }
            Lookup::NotFound(key) => {
                if args.json {
                    write_json(&mut out, &json!({ "not_found": key }))?;
                    out.flush()?;
                    std::process::exit(2);
                }
                bail!("Course \"{key}\" not found.");
            }
        },
    }

    out.flush()?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    List,
    Describe(String),
}

#[derive(Debug)]
struct CliArgs {
    file: Option<PathBuf>,
    action: Action,
    json: bool,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = OsString>) -> Result<Self> {
        let mut file: Option<PathBuf> = None;
        let mut action: Option<Action> = None;
        let mut json = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--file" | "-f" => {
                    if file.is_some() {
                        bail!("--file may only be provided once");
                    }
                    file = Some(PathBuf::from(next_value(&mut args, "--file")?));
                }
                "--list" | "-l" => {
                    if action.is_some() {
                        bail!("choose exactly one of --list or --course");
                    }
                    action = Some(Action::List);
                }
                "--course" | "-c" => {
                    if action.is_some() {
                        bail!("choose exactly one of --list or --course");
                    }
                    let key = next_value(&mut args, "--course")?;
                    if key.trim().is_empty() {
                        bail!("--course requires a non-empty course number");
                    }
                    action = Some(Action::Describe(key));
                }
                "--json" => json = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        let Some(action) = action else {
            bail!("missing --list or --course\n{}", usage());
        };

        Ok(CliArgs { file, action, json })
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: catalog-query [--file PATH] (--list | --course KEY) [--json]\n\
Loads a KEY,TITLE[,PREREQ...] course file (default: $ADVISING_CATALOG_FILE) and prints the course list or one course with its prerequisites.\n"
}
