#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const SAMPLE_CATALOG: &[&str] = &[
    "CSCI300,Introduction to Algorithms,CSCI200,MATH201",
    "CSCI350,Operating Systems,CSCI300",
    "CSCI101,Introduction to Programming in C++,CSCI100",
    "CSCI100,Introduction to Computer Science",
    "CSCI301,Advanced Programming in C++,CSCI101",
    "CSCI400,Large Software Development,CSCI301,CSCI350",
    "CSCI200,Data Structures,CSCI101",
    "MATH201,Discrete Mathematics",
];

/// Write `lines` (newline-terminated) to `name` inside `dir`.
pub fn write_catalog(dir: &TempDir, name: &str, lines: &[&str]) -> Result<PathBuf> {
    let path = dir.path().join(name);
    let mut body = lines.join("\n");
    body.push('\n');
    fs::write(&path, body).with_context(|| format!("writing fixture {}", path.display()))?;
    Ok(path)
}

pub fn catalog_query_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_catalog-query"))
}

pub fn catalog_query(args: &[&str], catalog: Option<&Path>) -> Command {
    let mut cmd = Command::new(catalog_query_binary());
    cmd.args(args);
    cmd.env_remove("ADVISING_CATALOG_FILE");
    cmd.env("ADVISING_LOG", "off");
    if let Some(path) = catalog {
        cmd.arg("--file").arg(path);
    }
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
