//! Shared plumbing for the `mc-*` binaries: logging setup, report printing and
//! model file I/O.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use multicell_conformance::ConformanceReport;
use multicell_schema::ModelInstance;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "MULTICELL_LOG";

/// Installs a stderr log subscriber filtered by [`LOG_ENV`], defaulting to `warn`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))
}

/// Writes `report` in the human-readable layout and returns the failure count.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_report(out: &mut impl Write, title: &str, report: &ConformanceReport) -> Result<usize> {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))?;
    writeln!(out)?;
    for result in &report.results {
        writeln!(
            out,
            "[{}] {}: {}",
            result.severity.tag(),
            result.validator,
            result.message
        )?;
        for detail in &result.details {
            writeln!(out, "       {}", detail)?;
        }
    }
    writeln!(out)?;
    writeln!(
        out,
        "Summary: {} passed, {} warnings, {} failed",
        report.pass_count(),
        report.warning_count(),
        report.failure_count()
    )?;
    Ok(report.failure_count())
}

/// Reads and decodes a model document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a model document.
pub fn read_model(path: &Path) -> Result<ModelInstance> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} as a model document", path.display()))
}

/// Writes `text` to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file or stdout cannot be written.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")
        }
    }
}
