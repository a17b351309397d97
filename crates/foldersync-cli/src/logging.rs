//! Log destination selection and tracing subscriber setup
//!
//! Every progress and failure line goes to both stdout and a logfile
//! under `logs/`. A fresh timestamped file is the default; the `LAST`
//! sentinel appends to the most recent existing one instead.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

const LOG_DIR: &str = "logs";
const LOG_PREFIX: &str = "sync_log-";
const LAST_SENTINEL: &str = "LAST";

/// Pick the logfile path from the CLI argument
///
/// # Errors
///
/// Returns an error only when `LAST` is given and the log directory
/// exists but cannot be read.
pub fn resolve_logfile(arg: Option<&str>) -> Result<PathBuf> {
    match arg {
        Some(LAST_SENTINEL) => last_logfile(Path::new(LOG_DIR)),
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(generated_logfile_name()),
    }
}

/// Default logfile name: `logs/sync_log-YYMMDD_hhmmss.log`
fn generated_logfile_name() -> PathBuf {
    let timestamp = Local::now().format("%y%m%d_%H%M%S");
    Path::new(LOG_DIR).join(format!("{LOG_PREFIX}{timestamp}.log"))
}

/// Most recent `sync_log-*.log` in `log_dir`, or a fresh name if none exist
fn last_logfile(log_dir: &Path) -> Result<PathBuf> {
    if !log_dir.exists() {
        return Ok(generated_logfile_name());
    }

    let mut names: Vec<String> = fs::read_dir(log_dir)
        .with_context(|| format!("Failed to read log directory: {}", log_dir.display()))?
        .filter_map(std::result::Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(LOG_PREFIX) && name.ends_with(".log"))
        .collect();

    // Timestamped names sort chronologically
    names.sort();
    match names.pop() {
        Some(newest) => Ok(log_dir.join(newest)),
        None => Ok(generated_logfile_name()),
    }
}

/// Install a tracing subscriber writing to both stdout and the logfile
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the
/// logfile cannot be opened for appending.
pub fn init(logfile: &Path) -> Result<()> {
    if let Some(parent) = logfile.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(logfile)
        .with_context(|| format!("Failed to open logfile: {}", logfile.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stdout.and(Mutex::new(file)))
        .init();

    Ok(())
}
