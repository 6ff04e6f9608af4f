//! Tracing setup for the dashboard.
//!
//! Each launch writes to stdout and to its own timestamped file under
//! `.recdash/logs`. Only the newest files are kept.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs;

/// Maximum number of log files to retain.
const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "recdash";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log directory could not be resolved or created.
    #[error("Log directory unavailable: {0}")]
    Directory(#[from] app_dirs::AppDirError),
    /// Failed to enumerate existing log files for pruning.
    #[error("Failed to read log directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to remove an obsolete log file.
    #[error("Failed to remove old log file {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to format a timestamp for the log filename.
    #[error("Failed to format log filename time: {0}")]
    FormatTime(time::error::Format),
    /// Failed to create the log file for this launch.
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber writing to stdout and a per-launch file.
///
/// Calling this again after a successful init does nothing. Errors are
/// returned so `main` can carry on without file logging.
pub fn init() -> Result<PathBuf, LoggingError> {
    let log_dir = app_dirs::logs_dir()?;
    init_in(&log_dir)
}

fn init_in(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    let log_file_name = format_log_file_name(now_local_or_utc())?;
    let log_path = log_dir.join(&log_file_name);
    if LOG_GUARD.get().is_some() {
        return Ok(log_path);
    }
    touch(&log_path)?;
    prune_old_logs(log_dir, MAX_LOG_FILES)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::never(log_dir, &log_file_name));
    let timer = build_timer();
    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!(path = %log_path.display(), "Logging initialized");
    Ok(log_path)
}

fn touch(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| LoggingError::CreateLogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn prune_old_logs(dir: &Path, max_files: usize) -> Result<(), LoggingError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|source| LoggingError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
        .filter(|entry| entry.path().extension().and_then(|ext| ext.to_str()) == Some("log"))
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect::<Vec<_>>();

    // Newest first; everything past the limit goes.
    entries.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, path) in entries.into_iter().skip(max_files) {
        fs::remove_file(&path).map_err(|source| LoggingError::RemoveFile { path, source })?;
    }
    Ok(())
}

fn format_log_file_name(now: OffsetDateTime) -> Result<String, LoggingError> {
    const NAME_FORMAT: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    let name = now.format(NAME_FORMAT).map_err(LoggingError::FormatTime)?;
    Ok(format!("{LOG_FILE_PREFIX}_{name}.log"))
}

fn build_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};
    use tempfile::tempdir;

    #[test]
    fn log_filename_has_timestamp_and_prefix() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let name = format_log_file_name(fixed).unwrap();
        assert_eq!(name, "recdash_2023-11-14_22-13-20.log");
    }

    #[test]
    fn prune_keeps_newest_files() {
        let dir = tempdir().unwrap();
        for idx in 0..12 {
            touch(&dir.path().join(format!("recdash_{idx}.log"))).unwrap();
            thread::sleep(Duration::from_millis(10));
        }
        touch(&dir.path().join("notes.txt")).unwrap();

        prune_old_logs(dir.path(), 10).unwrap();

        let mut remaining: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        remaining.sort();
        assert_eq!(remaining.len(), 11);
        assert!(remaining.contains(&"notes.txt".to_string()));
        assert!(!remaining.contains(&"recdash_0.log".to_string()));
        assert!(!remaining.contains(&"recdash_1.log".to_string()));
        assert!(remaining.contains(&"recdash_11.log".to_string()));
    }
}
