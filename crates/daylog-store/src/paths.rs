//! Logs directory provisioning and log file naming

use chrono::{NaiveDate, Utc};
use daylog_core::{constants, Error, LogType, Result};
use once_cell::sync::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Resolved logs directory under the host's upload storage area.
///
/// Resolution runs at most once per instance: the outcome, including a
/// definitive failure, is cached until the owning process restarts.
pub struct LogDir {
    uploads_base: PathBuf,
    resolved: OnceCell<Option<PathBuf>>,
}

impl LogDir {
    pub fn new(uploads_base: impl Into<PathBuf>) -> Self {
        Self {
            uploads_base: uploads_base.into(),
            resolved: OnceCell::new(),
        }
    }

    /// Resolve the logs directory, provisioning it on first call.
    pub fn resolve(&self) -> Result<&Path> {
        match self.resolved.get_or_init(|| provision(&self.uploads_base)) {
            Some(path) => Ok(path.as_path()),
            None => Err(Error::DirectoryUnwritable(constants::logs_dir_under(
                &self.uploads_base,
            ))),
        }
    }

    /// Absolute path of today's (UTC) log file for the given type.
    pub fn file_for(&self, log_type: LogType) -> Result<PathBuf> {
        self.file_for_date(log_type, Utc::now().date_naive())
    }

    /// Path of the log file for an explicit calendar date.
    pub fn file_for_date(&self, log_type: LogType, date: NaiveDate) -> Result<PathBuf> {
        let dir = self.resolve()?;
        Ok(dir.join(constants::log_file_name(log_type.as_str(), date)))
    }
}

/// Create the logs directory and its marker file. Returns `None` on a
/// definitive failure so the outcome can be cached as-is.
fn provision(uploads_base: &Path) -> Option<PathBuf> {
    let logs_dir = constants::logs_dir_under(uploads_base);

    if !logs_dir.is_dir() {
        if let Err(e) = fs::create_dir_all(&logs_dir) {
            warn!("Failed to create logs directory {}: {}", logs_dir.display(), e);
            return None;
        }
        debug!("Created logs directory: {}", logs_dir.display());
    }

    // The marker keeps the directory non-browsable; failing to write it is
    // not an error.
    let marker = constants::marker_path(&logs_dir);
    if !marker.exists() {
        let _ = fs::write(&marker, constants::MARKER_BODY);
    }

    Some(logs_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_creates_directory_and_marker() {
        let base = TempDir::new().unwrap();
        let dir = LogDir::new(base.path());

        let resolved = dir.resolve().unwrap().to_path_buf();
        assert_eq!(resolved, base.path().join("logs"));
        assert!(resolved.is_dir());

        let marker = resolved.join("index.html");
        assert_eq!(
            fs::read_to_string(marker).unwrap(),
            "<!-- Silence is golden -->"
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let base = TempDir::new().unwrap();
        let dir = LogDir::new(base.path());

        let first = dir.resolve().unwrap().to_path_buf();
        let second = dir.resolve().unwrap().to_path_buf();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unwritable_base_fails_and_failure_is_cached() {
        let base = TempDir::new().unwrap();

        // A regular file where the uploads base should be makes directory
        // creation fail regardless of process privileges.
        let blocked = base.path().join("base");
        fs::write(&blocked, "not a directory").unwrap();

        let dir = LogDir::new(&blocked);
        assert!(matches!(dir.resolve(), Err(Error::DirectoryUnwritable(_))));

        // Fixing the filesystem does not help: the outcome was cached for
        // the life of the instance.
        fs::remove_file(&blocked).unwrap();
        fs::create_dir_all(&blocked).unwrap();
        assert!(matches!(dir.resolve(), Err(Error::DirectoryUnwritable(_))));
    }

    #[test]
    fn test_file_for_date_naming() {
        let base = TempDir::new().unwrap();
        let dir = LogDir::new(base.path());
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let debug_path = dir.file_for_date(LogType::Debug, date).unwrap();
        assert!(debug_path.ends_with("logs/debug-20240601.log"));

        let attention_path = dir.file_for_date(LogType::Attention, date).unwrap();
        assert!(attention_path.ends_with("logs/attention-20240601.log"));
    }

    #[test]
    fn test_different_days_use_different_files() {
        let base = TempDir::new().unwrap();
        let dir = LogDir::new(base.path());

        let day_one = dir
            .file_for_date(LogType::Debug, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .unwrap();
        let day_two = dir
            .file_for_date(LogType::Debug, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap())
            .unwrap();
        assert_ne!(day_one, day_two);
    }
}
