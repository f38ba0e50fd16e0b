//! Daylog Store - file-based daily log management
//!
//! Callers append timestamped text entries into per-day files named
//! `<type>-<YYYYMMDD>.log` under a single logs directory, and browse,
//! view, and delete those files through [`LogStore`]. Debug-type entries
//! are gated by a persisted flag; attention-type entries always land.

mod catalog;
mod guard;
mod paths;
mod reader;
mod retention;
mod writer;

pub use catalog::{latest_file, list_files};
pub use guard::resolve_safe;
pub use paths::LogDir;
pub use reader::view_file;
pub use retention::{delete_file, DeleteOutcome};
pub use writer::{LogWriter, WriteStatus};

use chrono::Utc;
use daylog_core::{LogFileInfo, LogType, Result, Settings};
use std::path::PathBuf;

/// Facade over the log-file lifecycle.
///
/// One instance owns the resolved logs directory (cached after the first
/// resolution) and the host-backed settings; it is the surface the
/// presentation layer calls into.
pub struct LogStore {
    dir: LogDir,
    settings: Settings,
}

impl LogStore {
    /// A store rooted at `<uploads_base>/logs`. Nothing touches the
    /// filesystem until the first operation needs the directory.
    pub fn new(uploads_base: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            dir: LogDir::new(uploads_base),
            settings,
        }
    }

    /// One-time install bootstrap: records the install timestamp, enables
    /// debug logging when the flag was never set, and provisions the logs
    /// directory. Safe to call on every startup.
    pub fn activate(&self) -> Result<()> {
        if self.settings.installed_time().is_none() {
            self.settings.record_install_time(Utc::now().timestamp())?;
        }
        if self.settings.debug_flag().is_none() {
            self.settings.set_debug_enabled(true)?;
        }

        // Directory provisioning stays best-effort here; later operations
        // report the cached failure themselves.
        let _ = self.dir.resolve();
        Ok(())
    }

    /// Append `message` as an entry of the given raw type; unknown types
    /// coerce to `debug`. Returns `false` when the entry was skipped
    /// (debug disabled) or the write failed.
    ///
    /// The debug gate matches the raw spelling exactly: only
    /// `log_type == "debug"` is subject to the flag. Any other spelling
    /// coerces into the debug file but is always written.
    pub fn create(&self, message: &str, log_type: &str) -> bool {
        let writer = LogWriter::new(&self.dir, &self.settings);
        if log_type == "debug" {
            return writer.write(message, LogType::Debug);
        }
        writer.append(message, LogType::coerce(log_type)).is_ok()
    }

    /// Shorthand for a debug-type entry.
    pub fn debug(&self, message: &str) -> bool {
        self.write(message, LogType::Debug)
    }

    /// Shorthand for an attention-type entry.
    pub fn attention(&self, message: &str) -> bool {
        self.write(message, LogType::Attention)
    }

    pub fn write(&self, message: &str, log_type: LogType) -> bool {
        LogWriter::new(&self.dir, &self.settings).write(message, log_type)
    }

    /// Typed variant of [`write`](Self::write) that distinguishes a
    /// disabled-debug skip from an I/O failure.
    pub fn try_write(&self, message: &str, log_type: LogType) -> Result<WriteStatus> {
        LogWriter::new(&self.dir, &self.settings).try_write(message, log_type)
    }

    /// List log files, newest first, optionally filtered by a
    /// case-insensitive filename substring. An unresolvable directory
    /// yields an empty listing.
    pub fn list_files(&self, search: &str) -> Vec<LogFileInfo> {
        match self.dir.resolve() {
            Ok(dir) => catalog::list_files(dir, search),
            Err(_) => Vec::new(),
        }
    }

    /// The most recently modified file of a type, if any.
    pub fn latest_file(&self, log_type: LogType) -> Option<LogFileInfo> {
        let dir = self.dir.resolve().ok()?;
        catalog::latest_file(dir, log_type)
    }

    /// Full contents of a named log file, guard-validated.
    pub fn view_file(&self, filename: &str) -> Result<String> {
        let dir = self.dir.resolve()?;
        reader::view_file(dir, filename)
    }

    /// Delete a named log file, guard-validated.
    pub fn delete_file(&self, filename: &str) -> DeleteOutcome {
        match self.dir.resolve() {
            Ok(dir) => retention::delete_file(dir, filename),
            Err(_) => DeleteOutcome::NotFound,
        }
    }

    pub fn debug_enabled(&self) -> bool {
        self.settings.debug_enabled()
    }

    pub fn set_debug_enabled(&self, enabled: bool) -> Result<()> {
        self.settings.set_debug_enabled(enabled)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
