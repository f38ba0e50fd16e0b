//! Locked append writes for log entries

use chrono::Utc;
use daylog_core::{constants, LogType, Result, Settings};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{trace, warn};

use crate::paths::LogDir;

/// Result of a single write attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    /// The entry was appended to the day's file
    Written,
    /// Debug logging is disabled; nothing was touched
    SkippedDebugDisabled,
}

/// Appends formatted entries to the per-day log files
pub struct LogWriter<'a> {
    dir: &'a LogDir,
    settings: &'a Settings,
}

impl<'a> LogWriter<'a> {
    pub fn new(dir: &'a LogDir, settings: &'a Settings) -> Self {
        Self { dir, settings }
    }

    /// Append `message` as a `log_type` entry.
    ///
    /// Collapses every failure mode to `false`, matching the public
    /// surface; [`try_write`](Self::try_write) keeps them apart.
    pub fn write(&self, message: &str, log_type: LogType) -> bool {
        matches!(self.try_write(message, log_type), Ok(WriteStatus::Written))
    }

    /// Typed write: a skipped debug entry is not an error.
    pub fn try_write(&self, message: &str, log_type: LogType) -> Result<WriteStatus> {
        if log_type == LogType::Debug && !self.settings.debug_enabled() {
            trace!("Debug logging disabled, skipping entry");
            return Ok(WriteStatus::SkippedDebugDisabled);
        }

        self.append(message, log_type)?;
        Ok(WriteStatus::Written)
    }

    /// Append without consulting the debug gate.
    ///
    /// The raw-string surface gates on the exact spelling `"debug"`
    /// before any coercion, so non-canonical spellings land in the debug
    /// file even while the flag is off.
    pub(crate) fn append(&self, message: &str, log_type: LogType) -> Result<()> {
        let path = self.dir.file_for(log_type)?;
        append_locked(&path, &format_entry(message))
    }
}

/// Serialize one entry: `[YYYY-MM-DD HH:MM:SS] <trimmed message>\n`, UTC.
fn format_entry(message: &str) -> String {
    let timestamp = Utc::now().format(constants::ENTRY_TIME_FORMAT);
    format!("[{}] {}\n", timestamp, message.trim())
}

/// Append with an exclusive lock held for the duration of the write, so
/// concurrent writers in this or sibling processes never interleave a
/// partial line.
fn append_locked(path: &Path, entry: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        relax_dir_permissions(dir);
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;
    let written = (&file).write_all(entry.as_bytes()).and_then(|_| (&file).flush());
    let _ = file.unlock();
    written?;
    Ok(())
}

/// Best-effort fallback when the logs directory lost its write bit; its
/// own failure is ignored.
fn relax_dir_permissions(dir: &Path) {
    let Ok(meta) = fs::metadata(dir) else {
        return;
    };
    if !meta.permissions().readonly() {
        return;
    }

    warn!("Logs directory {} is not writable, relaxing permissions", dir.display());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o755));
    }
    #[cfg(not(unix))]
    {
        let mut perms = meta.permissions();
        perms.set_readonly(false);
        let _ = fs::set_permissions(dir, perms);
    }
}
