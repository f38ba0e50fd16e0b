//! Constants and default values for daylog

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Logs directory name under the host's upload storage area
pub const LOGS_DIR: &str = "logs";

/// Marker file kept inside the logs directory so it is not browsable
pub const MARKER_FILE: &str = "index.html";

/// Marker file body (kept identical across installs for interop)
pub const MARKER_BODY: &str = "<!-- Silence is golden -->";

/// Log file extension (without the dot)
pub const LOG_EXTENSION: &str = "log";

/// Default settings file name for the TOML-backed option store
pub const SETTINGS_FILE: &str = "daylog.toml";

/// Option key holding the debug flag ("0" or "1")
pub const ENABLE_DEBUG_KEY: &str = "daylog_enable_debug";

/// Option key holding the first-activation timestamp (unix seconds)
pub const INSTALLED_TIME_KEY: &str = "daylog_installed_time";

/// Entry timestamp format (UTC, second precision)
pub const ENTRY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date stamp format embedded in log file names
pub const DATE_STAMP_FORMAT: &str = "%Y%m%d";

/// Get the logs directory under an uploads base
pub fn logs_dir_under(uploads_base: &Path) -> PathBuf {
    uploads_base.join(LOGS_DIR)
}

/// Get the marker file path inside a logs directory
pub fn marker_path(logs_dir: &Path) -> PathBuf {
    logs_dir.join(MARKER_FILE)
}

/// Build the log file name for a type prefix and calendar date
pub fn log_file_name(type_prefix: &str, date: NaiveDate) -> String {
    format!(
        "{}-{}.{}",
        type_prefix,
        date.format(DATE_STAMP_FORMAT),
        LOG_EXTENSION
    )
}
