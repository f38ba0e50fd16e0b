//! Listing and filtering of log files

use daylog_core::{constants, LogFileInfo, LogType};
use glob::glob;
use std::path::Path;

/// List the `*.log` files under `logs_dir`, most recently modified first.
///
/// A non-empty `search` keeps only filenames containing it as a
/// case-insensitive substring. Each call re-enumerates the directory.
pub fn list_files(logs_dir: &Path, search: &str) -> Vec<LogFileInfo> {
    let pattern = logs_dir.join(format!("*.{}", constants::LOG_EXTENSION));
    let needle = search.trim().to_lowercase();

    let mut files: Vec<LogFileInfo> = matching_files(&pattern)
        .into_iter()
        .filter(|info| needle.is_empty() || info.file_name().to_lowercase().contains(&needle))
        .collect();

    // Stable sort keeps the enumeration order for equal mtimes, so a
    // single listing call is deterministic.
    files.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
    files
}

/// The most recently modified `<type>-*.log` file, if any exist.
pub fn latest_file(logs_dir: &Path, log_type: LogType) -> Option<LogFileInfo> {
    let pattern = logs_dir.join(format!(
        "{}-*.{}",
        log_type.as_str(),
        constants::LOG_EXTENSION
    ));
    matching_files(&pattern)
        .into_iter()
        .max_by_key(|info| info.modified_at)
}

fn matching_files(pattern: &Path) -> Vec<LogFileInfo> {
    let Some(pattern) = pattern.to_str() else {
        return Vec::new();
    };
    let Ok(paths) = glob(pattern) else {
        return Vec::new();
    };

    paths
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .filter_map(|path| LogFileInfo::from_path(&path).ok())
        .collect()
}
