//! Core types for daylog

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DATE_STAMP_FORMAT, LOG_EXTENSION};
use crate::error::Result;

/// Severity-like class of a log entry.
///
/// `Debug` entries are written only while the debug flag is enabled;
/// `Attention` entries are always written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Debug,
    Attention,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Debug => "debug",
            LogType::Attention => "attention",
        }
    }

    /// Lenient parse of a caller-supplied type string.
    ///
    /// Trims and lowercases; anything outside the known set coerces to
    /// `Debug` rather than failing.
    pub fn coerce(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "attention" => LogType::Attention,
            _ => LogType::Debug,
        }
    }

    /// Infer the type from a log file name prefix, if recognizable.
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name.starts_with("debug-") {
            Some(LogType::Debug)
        } else if name.starts_with("attention-") {
            Some(LogType::Attention)
        } else {
            None
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regex pattern for acceptable log file names: a single bare component,
/// no separators or shell metacharacters
static FILE_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("Invalid file name regex"));

/// Collapse a caller-supplied filename to a single safe path component.
///
/// Everything up to the last path separator is discarded, so traversal
/// sequences never survive. Returns `None` when nothing usable remains.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or("").trim();

    if name.is_empty() || name == "." || name == ".." || !FILE_NAME_REGEX.is_match(name) {
        return None;
    }

    Some(name.to_string())
}

/// Metadata for one log file on disk
#[derive(Debug, Clone)]
pub struct LogFileInfo {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Type inferred from the filename prefix; `None` means unknown
    pub log_type: Option<LogType>,
    /// Calendar day embedded in the filename, when parseable
    pub date_stamp: Option<NaiveDate>,
    /// File size in bytes
    pub size_bytes: u64,
    /// Filesystem modification time
    pub modified_at: DateTime<Utc>,
}

impl LogFileInfo {
    /// Build metadata from an on-disk file
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path)?;
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        Ok(Self {
            path: path.to_path_buf(),
            log_type: LogType::from_file_name(name),
            date_stamp: parse_date_stamp(name),
            size_bytes: meta.len(),
            modified_at: DateTime::<Utc>::from(meta.modified()?),
        })
    }

    /// Bare filename of this log file
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Extract the `YYYYMMDD` stamp from a `<type>-<YYYYMMDD>.log` name
fn parse_date_stamp(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_suffix(&format!(".{}", LOG_EXTENSION))?;
    let (_, stamp) = stem.rsplit_once('-')?;
    NaiveDate::parse_from_str(stamp, DATE_STAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_coerce_known_types() {
        assert_eq!(LogType::coerce("debug"), LogType::Debug);
        assert_eq!(LogType::coerce("attention"), LogType::Attention);
        assert_eq!(LogType::coerce("  Attention "), LogType::Attention);
    }

    #[test]
    fn test_coerce_unknown_falls_back_to_debug() {
        assert_eq!(LogType::coerce("error"), LogType::Debug);
        assert_eq!(LogType::coerce(""), LogType::Debug);
        assert_eq!(LogType::coerce("ATTENTION!"), LogType::Debug);
    }

    #[test]
    fn test_from_file_name() {
        assert_eq!(
            LogType::from_file_name("debug-20240601.log"),
            Some(LogType::Debug)
        );
        assert_eq!(
            LogType::from_file_name("attention-20240601.log"),
            Some(LogType::Attention)
        );
        assert_eq!(LogType::from_file_name("other-20240601.log"), None);
    }

    #[test]
    fn test_sanitize_keeps_plain_names() {
        assert_eq!(
            sanitize_file_name("debug-20240601.log").as_deref(),
            Some("debug-20240601.log")
        );
    }

    #[test]
    fn test_sanitize_collapses_traversal() {
        assert_eq!(sanitize_file_name("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(sanitize_file_name("a/../../b").as_deref(), Some("b"));
        assert_eq!(sanitize_file_name("..\\..\\boot.ini").as_deref(), Some("boot.ini"));
    }

    #[test]
    fn test_sanitize_rejects_unusable_names() {
        assert_eq!(sanitize_file_name(""), None);
        assert_eq!(sanitize_file_name(".."), None);
        assert_eq!(sanitize_file_name("a/.."), None);
        assert_eq!(sanitize_file_name("logs/"), None);
        assert_eq!(sanitize_file_name(".hidden"), None);
        assert_eq!(sanitize_file_name("name with spaces.log"), None);
    }

    #[test]
    fn test_parse_date_stamp() {
        assert_eq!(
            parse_date_stamp("attention-20240601.log"),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(parse_date_stamp("attention-2024.log"), None);
        assert_eq!(parse_date_stamp("notes.txt"), None);
    }

    #[test]
    fn test_log_file_info_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("attention-20240601.log");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"[2024-06-01 12:00:00] Unexpected issue\n")
            .unwrap();

        let info = LogFileInfo::from_path(&path).unwrap();
        assert_eq!(info.log_type, Some(LogType::Attention));
        assert_eq!(info.date_stamp, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(info.size_bytes, 39);
        assert_eq!(info.file_name(), "attention-20240601.log");
    }
}
