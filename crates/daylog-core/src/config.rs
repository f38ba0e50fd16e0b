//! Option storage for daylog settings
//!
//! The host environment owns a string-keyed option store; daylog reads and
//! writes two keys in it: the debug flag and the first-activation
//! timestamp. [`Settings`] is the typed facade the rest of the crate uses,
//! so callers never touch raw keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::constants::{ENABLE_DEBUG_KEY, INSTALLED_TIME_KEY};
use crate::error::Result;

/// String-keyed option storage supplied by the host environment
pub trait OptionStore: Send + Sync {
    /// Get a stored value, `None` when the key was never set
    fn get(&self, key: &str) -> Option<String>;

    /// Set a value, persisting it for future processes where applicable
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory option store; state is lost on drop
#[derive(Debug, Default)]
pub struct MemoryOptions {
    values: Mutex<BTreeMap<String, String>>,
}

impl OptionStore for MemoryOptions {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// On-disk TOML representation of the option store
#[derive(Debug, Default, Serialize, Deserialize)]
struct OptionsFile {
    #[serde(default)]
    options: BTreeMap<String, String>,
}

/// TOML-file-backed option store
pub struct FileOptions {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileOptions {
    /// Open (or initialize) the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.is_file() {
            let raw = fs::read_to_string(&path)?;
            toml::from_str::<OptionsFile>(&raw)?.options
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        let file = OptionsFile {
            options: values.clone(),
        };
        let raw = toml::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl OptionStore for FileOptions {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = match self.values.lock() {
            Ok(values) => values,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }
}

/// Typed settings facade over an [`OptionStore`]
pub struct Settings {
    store: Box<dyn OptionStore>,
}

impl Settings {
    pub fn new(store: Box<dyn OptionStore>) -> Self {
        Self { store }
    }

    /// Settings backed by a TOML file at `path`
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(Box::new(FileOptions::open(path)?)))
    }

    /// Whether debug-type entries should be written.
    ///
    /// Only a stored value of exactly one (after integer coercion) enables
    /// debug logging; an absent key or any other value disables it.
    pub fn debug_enabled(&self) -> bool {
        self.store
            .get(ENABLE_DEBUG_KEY)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(|n| n.abs() == 1)
            .unwrap_or(false)
    }

    /// Raw debug flag value; `None` means the flag was never set
    pub fn debug_flag(&self) -> Option<String> {
        self.store.get(ENABLE_DEBUG_KEY)
    }

    /// Canonical representation: "1" enabled, "0" disabled
    pub fn set_debug_enabled(&self, enabled: bool) -> Result<()> {
        self.store
            .set(ENABLE_DEBUG_KEY, if enabled { "1" } else { "0" })
    }

    /// First-activation timestamp (unix seconds), when recorded
    pub fn installed_time(&self) -> Option<i64> {
        self.store
            .get(INSTALLED_TIME_KEY)
            .and_then(|v| v.trim().parse().ok())
    }

    /// Record the first-activation timestamp; later calls are no-ops
    pub fn record_install_time(&self, epoch_secs: i64) -> Result<()> {
        if self.installed_time().is_some() {
            return Ok(());
        }
        self.store.set(INSTALLED_TIME_KEY, &epoch_secs.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn memory_settings() -> Settings {
        Settings::new(Box::new(MemoryOptions::default()))
    }

    #[test]
    fn test_debug_disabled_by_default() {
        let settings = memory_settings();
        assert!(!settings.debug_enabled());
        assert!(settings.debug_flag().is_none());
    }

    #[test]
    fn test_debug_flag_round_trip() {
        let settings = memory_settings();

        settings.set_debug_enabled(true).unwrap();
        assert!(settings.debug_enabled());
        assert_eq!(settings.debug_flag().as_deref(), Some("1"));

        settings.set_debug_enabled(false).unwrap();
        assert!(!settings.debug_enabled());
        assert_eq!(settings.debug_flag().as_deref(), Some("0"));
    }

    #[test]
    fn test_debug_flag_integer_coercion() {
        let settings = memory_settings();

        for (value, expected) in [
            (" 1 ", true),
            ("1", true),
            ("-1", true),
            ("0", false),
            ("2", false),
            ("yes", false),
            ("", false),
        ] {
            settings.store.set(ENABLE_DEBUG_KEY, value).unwrap();
            assert_eq!(settings.debug_enabled(), expected, "value {value:?}");
        }
    }

    #[test]
    fn test_install_time_recorded_once() {
        let settings = memory_settings();
        assert!(settings.installed_time().is_none());

        settings.record_install_time(1_717_200_000).unwrap();
        settings.record_install_time(1_717_300_000).unwrap();

        assert_eq!(settings.installed_time(), Some(1_717_200_000));
    }

    #[test]
    fn test_file_options_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("daylog.toml");

        {
            let settings = Settings::from_file(&path).unwrap();
            settings.set_debug_enabled(true).unwrap();
            settings.record_install_time(1_717_200_000).unwrap();
        }

        let reopened = Settings::from_file(&path).unwrap();
        assert!(reopened.debug_enabled());
        assert_eq!(reopened.installed_time(), Some(1_717_200_000));
    }

    #[test]
    fn test_file_options_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = FileOptions::open(dir.path().join("missing.toml")).unwrap();
        assert!(store.get(ENABLE_DEBUG_KEY).is_none());
    }
}
