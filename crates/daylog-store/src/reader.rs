//! Reading log file contents for viewing

use daylog_core::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::guard;

/// Read the full contents of a log file by caller-supplied name.
///
/// The name is validated through the path guard first. The whole file is
/// loaded; log files are small day-scoped text files.
pub fn view_file(logs_dir: &Path, filename: &str) -> Result<String> {
    let path = guard::resolve_safe(logs_dir, filename)?;

    fs::read_to_string(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::FileNotFound(path.clone()),
        ErrorKind::PermissionDenied => Error::PermissionDenied(path.clone()),
        _ => Error::Io(e),
    })
}
