//! Deletion of individual log files

use daylog_core::sanitize_file_name;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::guard;

/// Outcome of a delete request. Informational, never raised as an error;
/// the caller decides user messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    PermissionError,
    PathEscape,
}

/// Delete a single log file by caller-supplied name.
///
/// Deletion is irreversible. The existence check runs on the sanitized
/// name before the canonical-path check so an absent file reports
/// `NotFound` rather than `PathEscape`.
pub fn delete_file(logs_dir: &Path, filename: &str) -> DeleteOutcome {
    let Some(name) = sanitize_file_name(filename) else {
        return DeleteOutcome::PathEscape;
    };

    if !logs_dir.join(&name).is_file() {
        return DeleteOutcome::NotFound;
    }

    let path = match guard::resolve_safe(logs_dir, &name) {
        Ok(path) => path,
        Err(_) => return DeleteOutcome::PathEscape,
    };

    relax_file_permissions(&path);

    match fs::remove_file(&path) {
        Ok(()) => {
            debug!("Deleted log file: {}", path.display());
            DeleteOutcome::Deleted
        }
        Err(e) => {
            warn!("Failed to delete {}: {}", path.display(), e);
            DeleteOutcome::PermissionError
        }
    }
}

/// Best-effort write-bit restore before removal; its own failure is
/// ignored and surfaces as `PermissionError` from the removal itself.
fn relax_file_permissions(path: &Path) {
    let Ok(meta) = fs::metadata(path) else {
        return;
    };
    if !meta.permissions().readonly() {
        return;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o644));
    }
    #[cfg(not(unix))]
    {
        let mut perms = meta.permissions();
        perms.set_readonly(false);
        let _ = fs::set_permissions(path, perms);
    }
}
