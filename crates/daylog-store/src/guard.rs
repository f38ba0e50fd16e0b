//! Path traversal protection for caller-supplied filenames

use daylog_core::{sanitize_file_name, Error, Result};
use std::path::{Path, PathBuf};

/// Resolve a caller-supplied filename to a canonical path inside
/// `logs_dir`, or fail with [`Error::PathEscape`].
///
/// The candidate is collapsed to a bare filename, then both sides are
/// canonicalized and the candidate must keep the canonical logs directory
/// as its prefix. Symlinks pointing out of the directory fail the prefix
/// check; a name that does not resolve at all (absent file) fails too.
/// Every externally triggered read or delete goes through here before
/// touching the filesystem.
pub fn resolve_safe(logs_dir: &Path, candidate: &str) -> Result<PathBuf> {
    let name = sanitize_file_name(candidate).ok_or(Error::PathEscape)?;

    let canonical_dir = logs_dir.canonicalize().map_err(|_| Error::PathEscape)?;
    let canonical = logs_dir
        .join(name)
        .canonicalize()
        .map_err(|_| Error::PathEscape)?;

    if !canonical.starts_with(&canonical_dir) {
        return Err(Error::PathEscape);
    }

    Ok(canonical)
}
