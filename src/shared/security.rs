use crate::shared::error::QuoteError;
use crate::shared::Result;
use std::fs;
use std::path::{Component, Path};

/// Maximum size accepted for catalog documents and quote requests (16 MB)
pub const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Prefix shared by every catalog backup file
pub const BACKUP_PREFIX: &str = "catalog-";

/// Validates that a path exists, is not a symbolic link and is a regular file
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if the path is missing, is a symlink, or is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        return Err(QuoteError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Point the option at the real file instead of a link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates a backup filename supplied by the user before it is joined
/// onto the backups directory.
///
/// Only bare `catalog-*.json` names are accepted; anything with a
/// directory component (`..`, `/`, a drive prefix) is rejected.
pub fn validate_backup_filename(filename: &str) -> Result<()> {
    let path = Path::new(filename);
    let is_bare = path.components().count() == 1
        && matches!(path.components().next(), Some(Component::Normal(_)));

    if !is_bare {
        return Err(QuoteError::SecurityError {
            path: path.to_path_buf(),
            reason: "Backup names must not contain path components".to_string(),
            hint: "Pass the filename exactly as printed by `txe-quote catalog backups`"
                .to_string(),
        }
        .into());
    }

    if !filename.starts_with(BACKUP_PREFIX) || !filename.ends_with(".json") {
        return Err(QuoteError::BackupNotFound {
            filename: filename.to_string(),
        }
        .into());
    }

    Ok(())
}
