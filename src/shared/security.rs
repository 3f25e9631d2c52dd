use crate::shared::Result;
use std::fs;
use std::path::{Component, Path};

/// Maximum size of a client key file (1 MB); real PEM keys are a few KB
pub const MAX_KEY_FILE_SIZE: u64 = 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// Uses `symlink_metadata()` so the symlink itself is inspected, not its target.
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "client key", "credentials")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
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

/// Validates a server-supplied relative path before it is joined onto a local directory
///
/// Cookbook manifests name every file with a path relative to the cookbook root.
/// Anything that could escape the destination directory is rejected.
///
/// # Errors
/// Returns an error if the path is empty, absolute, or contains `..` or a prefix component
pub fn validate_relative_path(relative: &str) -> Result<()> {
    if relative.is_empty() {
        anyhow::bail!("Security: empty file path in cookbook manifest");
    }

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => anyhow::bail!(
                "Security: cookbook file path '{}' contains '..' which is not allowed",
                relative
            ),
            Component::RootDir | Component::Prefix(_) => anyhow::bail!(
                "Security: cookbook file path '{}' is absolute which is not allowed",
                relative
            ),
        }
    }

    Ok(())
}
