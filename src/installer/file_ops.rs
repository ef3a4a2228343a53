//! Basic file operations for installing the application tree
//!
//! This module handles low-level file operations:
//! - Directory creation (ensure_parent_dir)
//! - Recursive tree copying (copy_tree)
//! - Path removal regardless of type (remove_path)
//! - Permission and symlink helpers

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, SetupError};

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| crate::error::fs::write_failed(parent, e))?;
    }
    Ok(())
}

/// Whether anything (file, directory or symlink, dangling or not) exists at `path`
pub fn path_present(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Remove whatever is at `path`
///
/// Directories are removed recursively; symlinks are removed, never followed.
/// Returns `false` if nothing was there.
pub fn remove_path(path: &Path) -> Result<bool> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(crate::error::fs::remove_failed(path, e)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| crate::error::fs::remove_failed(path, e))?;
    Ok(true)
}

/// Recursively copy the contents of `source` into the existing directory `dest`
///
/// Regular files keep their permission bits, symlinks are recreated as
/// symlinks. Returns the number of files and links copied.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(source).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| crate::error::fs::read_failed(source, e))?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| crate::error::fs::write_failed(&target, e))?;
        } else if file_type.is_symlink() {
            let link_target = fs::read_link(entry.path())
                .map_err(|e| crate::error::fs::read_failed(entry.path(), e))?;
            ensure_parent_dir(&target)?;
            create_symlink(&link_target, &target)?;
            copied += 1;
        } else {
            ensure_parent_dir(&target)?;
            fs::copy(entry.path(), &target)
                .map_err(|e| crate::error::fs::write_failed(&target, e))?;
            copied += 1;
        }
    }

    tracing::debug!(source = %source.display(), dest = %dest.display(), copied, "tree copied");
    Ok(copied)
}

/// Mark a file as executable (`0o755`)
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| crate::error::fs::write_failed(path, e))
}

#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Whether `path` is a regular file with an execute bit set
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Create a symlink at `link` pointing to `target`
#[cfg(unix)]
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link).map_err(|e| SetupError::SymlinkFailed {
        link: link.display().to_string(),
        target: target.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(not(unix))]
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    Err(SetupError::SymlinkFailed {
        link: link.display().to_string(),
        target: target.display().to_string(),
        reason: "symlinks are only supported on unix".to_string(),
    })
}
