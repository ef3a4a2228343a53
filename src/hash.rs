//! BLAKE3 hashing utilities for install receipts and build manifests

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;
use walkdir::WalkDir;

use crate::error::{Result, SetupError};

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

fn update_from_file(hasher: &mut Hasher, path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| crate::error::fs::read_failed(path, e))?;

    let mut reader = BufReader::new(file);
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| crate::error::fs::read_failed(path, e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(())
}

/// Calculate BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    update_from_file(&mut hasher, path)?;
    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

#[cfg(unix)]
fn mode_bits(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn mode_bits(metadata: &std::fs::Metadata) -> u32 {
    u32::from(metadata.permissions().readonly())
}

/// Calculate BLAKE3 hash of a directory tree
///
/// Covers every file's relative path, permission bits and contents, and every
/// symlink's relative path and target, sorted by path for deterministic
/// results. Top-level entries named in `exclude` are skipped.
pub fn hash_directory(path: &Path, exclude: &[&str]) -> Result<String> {
    if !path.is_dir() {
        return Err(SetupError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut hasher = Hasher::new();
    let mut entries = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| crate::error::fs::read_failed(path, e))?;
        let relative = entry.path().strip_prefix(path).unwrap_or(entry.path());
        let excluded = relative
            .components()
            .next()
            .is_some_and(|first| exclude.iter().any(|x| first.as_os_str() == *x));
        if excluded || entry.file_type().is_dir() {
            continue;
        }
        entries.push(entry);
    }

    for entry in entries {
        let file_path = entry.path();

        // Include relative path in hash for uniqueness
        let relative_path = file_path
            .strip_prefix(path)
            .unwrap_or(file_path)
            .to_string_lossy();
        hasher.update(relative_path.as_bytes());
        hasher.update(b"\0"); // null separator

        if entry.file_type().is_symlink() {
            let target = std::fs::read_link(file_path)
                .map_err(|e| crate::error::fs::read_failed(file_path, e))?;
            hasher.update(b"link:");
            hasher.update(target.to_string_lossy().as_bytes());
        } else {
            let metadata = entry
                .metadata()
                .map_err(|e| crate::error::fs::read_failed(file_path, e))?;
            hasher.update(&mode_bits(&metadata).to_le_bytes());
            update_from_file(&mut hasher, file_path)?;
        }

        hasher.update(b"\0"); // null separator between files
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Verify a hash matches the expected value
pub fn verify_hash(expected: &str, actual: &str) -> bool {
    // Normalize both hashes (ensure prefix)
    let normalize = |h: &str| {
        if h.starts_with(HASH_PREFIX) {
            h.to_string()
        } else {
            format!("{HASH_PREFIX}{h}")
        }
    };

    normalize(expected) == normalize(actual)
}
