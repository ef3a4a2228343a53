//! Shell profile PATH configuration
//!
//! The installer appends a marker comment and a PATH export to each shell
//! startup file; the uninstaller removes exactly that pair again. Each profile
//! is handled on its own: one unwritable file never stops the others.
//!
//! Profiles are handled as raw bytes. A file with non-UTF-8 content elsewhere
//! in it comes back unchanged apart from the managed lines.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError, TargetFailure};

/// Outcome of [`ensure_path_export`] for one profile file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileUpdate {
    /// Marker and export line were appended
    Appended,
    /// The export line was already present
    AlreadyPresent,
}

/// A profile file together with the entry this installer manages in it
#[derive(Debug, Clone, Copy)]
pub struct ShellProfileEntry<'a> {
    pub profile: &'a Path,
    pub marker_line: &'a str,
    pub export_line: &'a str,
}

impl ShellProfileEntry<'_> {
    /// Append the marker and export line unless the export line is already there
    ///
    /// Creates the profile (and its parent directories) when missing. Existing
    /// content is never rewritten, only appended to.
    pub fn ensure(&self) -> Result<ProfileUpdate> {
        if let Some(parent) = self.profile.parent() {
            fs::create_dir_all(parent).map_err(|e| crate::error::fs::write_failed(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.profile)
            .map_err(|e| crate::error::fs::write_failed(self.profile, e))?;

        let existing = fs::read(self.profile).map_err(|e| crate::error::fs::read_failed(self.profile, e))?;
        if contains_line(&existing, self.export_line) {
            return Ok(ProfileUpdate::AlreadyPresent);
        }

        let mut block = String::new();
        if !existing.is_empty() && !existing.ends_with(b"\n") {
            block.push('\n');
        }
        block.push('\n');
        block.push_str(self.marker_line);
        block.push('\n');
        block.push_str(self.export_line);
        block.push('\n');

        file.write_all(block.as_bytes())
            .map_err(|e| crate::error::fs::write_failed(self.profile, e))?;
        Ok(ProfileUpdate::Appended)
    }
}

/// Per-profile results of one PATH configuration pass
#[derive(Debug, Default)]
pub struct ProfileReport {
    /// Profiles handled successfully, in order
    pub updated: Vec<(PathBuf, ProfileUpdate)>,
    /// Profiles that could not be read or written
    pub failures: Vec<TargetFailure>,
}

impl ProfileReport {
    /// The successful updates, or [`SetupError::ProfilesNotUpdated`] listing the failures
    pub fn into_result(self) -> Result<Vec<(PathBuf, ProfileUpdate)>> {
        if self.failures.is_empty() {
            Ok(self.updated)
        } else {
            Err(SetupError::ProfilesNotUpdated {
                failures: self.failures,
            })
        }
    }
}

/// Ensure `export_line` is present in every profile file
///
/// Every file is attempted. Failed files are collected next to the successful
/// ones, which keep their update.
pub fn ensure_path_export(
    profile_files: &[PathBuf],
    marker_line: &str,
    export_line: &str,
) -> ProfileReport {
    let mut report = ProfileReport {
        updated: Vec::with_capacity(profile_files.len()),
        failures: Vec::new(),
    };

    for profile in profile_files {
        let entry = ShellProfileEntry {
            profile,
            marker_line,
            export_line,
        };
        match entry.ensure() {
            Ok(outcome) => {
                tracing::debug!(profile = %profile.display(), ?outcome, "shell profile checked");
                report.updated.push((profile.clone(), outcome));
            }
            Err(err) => {
                tracing::warn!(profile = %profile.display(), error = %err, "shell profile not updated");
                report.failures.push(TargetFailure::new(profile, &err));
            }
        }
    }

    report
}

/// Remove every marker line and the line directly after it
///
/// Returns `false` when the profile does not exist or contains no marker.
/// Everything else in the file is kept byte for byte.
pub fn remove_path_export(profile: &Path, marker_line: &str) -> Result<bool> {
    if !profile.exists() {
        return Ok(false);
    }

    let content = fs::read(profile).map_err(|e| crate::error::fs::read_failed(profile, e))?;
    let mut kept = Vec::with_capacity(content.len());
    let mut found = false;
    let mut skip_next = false;

    for line in content.split_inclusive(|b| *b == b'\n') {
        if skip_next {
            skip_next = false;
            continue;
        }
        if strip_eol(line) == marker_line.as_bytes() {
            found = true;
            skip_next = true;
            continue;
        }
        kept.extend_from_slice(line);
    }

    if found {
        write_replacing(profile, &kept)?;
    }
    Ok(found)
}

/// Whether `profile` contains `export_line` as a whole line
pub fn has_export(profile: &Path, export_line: &str) -> bool {
    fs::read(profile)
        .map(|bytes| contains_line(&bytes, export_line))
        .unwrap_or(false)
}

fn contains_line(content: &[u8], line: &str) -> bool {
    content
        .split_inclusive(|b| *b == b'\n')
        .any(|l| strip_eol(l) == line.as_bytes())
}

fn strip_eol(line: &[u8]) -> &[u8] {
    match line.strip_suffix(b"\n") {
        Some(l) => l.strip_suffix(b"\r").unwrap_or(l),
        None => line,
    }
}

/// Replace the file behind `profile` through a temp file in the same directory
///
/// Symlinked profiles (dotfile managers) are resolved first so the link itself
/// survives, and the original permission bits are carried over.
fn write_replacing(profile: &Path, content: &[u8]) -> Result<()> {
    let target = fs::canonicalize(profile).map_err(|e| crate::error::fs::read_failed(profile, e))?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(&target)
        .map_err(|e| crate::error::fs::read_failed(&target, e))?
        .permissions();

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| crate::error::fs::write_failed(dir, e))?;
    tmp.write_all(content)
        .map_err(|e| crate::error::fs::write_failed(tmp.path(), e))?;
    fs::set_permissions(tmp.path(), permissions)
        .map_err(|e| crate::error::fs::write_failed(tmp.path(), e))?;
    tmp.persist(&target)
        .map_err(|e| crate::error::fs::write_failed(&target, e.error))?;
    Ok(())
}
