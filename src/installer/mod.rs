//! Filesystem installation of the frozen agent
//!
//! This module handles:
//! - Replacing the install root with a fresh copy of the packaged tree
//! - Making the executable runnable and linking it into the binary directory
//! - Best-effort quarantine stripping ([`quarantine`])
//! - Shell profile PATH configuration ([`profile`])
//! - The install receipt ([`receipt`])

pub mod file_ops;
pub mod profile;
pub mod quarantine;
pub mod receipt;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};
use crate::hash;

pub use profile::{ProfileUpdate, ensure_path_export};
pub use quarantine::QuarantineOutcome;
pub use receipt::InstallReceipt;

/// Paths of an installed application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledApplication {
    pub install_root: PathBuf,
    pub executable: PathBuf,
    pub command_link: PathBuf,
    /// Owned by the agent; the installer never creates it
    pub data_dir: PathBuf,
}

#[cfg(test)]
impl InstalledApplication {
    /// The command link exists and resolves to a runnable executable
    pub fn link_is_valid(&self) -> bool {
        fs::read_link(&self.command_link).is_ok_and(|target| target == self.executable)
            && file_ops::is_executable(&self.executable)
    }
}

/// Inputs of one install
#[derive(Debug, Clone)]
pub struct InstallRequest<'a> {
    pub source_tree: &'a Path,
    pub install_root: &'a Path,
    pub command_name: &'a str,
    pub bin_dir: &'a Path,
    pub data_dir: &'a Path,
}

/// Result of an install: the installed paths plus the ignored quarantine outcome
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    pub application: InstalledApplication,
    pub quarantine: QuarantineOutcome,
    pub files_copied: usize,
}

/// Check the source tree before anything on disk is touched
fn validate_request(request: &InstallRequest<'_>) -> Result<PathBuf> {
    if !request.source_tree.is_dir() {
        return Err(crate::error::fs::not_found(request.source_tree));
    }

    let source_executable = request.source_tree.join(request.command_name);
    if !source_executable.is_file() {
        return Err(SetupError::ExecutableMissing {
            command: request.command_name.to_string(),
            source_tree: request.source_tree.display().to_string(),
        });
    }

    // Removing an install root that contains the source would delete the source
    let source = fs::canonicalize(request.source_tree)
        .map_err(|e| crate::error::fs::read_failed(request.source_tree, e))?;
    if let Ok(root) = fs::canonicalize(request.install_root) {
        if source.starts_with(&root) {
            return Err(crate::error::config::invalid(format!(
                "source tree {} lies inside the install root {}",
                source.display(),
                root.display()
            )));
        }
    }

    Ok(source)
}

/// Replace `install_root` with a copy of the source tree and link the command
///
/// Removal of the old install root finishes before the copy starts. Re-running
/// with the same inputs produces the same tree, link and permissions, so a
/// crash midway is fixed by installing again.
pub fn install(request: &InstallRequest<'_>) -> Result<InstallOutcome> {
    let source = validate_request(request)?;
    let install_root = request.install_root;

    if file_ops::remove_path(install_root)? {
        tracing::info!(path = %install_root.display(), "removed previous install");
    }
    fs::create_dir_all(install_root)
        .map_err(|e| crate::error::fs::write_failed(install_root, e))?;
    let files_copied = file_ops::copy_tree(&source, install_root)?;

    let executable = install_root.join(request.command_name);
    file_ops::make_executable(&executable)?;

    let command_link = link_command(&executable, request.bin_dir, request.command_name)?;

    let quarantine = quarantine::strip_quarantine(install_root);
    if !quarantine.is_stripped() {
        tracing::debug!(?quarantine, "quarantine attribute not stripped, continuing");
    }

    let receipt = InstallReceipt {
        installer_version: env!("CARGO_PKG_VERSION").to_string(),
        command: request.command_name.to_string(),
        source_tree: source,
        tree_hash: hash::hash_directory(install_root, &[receipt::RECEIPT_FILE])?,
        quarantine: quarantine.clone(),
    };
    receipt.write(install_root)?;

    tracing::info!(
        install_root = %install_root.display(),
        link = %command_link.display(),
        files_copied,
        "install complete"
    );

    Ok(InstallOutcome {
        application: InstalledApplication {
            install_root: install_root.to_path_buf(),
            executable,
            command_link,
            data_dir: request.data_dir.to_path_buf(),
        },
        quarantine,
        files_copied,
    })
}

/// Create or replace `bin_dir/command_name -> executable`
fn link_command(executable: &Path, bin_dir: &Path, command_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(bin_dir).map_err(|e| crate::error::fs::write_failed(bin_dir, e))?;
    let link = bin_dir.join(command_name);

    if let Ok(metadata) = fs::symlink_metadata(&link) {
        if metadata.is_dir() {
            return Err(SetupError::SymlinkFailed {
                link: link.display().to_string(),
                target: executable.display().to_string(),
                reason: "a directory is in the way".to_string(),
            });
        }
        fs::remove_file(&link).map_err(|e| crate::error::fs::remove_failed(&link, e))?;
    }

    file_ops::create_symlink(executable, &link)?;
    Ok(link)
}

#[cfg(test)]
mod tests;
