//! Error types and handling for tsbot-setup
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`fs`]: File system errors (install, uninstall, shell profiles)
//! - [`build`]: Packaging and variant integrity errors
//! - [`config`]: Layout and variant catalog errors

pub mod build;
pub mod config;
pub mod fs;


use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::uninstaller::UninstallReport;

/// Coarse classification of a [`SetupError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O failure while installing or uninstalling
    Filesystem,
    /// Packaging-time failure
    Build,
    /// Forbidden modules found in an assembled variant
    Integrity,
    /// Invalid layout or variant catalog
    Config,
}

/// One failed target of a multi-target operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl TargetFailure {
    pub fn new(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for TargetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

fn join_failures(failures: &[TargetFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Main error type for tsbot-setup operations
#[derive(Error, Diagnostic, Debug)]
pub enum SetupError {
    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(tsbot::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(tsbot::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(tsbot::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to remove {path}: {reason}")]
    #[diagnostic(
        code(tsbot::fs::remove_failed),
        help("Check that you own the directory and that no process is using it")
    )]
    RemoveFailed { path: String, reason: String },

    #[error("Executable '{command}' not found in {source_tree}")]
    #[diagnostic(
        code(tsbot::install::executable_missing),
        help("Run the installer from the unpacked release directory, or pass --source")
    )]
    ExecutableMissing {
        command: String,
        source_tree: String,
    },

    #[error("Failed to link {link} -> {target}: {reason}")]
    #[diagnostic(code(tsbot::install::symlink_failed))]
    SymlinkFailed {
        link: String,
        target: String,
        reason: String,
    },

    #[error("Failed to update {} shell profile(s): {}", .failures.len(), join_failures(.failures))]
    #[diagnostic(
        code(tsbot::profile::update_failed),
        help("Add the PATH line to the listed files manually, or fix their permissions and re-run install")
    )]
    ProfilesNotUpdated { failures: Vec<TargetFailure> },

    #[error("Uninstall incomplete, {} target(s) could not be removed: {}", .failures.len(), join_failures(.failures))]
    #[diagnostic(
        code(tsbot::uninstall::incomplete),
        help("Fix the permissions of the listed paths and re-run uninstall")
    )]
    UninstallIncomplete {
        failures: Vec<TargetFailure>,
        report: UninstallReport,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(tsbot::fs::io_error))]
    IoError {
        message: String,
        #[source]
        source: Option<Box<std::io::Error>>,
    },

    // Build errors
    #[error("Packaging tool '{program}' could not be started: {reason}")]
    #[diagnostic(
        code(tsbot::build::packager_unavailable),
        help("Install the packaging tool or point --packager / TSBOT_PACKAGER at it")
    )]
    PackagerUnavailable { program: String, reason: String },

    #[error("Packaging failed for variant '{variant}' (exit status {status})")]
    #[diagnostic(code(tsbot::build::packager_failed))]
    PackagerFailed {
        variant: String,
        status: i32,
        stderr: String,
    },

    #[error("Auxiliary file missing: {path}")]
    #[diagnostic(
        code(tsbot::build::auxiliary_missing),
        help("Auxiliary files are resolved relative to the project root")
    )]
    AuxiliaryFileMissing { path: String },

    #[error("Unknown build variant: {id}")]
    #[diagnostic(code(tsbot::build::variant_not_found), help("Run 'tsbot-setup variants' to list variants"))]
    VariantNotFound { id: String },

    // Integrity errors
    #[error("Variant tree {tree} contains {} forbidden path(s): {}", .matches.len(), join_paths(.matches))]
    #[diagnostic(
        code(tsbot::build::integrity_violation),
        help("An excluded module was bundled anyway; fix the exclusion list before shipping")
    )]
    IntegrityViolation { tree: String, matches: Vec<PathBuf> },

    // Configuration errors
    #[error("Could not determine the home directory")]
    #[diagnostic(code(tsbot::config::no_home), help("Set HOME or pass --home"))]
    HomeNotFound,

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(tsbot::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(tsbot::config::invalid))]
    ConfigInvalid { message: String },
}

impl SetupError {
    /// Classify the error for exit handling and reporting
    pub fn kind(&self) -> ErrorKind {
        match self {
            SetupError::FileNotFound { .. }
            | SetupError::FileReadFailed { .. }
            | SetupError::FileWriteFailed { .. }
            | SetupError::RemoveFailed { .. }
            | SetupError::ExecutableMissing { .. }
            | SetupError::SymlinkFailed { .. }
            | SetupError::ProfilesNotUpdated { .. }
            | SetupError::UninstallIncomplete { .. }
            | SetupError::IoError { .. } => ErrorKind::Filesystem,
            SetupError::PackagerUnavailable { .. }
            | SetupError::PackagerFailed { .. }
            | SetupError::AuxiliaryFileMissing { .. }
            | SetupError::VariantNotFound { .. } => ErrorKind::Build,
            SetupError::IntegrityViolation { .. } => ErrorKind::Integrity,
            SetupError::HomeNotFound
            | SetupError::ConfigParseFailed { .. }
            | SetupError::ConfigInvalid { .. } => ErrorKind::Config,
        }
    }
}

impl From<std::io::Error> for SetupError {
    fn from(err: std::io::Error) -> Self {
        SetupError::IoError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for SetupError {
    fn from(err: serde_yaml::Error) -> Self {
        SetupError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SetupError {
    fn from(err: serde_json::Error) -> Self {
        SetupError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SetupError>;
