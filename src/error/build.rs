//! Packaging and variant integrity errors

use std::path::{Path, PathBuf};

use super::SetupError;

/// Creates a packager failure error
pub fn packager_failed(variant: &str, status: i32, stderr: impl Into<String>) -> SetupError {
    SetupError::PackagerFailed {
        variant: variant.to_string(),
        status,
        stderr: stderr.into(),
    }
}

/// Creates an auxiliary file missing error
pub fn auxiliary_missing(path: &Path) -> SetupError {
    SetupError::AuxiliaryFileMissing {
        path: path.display().to_string(),
    }
}

/// Creates an unknown variant error
pub fn variant_not_found(id: impl Into<String>) -> SetupError {
    SetupError::VariantNotFound { id: id.into() }
}

/// Creates an integrity violation listing every offending path
pub fn integrity_violation(tree: &Path, matches: Vec<PathBuf>) -> SetupError {
    SetupError::IntegrityViolation {
        tree: tree.display().to_string(),
        matches,
    }
}
