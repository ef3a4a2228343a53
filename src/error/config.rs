//! Configuration errors

use std::path::Path;

use super::SetupError;

/// Creates a configuration parse error
pub fn parse_failed(path: &Path, reason: impl std::fmt::Display) -> SetupError {
    SetupError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> SetupError {
    SetupError::ConfigInvalid {
        message: message.into(),
    }
}
