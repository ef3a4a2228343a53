//! File system errors

use std::path::Path;

use super::SetupError;

/// Creates a file not found error
pub fn not_found(path: &Path) -> SetupError {
    SetupError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file read error from an I/O failure
pub fn read_failed(path: &Path, err: impl std::fmt::Display) -> SetupError {
    SetupError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write error from an I/O failure
pub fn write_failed(path: &Path, err: impl std::fmt::Display) -> SetupError {
    SetupError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a removal error from an I/O failure
pub fn remove_failed(path: &Path, err: impl std::fmt::Display) -> SetupError {
    SetupError::RemoveFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error with a context message and the underlying error
pub fn io_error(message: impl Into<String>, err: std::io::Error) -> SetupError {
    SetupError::IoError {
        message: format!("{}: {}", message.into(), err),
        source: Some(Box::new(err)),
    }
}
