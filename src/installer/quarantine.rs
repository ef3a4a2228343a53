//! Best-effort removal of the macOS quarantine attribute
//!
//! Files downloaded through a browser carry `com.apple.quarantine`, which makes
//! Gatekeeper refuse to run the frozen executable. Stripping it is never
//! required for a correct install: the attribute may be absent, the tool may
//! be missing, or the platform may not have it at all. The outcome is returned
//! as a value so callers decide, visibly, to ignore it.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

/// Extended attribute set on downloaded files
pub const QUARANTINE_ATTRIBUTE: &str = "com.apple.quarantine";

/// Tool used to remove extended attributes on macOS
pub const XATTR_PROGRAM: &str = "xattr";

/// Result of a quarantine strip attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum QuarantineOutcome {
    /// The attribute was removed (or was not present)
    Stripped,
    /// Not attempted on this platform, or the tool is unavailable
    Skipped(String),
    /// The tool ran and reported an error
    Failed(String),
}

impl QuarantineOutcome {
    pub fn is_stripped(&self) -> bool {
        matches!(self, QuarantineOutcome::Stripped)
    }
}

/// Strip the quarantine attribute recursively from `root`
pub fn strip_quarantine(root: &Path) -> QuarantineOutcome {
    if cfg!(target_os = "macos") {
        strip_quarantine_with(XATTR_PROGRAM, root)
    } else {
        QuarantineOutcome::Skipped("quarantine attributes only exist on macOS".to_string())
    }
}

/// Strip the attribute using an explicit `xattr`-compatible program
pub fn strip_quarantine_with(program: &str, root: &Path) -> QuarantineOutcome {
    let output = Command::new(program)
        .arg("-dr")
        .arg(QUARANTINE_ATTRIBUTE)
        .arg(root)
        .stdin(Stdio::null())
        .output();

    match output {
        Ok(output) if output.status.success() => QuarantineOutcome::Stripped,
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("{program} exited with {}", output.status)
            } else {
                stderr
            };
            QuarantineOutcome::Failed(detail)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            QuarantineOutcome::Skipped(format!("{program} not found"))
        }
        Err(e) => QuarantineOutcome::Failed(e.to_string()),
    }
}
