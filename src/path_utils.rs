//! Path utilities for tsbot-setup
//!
//! Helpers for validating names that become directory components and for
//! rendering paths consistently in reports.

use std::path::{Component, Path, PathBuf};

/// Characters that are unsafe in a single path component
const PATH_UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Whether `name` can be used as a single directory or file name
///
/// Rejects empty names, `.` and `..`, and anything containing a separator or
/// a character that is invalid on common filesystems.
///
/// # Examples
///
/// ```ignore
/// assert!(is_safe_component("manual"));
/// assert!(!is_safe_component("../escape"));
/// assert!(!is_safe_component(""));
/// ```
pub fn is_safe_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.chars().any(|c| PATH_UNSAFE_CHARS.contains(&c) || c.is_control())
}

/// Convert a path to a string with forward slashes
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Path of `path` relative to `root`, or `path` itself when it is not under `root`
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Whether a relative path stays inside the directory it is joined to
pub fn is_contained_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_safe_component() {
        assert!(is_safe_component("manual"));
        assert!(is_safe_component("tsbot"));
        assert!(is_safe_component("full-2024.1"));
        assert!(!is_safe_component(""));
        assert!(!is_safe_component("."));
        assert!(!is_safe_component(".."));
        assert!(!is_safe_component("a/b"));
        assert!(!is_safe_component("a\\b"));
        assert!(!is_safe_component("c:"));
        assert!(!is_safe_component("tab\there"));
    }

    #[test]
    fn test_to_forward_slashes() {
        assert_eq!(to_forward_slashes(Path::new("a/b/c")), "a/b/c");
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(
            relative_to(Path::new("/out/full/dist/tsbot"), Path::new("/out/full/dist")),
            PathBuf::from("tsbot")
        );
        assert_eq!(
            relative_to(Path::new("/elsewhere/x"), Path::new("/out")),
            PathBuf::from("/elsewhere/x")
        );
    }

    #[test]
    fn test_is_contained_relative() {
        assert!(is_contained_relative(Path::new("timesheetbot_agent/config")));
        assert!(is_contained_relative(Path::new("./README.md")));
        assert!(!is_contained_relative(Path::new("../outside")));
        assert!(!is_contained_relative(Path::new("/abs")));
        assert!(!is_contained_relative(Path::new("")));
    }
}
