//! Test fixtures and utilities for reducing test setup duplication.
//!
//! Every lifecycle operation takes its paths explicitly, so tests root
//! everything in a temp directory that stands in for `$HOME`.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{create_home, create_source_tree};
//!
//! #[test]
//! fn my_test() {
//!     let (home, layout) = create_home();
//!     let (dist, source) = create_source_tree("tsbot");
//! }
//! ```

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::InstallLayout;

/// Base directory for temp dirs; never relative, so nothing lands in the repo
/// when TMPDIR is set to a relative path.
fn temp_dir_base() -> PathBuf {
    let t = std::env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// Create a temp directory acting as `$HOME` and the layout rooted in it.
#[must_use]
pub fn create_home() -> (TempDir, InstallLayout) {
    let temp = create_temp_dir();
    let layout = InstallLayout::from_home(temp.path());
    (temp, layout)
}

/// Write `content` to `root/rel`, creating parent directories.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

/// Create a frozen-application tree like the packager emits.
///
/// Layout: `<temp>/dist/<command>` (not yet executable, the installer must fix
/// that) plus a few files under `_internal/`.
#[must_use]
pub fn create_source_tree(command: &str) -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    let source = temp.path().join("dist");
    write_file(&source, command, "#!/bin/sh\necho tsbot\n");
    write_file(&source, "_internal/base_library.zip", "pyz");
    write_file(
        &source,
        "_internal/timesheetbot_agent/config/holidays.json",
        "{}",
    );
    (temp, source)
}

/// Unix permission bits of `path`.
///
/// # Panics
///
/// Panics if the metadata cannot be read.
#[cfg(unix)]
pub fn mode_of(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .expect("Failed to read metadata")
        .permissions()
        .mode()
        & 0o777
}
