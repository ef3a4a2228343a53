//! Exclusion enforcement for assembled variant trees
//!
//! A module the packager was told to leave out can still end up in the tree
//! through a transitive import. The path scan walks every path and reports
//! each one whose relative path mentions a forbidden fingerprint.
//!
//! Pure-Python modules of a onedir build have no path of their own: they sit
//! in the PYZ archive inside the executable, whose table of contents stores
//! dotted module names uncompressed. The module-name scan searches the bytes
//! of every file in the frozen application directory for those names.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::path_utils;

/// Normalize fingerprints for matching: lowercased, blank entries dropped
fn normalize(fingerprints: &[String]) -> Vec<String> {
    fingerprints
        .iter()
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Does `relative` contain any of the normalized `fingerprints`?
fn matches_any(relative: &Path, fingerprints: &[String]) -> bool {
    let text = path_utils::to_forward_slashes(relative).to_lowercase();
    fingerprints.iter().any(|f| text.contains(f.as_str()))
}

/// List every path under `tree` whose relative path contains a fingerprint
///
/// Matching is a case-insensitive substring test on the path text. Symlinks
/// are reported by their own path and never followed. The whole tree is
/// walked; the result is sorted. An unreadable entry is an error rather than
/// a silent skip, so a partial scan can never pass.
pub fn scan_tree(tree: &Path, fingerprints: &[String]) -> Result<Vec<PathBuf>> {
    if !tree.is_dir() {
        return Err(crate::error::fs::not_found(tree));
    }

    let fingerprints = normalize(fingerprints);
    if fingerprints.is_empty() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for entry in WalkDir::new(tree).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| crate::error::fs::read_failed(tree, e))?;
        let relative = path_utils::relative_to(entry.path(), tree);
        if matches_any(&relative, &fingerprints) {
            tracing::debug!(path = %relative.display(), "forbidden path");
            matches.push(relative);
        }
    }

    matches.sort();
    Ok(matches)
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// List every file under `app_dir` whose bytes contain an excluded module name
///
/// Names are matched exactly (module names are case-sensitive). Paths are
/// reported relative to `tree`, sorted. A missing `app_dir` yields no matches.
pub fn scan_module_names(tree: &Path, app_dir: &Path, modules: &[String]) -> Result<Vec<PathBuf>> {
    let needles: Vec<&[u8]> = modules
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .map(str::as_bytes)
        .collect();
    if needles.is_empty() || !app_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for entry in WalkDir::new(app_dir).follow_links(false) {
        let entry = entry.map_err(|e| crate::error::fs::read_failed(app_dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let bytes = fs::read(entry.path()).map_err(|e| crate::error::fs::read_failed(entry.path(), e))?;
        if needles.iter().any(|needle| contains_bytes(&bytes, needle)) {
            let relative = path_utils::relative_to(entry.path(), tree);
            tracing::debug!(path = %relative.display(), "file names an excluded module");
            matches.push(relative);
        }
    }

    matches.sort();
    Ok(matches)
}

fn fail_on_matches(tree: &Path, matches: Vec<PathBuf>) -> Result<()> {
    if matches.is_empty() {
        tracing::info!(tree = %tree.display(), "integrity check passed");
        Ok(())
    } else {
        tracing::warn!(tree = %tree.display(), count = matches.len(), "integrity check failed");
        Err(crate::error::build::integrity_violation(tree, matches))
    }
}

/// Fail with [`SetupError::IntegrityViolation`](crate::error::SetupError::IntegrityViolation)
/// when `tree` contains any forbidden path
pub fn verify_exclusion(tree: &Path, fingerprints: &[String]) -> Result<()> {
    fail_on_matches(tree, scan_tree(tree, fingerprints)?)
}

/// Full check of an assembled variant: forbidden paths anywhere in `tree`,
/// plus excluded module names inside the frozen application at `app_dir`
pub fn verify_variant(
    tree: &Path,
    app_dir: &Path,
    fingerprints: &[String],
    modules: &[String],
) -> Result<()> {
    if modules.iter().all(|m| m.trim().is_empty()) {
        return verify_exclusion(tree, fingerprints);
    }
    let mut matches = scan_tree(tree, fingerprints)?;
    matches.extend(scan_module_names(tree, app_dir, modules)?);
    matches.sort();
    matches.dedup();
    fail_on_matches(tree, matches)
}
