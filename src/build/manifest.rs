//! Build manifest (build-manifest.json)
//!
//! Written into a variant's output tree once the integrity check passed, so
//! a shipped tree records what it was built from and which fingerprints it
//! was checked against.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::build::assembler::BuildVariant;
use crate::error::Result;
use crate::hash;
use crate::path_utils;

/// Manifest file name inside the output tree
pub const MANIFEST_FILE: &str = "build-manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildManifest {
    pub builder_version: String,
    pub variant: String,
    pub entrypoint: String,
    pub command: String,
    pub excluded_modules: Vec<String>,
    /// Fingerprints the tree was verified against
    pub fingerprints: Vec<String>,
    /// Hash of the whole tree, manifest excluded
    pub tree_hash: String,
    /// Per-file hashes keyed by forward-slash relative path
    pub files: BTreeMap<String, String>,
}

impl BuildManifest {
    /// Hash the output tree of a verified variant
    pub fn generate(variant: &BuildVariant, fingerprints: &[String]) -> Result<Self> {
        Ok(Self {
            builder_version: env!("CARGO_PKG_VERSION").to_string(),
            variant: variant.id.clone(),
            entrypoint: variant.entrypoint.clone(),
            command: variant.command.clone(),
            excluded_modules: variant.excluded_modules.clone(),
            fingerprints: fingerprints.to_vec(),
            tree_hash: hash::hash_directory(&variant.output_tree, &[MANIFEST_FILE])?,
            files: hash_files(&variant.output_tree)?,
        })
    }

    pub fn path_in(tree: &Path) -> PathBuf {
        tree.join(MANIFEST_FILE)
    }

    pub fn write(&self, tree: &Path) -> Result<PathBuf> {
        let path = Self::path_in(tree);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json + "\n").map_err(|e| crate::error::fs::write_failed(&path, e))?;
        Ok(path)
    }

    /// Read the manifest of `tree`, `None` when it has none
    pub fn read(tree: &Path) -> Result<Option<Self>> {
        let path = Self::path_in(tree);
        if !path.is_file() {
            return Ok(None);
        }
        let json =
            std::fs::read_to_string(&path).map_err(|e| crate::error::fs::read_failed(&path, e))?;
        let manifest = serde_json::from_str(&json)
            .map_err(|e| crate::error::config::parse_failed(&path, e))?;
        Ok(Some(manifest))
    }

    /// Relative paths that were added, removed or changed since the manifest was written
    pub fn changed_files(&self, tree: &Path) -> Result<Vec<String>> {
        let current = hash_files(tree)?;
        let mut changed: Vec<String> = self
            .files
            .iter()
            .filter(|(path, digest)| current.get(*path) != Some(*digest))
            .map(|(path, _)| path.clone())
            .chain(
                current
                    .keys()
                    .filter(|path| !self.files.contains_key(*path))
                    .cloned(),
            )
            .collect();
        changed.sort();
        Ok(changed)
    }
}

/// Hash every regular file under `tree` except the manifest itself
fn hash_files(tree: &Path) -> Result<BTreeMap<String, String>> {
    let mut files = BTreeMap::new();
    for entry in WalkDir::new(tree).min_depth(1).follow_links(false) {
        let entry = entry.map_err(|e| crate::error::fs::read_failed(tree, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = path_utils::to_forward_slashes(&path_utils::relative_to(entry.path(), tree));
        if relative == MANIFEST_FILE {
            continue;
        }
        files.insert(relative, hash::hash_file(entry.path())?);
    }
    Ok(files)
}
