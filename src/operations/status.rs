//! Status operation module
//!
//! Read-only: reports which parts of an installation exist without changing
//! anything on disk.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::InstallLayout;
use crate::error::Result;
use crate::hash;
use crate::installer::{InstallReceipt, file_ops, profile, receipt};

/// State of the command symlink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "target", rename_all = "snake_case")]
pub enum LinkState {
    Missing,
    /// Points at the installed executable
    Valid,
    /// A symlink whose target does not exist
    Dangling(PathBuf),
    /// Something else occupies the link path
    Foreign(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileStatus {
    pub path: PathBuf,
    pub has_export: bool,
}

/// Snapshot of one installation
#[derive(Debug, Clone, Serialize)]
pub struct InstallStatus {
    pub install_root: PathBuf,
    pub installed: bool,
    pub executable_ok: bool,
    pub command_link: PathBuf,
    pub link: LinkState,
    pub data_dir: PathBuf,
    pub data_present: bool,
    pub cache_dir: PathBuf,
    pub cache_present: bool,
    pub profiles: Vec<ProfileStatus>,
    pub receipt: Option<InstallReceipt>,
    /// Whether the installed tree still matches the receipt hash
    pub tree_intact: Option<bool>,
}

impl InstallStatus {
    /// Nothing of an installation is left
    pub fn is_clean(&self) -> bool {
        !self.installed
            && self.link == LinkState::Missing
            && !self.data_present
            && !self.cache_present
            && self.profiles.iter().all(|p| !p.has_export)
    }
}

/// High-level status operation
pub struct StatusOperation<'a> {
    layout: &'a InstallLayout,
}

impl<'a> StatusOperation<'a> {
    pub fn new(layout: &'a InstallLayout) -> Self {
        Self { layout }
    }

    /// Execute status operation
    pub fn execute(&self) -> Result<InstallStatus> {
        let layout = self.layout;
        let executable = layout.installed_executable();
        let command_link = layout.command_link();
        let installed = layout.install_root.is_dir();

        let receipt = if installed {
            InstallReceipt::read(&layout.install_root)?
        } else {
            None
        };
        let tree_intact = match &receipt {
            Some(receipt) => {
                let actual = hash::hash_directory(&layout.install_root, &[receipt::RECEIPT_FILE])?;
                Some(hash::verify_hash(&receipt.tree_hash, &actual))
            }
            None => None,
        };

        Ok(InstallStatus {
            install_root: layout.install_root.clone(),
            installed,
            executable_ok: file_ops::is_executable(&executable),
            link: link_state(&command_link, &executable),
            command_link,
            data_dir: layout.data_dir.clone(),
            data_present: layout.data_dir.is_dir(),
            cache_dir: layout.cache_dir.clone(),
            cache_present: layout.cache_dir.is_dir(),
            profiles: layout
                .profile_files
                .iter()
                .map(|path| ProfileStatus {
                    path: path.clone(),
                    has_export: profile::has_export(path, &layout.export_line),
                })
                .collect(),
            receipt,
            tree_intact,
        })
    }
}

fn link_state(link: &std::path::Path, executable: &std::path::Path) -> LinkState {
    if !file_ops::path_present(link) {
        return LinkState::Missing;
    }
    match fs::read_link(link) {
        Ok(target) if target == executable && executable.is_file() => LinkState::Valid,
        Ok(target) if !link.exists() => LinkState::Dangling(target),
        Ok(target) => LinkState::Foreign(target),
        Err(_) => LinkState::Foreign(link.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{InstallOperation, InstallOptions};
    use crate::test_fixtures::{create_home, create_source_tree, write_file};

    #[test]
    fn test_status_of_empty_home() {
        let (_home, layout) = create_home();

        let status = StatusOperation::new(&layout).execute().unwrap();

        assert!(status.is_clean());
        assert!(status.receipt.is_none());
        assert_eq!(status.tree_intact, None);
    }

    #[test]
    fn test_status_after_install() {
        let (_home, layout) = create_home();
        let (_dist, source) = create_source_tree("tsbot");
        InstallOperation::new(
            &layout,
            InstallOptions {
                source_tree: source,
                path_var: None,
            },
        )
        .execute()
        .unwrap();

        let status = StatusOperation::new(&layout).execute().unwrap();

        assert!(status.installed);
        assert!(status.executable_ok);
        assert_eq!(status.link, LinkState::Valid);
        assert!(status.profiles.iter().all(|p| p.has_export));
        assert_eq!(status.tree_intact, Some(true));
        assert!(!status.data_present);
    }

    #[test]
    fn test_status_detects_modified_tree() {
        let (_home, layout) = create_home();
        let (_dist, source) = create_source_tree("tsbot");
        InstallOperation::new(
            &layout,
            InstallOptions {
                source_tree: source,
                path_var: None,
            },
        )
        .execute()
        .unwrap();
        write_file(&layout.install_root, "_internal/injected.py", "x");

        let status = StatusOperation::new(&layout).execute().unwrap();

        assert_eq!(status.tree_intact, Some(false));
    }

    #[cfg(unix)]
    #[test]
    fn test_status_dangling_link() {
        let (home, layout) = create_home();
        std::fs::create_dir_all(&layout.bin_dir).unwrap();
        let gone = home.path().join("gone");
        file_ops::create_symlink(&gone, &layout.command_link()).unwrap();

        let status = StatusOperation::new(&layout).execute().unwrap();

        assert_eq!(status.link, LinkState::Dangling(gone));
        assert!(!status.is_clean());
    }

    #[test]
    fn test_status_serializes_to_json() {
        let (_home, layout) = create_home();
        let status = StatusOperation::new(&layout).execute().unwrap();

        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["installed"], false);
        assert_eq!(json["link"]["state"], "missing");
    }
}
