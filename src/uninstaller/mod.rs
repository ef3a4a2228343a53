//! Filesystem uninstallation of the agent
//!
//! Reverses an install step by step: install root, command link, data
//! directory, agent cache, shell profile entries. Every step is independent.
//! A missing target is recorded as `false`; a real I/O failure is recorded
//! and the remaining steps still run.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SetupError, TargetFailure};
use crate::installer::file_ops;
use crate::installer::profile;

/// What an uninstall removed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UninstallReport {
    pub removed_install: bool,
    pub removed_symlink: bool,
    pub removed_data: bool,
    pub removed_cache: bool,
    /// True when at least one profile had its PATH entry removed
    pub cleaned_profile: bool,
    pub cleaned_profiles: Vec<PathBuf>,
}

impl UninstallReport {
    /// Nothing was there to remove
    pub fn nothing_removed(&self) -> bool {
        !(self.removed_install
            || self.removed_symlink
            || self.removed_data
            || self.removed_cache
            || self.cleaned_profile)
    }
}

/// Targets of one uninstall
#[derive(Debug, Clone)]
pub struct UninstallRequest<'a> {
    pub install_root: &'a Path,
    pub command_link: &'a Path,
    pub data_dir: &'a Path,
    /// Agent cache directory, skipped when `None`
    pub cache_dir: Option<&'a Path>,
    pub profile_files: &'a [PathBuf],
    pub marker_line: &'a str,
}

/// Remove one target, recording a failure instead of returning early
fn remove_step(path: &Path, failures: &mut Vec<TargetFailure>) -> bool {
    match file_ops::remove_path(path) {
        Ok(removed) => {
            if removed {
                tracing::info!(path = %path.display(), "removed");
            } else {
                tracing::debug!(path = %path.display(), "not present");
            }
            removed
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "removal failed");
            failures.push(TargetFailure::new(path, &err));
            false
        }
    }
}

/// Uninstall everything named in `request`
///
/// Succeeds when nothing was installed. Fails with
/// [`SetupError::UninstallIncomplete`] only when a target exists and could
/// not be removed; the error carries the partial report.
pub fn uninstall(request: &UninstallRequest<'_>) -> Result<UninstallReport> {
    let mut failures = Vec::new();
    let mut report = UninstallReport {
        removed_install: remove_step(request.install_root, &mut failures),
        removed_symlink: remove_step(request.command_link, &mut failures),
        removed_data: remove_step(request.data_dir, &mut failures),
        removed_cache: request
            .cache_dir
            .is_some_and(|dir| remove_step(dir, &mut failures)),
        ..UninstallReport::default()
    };

    for profile_file in request.profile_files {
        match profile::remove_path_export(profile_file, request.marker_line) {
            Ok(true) => {
                tracing::info!(profile = %profile_file.display(), "PATH entry removed");
                report.cleaned_profiles.push(profile_file.clone());
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(profile = %profile_file.display(), error = %err, "profile not cleaned");
                failures.push(TargetFailure::new(profile_file, &err));
            }
        }
    }
    report.cleaned_profile = !report.cleaned_profiles.is_empty();

    if failures.is_empty() {
        Ok(report)
    } else {
        Err(SetupError::UninstallIncomplete { failures, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstallLayout;
    use crate::config::layout::EXPORT_LINE;
    use crate::installer::{self, InstallRequest};
    use crate::test_fixtures::{create_home, create_source_tree, write_file};

    fn request<'a>(layout: &'a InstallLayout, link: &'a Path) -> UninstallRequest<'a> {
        UninstallRequest {
            install_root: &layout.install_root,
            command_link: link,
            data_dir: &layout.data_dir,
            cache_dir: Some(&layout.cache_dir),
            profile_files: &layout.profile_files,
            marker_line: &layout.marker_line,
        }
    }

    fn install_everything(layout: &InstallLayout) {
        let (_dist, source) = create_source_tree(&layout.command_name);
        installer::install(&InstallRequest {
            source_tree: &source,
            install_root: &layout.install_root,
            command_name: &layout.command_name,
            bin_dir: &layout.bin_dir,
            data_dir: &layout.data_dir,
        })
        .unwrap();
        installer::ensure_path_export(&layout.profile_files, &layout.marker_line, &layout.export_line)
            .into_result()
            .unwrap();
        write_file(&layout.data_dir, "profile.json", "{}");
        write_file(&layout.cache_dir, "napta_storage.json", "{}");
    }

    #[test]
    fn test_uninstall_nothing_installed() {
        let (_home, layout) = create_home();
        let link = layout.command_link();

        let report = uninstall(&request(&layout, &link)).unwrap();

        assert_eq!(report, UninstallReport::default());
        assert!(report.nothing_removed());
    }

    #[test]
    fn test_uninstall_removes_everything() {
        let (_home, layout) = create_home();
        install_everything(&layout);
        let link = layout.command_link();

        let report = uninstall(&request(&layout, &link)).unwrap();

        assert!(report.removed_install);
        assert!(report.removed_symlink);
        assert!(report.removed_data);
        assert!(report.removed_cache);
        assert!(report.cleaned_profile);
        assert_eq!(report.cleaned_profiles.len(), layout.profile_files.len());

        assert!(!layout.install_root.exists());
        assert!(!file_ops::path_present(&link));
        assert!(!layout.data_dir.exists());
        assert!(!layout.cache_dir.exists());
        for profile_file in &layout.profile_files {
            let content = std::fs::read_to_string(profile_file).unwrap();
            assert!(!content.contains(&layout.marker_line));
            assert!(!content.contains(EXPORT_LINE));
        }
    }

    #[test]
    fn test_uninstall_twice_second_reports_nothing() {
        let (_home, layout) = create_home();
        install_everything(&layout);
        let link = layout.command_link();
        let req = request(&layout, &link);

        uninstall(&req).unwrap();
        let second = uninstall(&req).unwrap();

        assert!(second.nothing_removed());
    }

    #[test]
    fn test_uninstall_keeps_bin_dir_and_other_commands() {
        let (_home, layout) = create_home();
        install_everything(&layout);
        let other = write_file(&layout.bin_dir, "other-tool", "x");
        let link = layout.command_link();

        uninstall(&request(&layout, &link)).unwrap();

        assert!(other.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_uninstall_removes_dangling_link() {
        let (home, layout) = create_home();
        std::fs::create_dir_all(&layout.bin_dir).unwrap();
        let link = layout.command_link();
        file_ops::create_symlink(&home.path().join("gone"), &link).unwrap();

        let report = uninstall(&request(&layout, &link)).unwrap();

        assert!(report.removed_symlink);
        assert!(!report.removed_install);
    }

    #[test]
    fn test_uninstall_without_cache_dir_leaves_cache() {
        let (_home, layout) = create_home();
        install_everything(&layout);
        let link = layout.command_link();

        let report = uninstall(&UninstallRequest {
            cache_dir: None,
            ..request(&layout, &link)
        })
        .unwrap();

        assert!(!report.removed_cache);
        assert!(layout.cache_dir.exists());
    }

    #[test]
    fn test_uninstall_collects_profile_failure_and_continues() {
        let (home, layout) = create_home();
        install_everything(&layout);
        let link = layout.command_link();
        // A directory where a profile file is expected cannot be read as text
        let broken = home.path().join(".broken_profile");
        std::fs::create_dir_all(&broken).unwrap();
        let mut profiles = vec![broken.clone()];
        profiles.extend(layout.profile_files.iter().cloned());

        let result = uninstall(&UninstallRequest {
            profile_files: &profiles,
            ..request(&layout, &link)
        });

        match result {
            Err(SetupError::UninstallIncomplete { failures, report }) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].path, broken);
                assert!(report.removed_install);
                assert!(report.removed_data);
                assert_eq!(report.cleaned_profiles.len(), layout.profile_files.len());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
