//! Install operation module
//!
//! Runs the filesystem install, then the PATH configuration. A failed
//! profile never undoes the install; it is reported next to the result.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::InstallLayout;
use crate::error::{Result, SetupError};
use crate::installer::{self, InstallOutcome, InstallRequest, ProfileUpdate};

/// Configuration options for install
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Frozen application directory
    pub source_tree: PathBuf,
    /// PATH value used for the restart hint
    pub path_var: Option<OsString>,
}

/// Everything an install did
#[derive(Debug)]
pub struct InstallSummary {
    pub outcome: InstallOutcome,
    /// Profiles handled successfully
    pub profiles: Vec<(PathBuf, ProfileUpdate)>,
    /// Set when at least one profile could not be updated
    pub profile_failure: Option<SetupError>,
    /// The binary directory is already on PATH in this shell
    pub bin_dir_on_path: bool,
}

impl InstallSummary {
    pub fn is_complete(&self) -> bool {
        self.profile_failure.is_none()
    }
}

/// High-level install operation
pub struct InstallOperation<'a> {
    layout: &'a InstallLayout,
    options: InstallOptions,
}

impl<'a> InstallOperation<'a> {
    pub fn new(layout: &'a InstallLayout, options: InstallOptions) -> Self {
        Self { layout, options }
    }

    /// Execute install operation
    pub fn execute(&self) -> Result<InstallSummary> {
        let layout = self.layout;
        let outcome = installer::install(&InstallRequest {
            source_tree: &self.options.source_tree,
            install_root: &layout.install_root,
            command_name: &layout.command_name,
            bin_dir: &layout.bin_dir,
            data_dir: &layout.data_dir,
        })?;

        let report = installer::ensure_path_export(
            &layout.profile_files,
            &layout.marker_line,
            &layout.export_line,
        );
        let profiles = report.updated.clone();
        let profile_failure = report.into_result().err();

        let bin_dir_on_path =
            InstallLayout::dir_on_path(&layout.bin_dir, self.options.path_var.as_deref());

        Ok(InstallSummary {
            outcome,
            profiles,
            profile_failure,
            bin_dir_on_path,
        })
    }
}
