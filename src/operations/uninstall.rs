//! Uninstall operation module
//!
//! This module provides UninstallOperation wrapper struct for uninstall workflow.

use crate::config::InstallLayout;
use crate::error::Result;
use crate::uninstaller::{self, UninstallReport, UninstallRequest};

/// Configuration options for uninstall
#[derive(Debug, Clone, Default)]
pub struct UninstallOptions {
    pub keep_cache: bool,
}

/// High-level uninstall operation
pub struct UninstallOperation<'a> {
    layout: &'a InstallLayout,
    options: UninstallOptions,
}

impl<'a> UninstallOperation<'a> {
    pub fn new(layout: &'a InstallLayout, options: UninstallOptions) -> Self {
        Self { layout, options }
    }

    /// Execute uninstall operation
    pub fn execute(&self) -> Result<UninstallReport> {
        let layout = self.layout;
        let command_link = layout.command_link();
        let cache_dir = (!self.options.keep_cache).then_some(layout.cache_dir.as_path());

        uninstaller::uninstall(&UninstallRequest {
            install_root: &layout.install_root,
            command_link: &command_link,
            data_dir: &layout.data_dir,
            cache_dir,
            profile_files: &layout.profile_files,
            marker_line: &layout.marker_line,
        })
    }
}
