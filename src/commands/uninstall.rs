//! Uninstall command CLI wrapper
//!
//! This module provides the CLI interface for uninstall operations,
//! delegating all business logic to operations/uninstall.rs.

use std::path::{Path, PathBuf};

use console::Style;

use crate::cli::UninstallArgs;
use crate::config::InstallLayout;
use crate::error::{Result, SetupError};
use crate::operations::{UninstallOperation, UninstallOptions};
use crate::uninstaller::UninstallReport;

use super::helpers::{display_path, resolve_layout};

/// Run uninstall command
pub fn run(home: Option<PathBuf>, args: UninstallArgs) -> Result<()> {
    let layout = resolve_layout(home)?;
    let options = UninstallOptions {
        keep_cache: args.keep_cache,
    };

    match UninstallOperation::new(&layout, options).execute() {
        Ok(report) => {
            print_report(&report, &layout);
            Ok(())
        }
        Err(SetupError::UninstallIncomplete { failures, report }) => {
            print_report(&report, &layout);
            Err(SetupError::UninstallIncomplete { failures, report })
        }
        Err(err) => Err(err),
    }
}

fn print_report(report: &UninstallReport, layout: &InstallLayout) {
    if report.nothing_removed() {
        println!("Nothing to uninstall.");
        return;
    }

    let home = &layout.home;
    let command_link = layout.command_link();
    let steps: [(bool, &Path); 4] = [
        (report.removed_install, &layout.install_root),
        (report.removed_symlink, &command_link),
        (report.removed_data, &layout.data_dir),
        (report.removed_cache, &layout.cache_dir),
    ];
    for (removed, path) in steps {
        if removed {
            println!(
                "{} {}",
                Style::new().green().bold().apply_to("Removed"),
                display_path(path, home)
            );
        }
    }
    for profile in &report.cleaned_profiles {
        println!(
            "{} PATH entry from {}",
            Style::new().green().bold().apply_to("Removed"),
            display_path(profile, home)
        );
    }
}
