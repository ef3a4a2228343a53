//! Install command CLI wrapper
//!
//! This module provides the CLI interface for install operations,
//! delegating all business logic to operations/install.rs.

use std::path::PathBuf;

use console::Style;

use crate::cli::InstallArgs;
use crate::config::layout::COMMAND_NAME;
use crate::error::Result;
use crate::installer::{ProfileUpdate, QuarantineOutcome};
use crate::operations::{InstallOperation, InstallOptions, InstallSummary};

use super::helpers::{display_path, resolve_layout};

/// Default source tree: the `tsbot/` directory next to this binary
fn default_source_tree() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| crate::error::fs::io_error("Failed to locate the running binary", e))?;
    let dir = exe.parent().unwrap_or_else(|| std::path::Path::new("."));
    Ok(dir.join(COMMAND_NAME))
}

/// Run install command
pub fn run(home: Option<PathBuf>, args: InstallArgs) -> Result<()> {
    let layout = resolve_layout(home)?;
    let source_tree = match args.source {
        Some(source) => source,
        None => default_source_tree()?,
    };

    let operation = InstallOperation::new(
        &layout,
        InstallOptions {
            source_tree,
            path_var: std::env::var_os("PATH"),
        },
    );
    let summary = operation.execute()?;
    print_summary(&summary, &layout.home);

    summary.profile_failure.map_or(Ok(()), Err)
}

fn print_summary(summary: &InstallSummary, home: &std::path::Path) {
    let app = &summary.outcome.application;
    let bold = Style::new().bold();

    println!(
        "{} {} ({} files)",
        Style::new().green().bold().apply_to("Installed"),
        display_path(&app.install_root, home),
        summary.outcome.files_copied
    );
    println!(
        "  {} {} -> {}",
        bold.apply_to("Command:"),
        display_path(&app.command_link, home),
        display_path(&app.executable, home)
    );
    if let QuarantineOutcome::Failed(detail) = &summary.outcome.quarantine {
        println!(
            "  {} quarantine attribute not removed: {detail}",
            Style::new().yellow().bold().apply_to("Note:")
        );
    }

    let appended: Vec<String> = summary
        .profiles
        .iter()
        .filter(|(_, update)| *update == ProfileUpdate::Appended)
        .map(|(path, _)| display_path(path, home))
        .collect();
    if !appended.is_empty() {
        println!("  {} added to {}", bold.apply_to("PATH:"), appended.join(", "));
    } else if summary.is_complete() {
        println!("  {} already configured", bold.apply_to("PATH:"));
    } else {
        println!("  {} not configured", bold.apply_to("PATH:"));
    }

    if !summary.bin_dir_on_path {
        println!();
        println!(
            "Restart your terminal (or open a new one) to use '{}'.",
            Style::new().cyan().apply_to(COMMAND_NAME)
        );
    }
}
