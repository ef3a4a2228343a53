//! Build command CLI wrapper
//!
//! This module provides the CLI interface for variant builds,
//! delegating all business logic to operations/build.rs.

use std::path::PathBuf;

use console::{Style, Term};

use crate::cli::BuildArgs;
use crate::error::{Result, SetupError};
use crate::operations::{BuildOperation, BuildOptions};

use super::helpers::print_violations;

/// Installer binary to ship: the flag, else the running binary
fn setup_binary(args: &BuildArgs) -> Result<Option<PathBuf>> {
    if args.no_setup_binary {
        return Ok(None);
    }
    match &args.setup_binary {
        Some(path) => Ok(Some(path.clone())),
        None => std::env::current_exe()
            .map(Some)
            .map_err(|e| crate::error::fs::io_error("Failed to locate the running binary", e)),
    }
}

/// Run build command
pub fn run(args: BuildArgs) -> Result<()> {
    let setup_binary = setup_binary(&args)?;
    let operation = BuildOperation::new(BuildOptions {
        project_root: args.project,
        output_dir: args.output,
        catalog: args.config,
        packager: args.packager,
        setup_binary,
        variants: args.variants,
        show_progress: Term::stderr().is_term(),
    });

    let outcomes = match operation.execute() {
        Ok(outcomes) => outcomes,
        Err(SetupError::IntegrityViolation { tree, matches }) => {
            print_violations(&tree, &matches);
            return Err(SetupError::IntegrityViolation { tree, matches });
        }
        Err(err) => return Err(err),
    };

    for outcome in &outcomes {
        println!(
            "{} {} -> {}",
            Style::new().green().bold().apply_to("Built"),
            Style::new().bold().apply_to(&outcome.variant.id),
            outcome.variant.output_tree.display()
        );
        println!(
            "  {} files, {} fingerprint(s) checked, tree {}",
            outcome.manifest.files.len(),
            outcome.manifest.fingerprints.len(),
            Style::new().dim().apply_to(&outcome.manifest.tree_hash)
        );
        println!("  manifest {}", outcome.manifest_path.display());
    }

    Ok(())
}
