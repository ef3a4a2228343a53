//! Verify command implementation
//!
//! Standalone integrity scan of an already assembled tree.

use console::Style;

use crate::build::{BuildManifest, integrity};
use crate::cli::VerifyArgs;
use crate::config::VariantCatalog;
use crate::config::layout::COMMAND_NAME;
use crate::config::variants::CATALOG_FILE;
use crate::error::{Result, SetupError};

use super::helpers::print_violations;

/// What a verify run checks
#[derive(Debug, PartialEq, Eq)]
struct Checks {
    fingerprints: Vec<String>,
    /// Excluded module names searched for inside the application directory
    modules: Vec<String>,
    command: String,
}

/// Fingerprints from the flags plus, with `--variant`, the variant's own
fn collect_checks(args: &VerifyArgs) -> Result<Checks> {
    let mut checks = Checks {
        fingerprints: args.fingerprints.clone(),
        modules: Vec::new(),
        command: COMMAND_NAME.to_string(),
    };
    if let Some(id) = &args.variant {
        let catalog_path = args
            .config
            .clone()
            .unwrap_or_else(|| std::path::PathBuf::from(CATALOG_FILE));
        let catalog = VariantCatalog::load_or_builtin(&catalog_path)?;
        let variant = catalog
            .find(id)
            .ok_or_else(|| crate::error::build::variant_not_found(id.clone()))?;
        checks.fingerprints.extend(variant.forbidden_fingerprints());
        checks.modules.clone_from(&variant.exclude_modules);
        checks.command.clone_from(&variant.command);
    }
    if checks.fingerprints.iter().all(|f| f.trim().is_empty()) {
        return Err(crate::error::config::invalid(
            "no fingerprints to check, pass --fingerprint or --variant",
        ));
    }
    Ok(checks)
}

/// Run verify command
pub fn run(args: VerifyArgs) -> Result<()> {
    let checks = collect_checks(&args)?;
    let fingerprints = &checks.fingerprints;
    let app_dir = args.tree.join(&checks.command);

    match integrity::verify_variant(&args.tree, &app_dir, fingerprints, &checks.modules) {
        Ok(()) => {}
        Err(SetupError::IntegrityViolation { tree, matches }) => {
            print_violations(&tree, &matches);
            return Err(SetupError::IntegrityViolation { tree, matches });
        }
        Err(err) => return Err(err),
    }

    println!(
        "{} {} is free of: {}",
        Style::new().green().bold().apply_to("Clean"),
        args.tree.display(),
        fingerprints.join(", ")
    );

    if let Some(manifest) = BuildManifest::read(&args.tree)? {
        let changed = manifest.changed_files(&args.tree)?;
        if changed.is_empty() {
            println!("  manifest of variant '{}' matches", manifest.variant);
        } else {
            println!(
                "  {} {} file(s) differ from the manifest of variant '{}':",
                Style::new().yellow().bold().apply_to("Warning:"),
                changed.len(),
                manifest.variant
            );
            for path in changed {
                println!("    {path}");
            }
        }
    }

    Ok(())
}
