//! Variants command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::VariantsArgs;
use crate::config::VariantCatalog;
use crate::config::variants::CATALOG_FILE;
use crate::error::Result;

/// Run variants command
pub fn run(args: VariantsArgs) -> Result<()> {
    let path = args.config.unwrap_or_else(|| PathBuf::from(CATALOG_FILE));
    let catalog = VariantCatalog::load_or_builtin(&path)?;

    if args.yaml {
        print!("{}", catalog.to_yaml()?);
        return Ok(());
    }

    println!("Build variants ({}):", catalog.variants.len());
    println!();
    for variant in &catalog.variants {
        println!("  {}", Style::new().bold().yellow().apply_to(&variant.id));
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Entrypoint:"),
            variant.entrypoint
        );
        if variant.exclude_modules.is_empty() {
            println!("    {} none", Style::new().bold().apply_to("Excludes:"));
        } else {
            println!(
                "    {} {}",
                Style::new().bold().apply_to("Excludes:"),
                variant.exclude_modules.join(", ")
            );
            println!(
                "    {} {}",
                Style::new().bold().apply_to("Fingerprints:"),
                variant.forbidden_fingerprints().join(", ")
            );
        }
        println!();
    }

    Ok(())
}
