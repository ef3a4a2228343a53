//! Build operation module
//!
//! Loads the variant catalog, selects the requested variants and runs them
//! through the build pipeline.

use std::path::PathBuf;

use crate::build::{self, BuildContext, BuildOutcome, CommandPackager, Packager};
use crate::config::variants::CATALOG_FILE;
use crate::config::VariantCatalog;
use crate::error::Result;
use crate::progress::ProgressDisplay;

/// Configuration options for build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub project_root: PathBuf,
    pub output_dir: PathBuf,
    /// Catalog file; `<project_root>/tsbot-variants.yaml` when unset
    pub catalog: Option<PathBuf>,
    pub packager: String,
    /// Installer binary bundled into every output tree
    pub setup_binary: Option<PathBuf>,
    /// Variant ids, all variants when empty
    pub variants: Vec<String>,
    pub show_progress: bool,
}

/// High-level build operation
pub struct BuildOperation {
    options: BuildOptions,
}

impl BuildOperation {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Catalog path in effect for these options
    pub fn catalog_path(&self) -> PathBuf {
        self.options
            .catalog
            .clone()
            .unwrap_or_else(|| self.options.project_root.join(CATALOG_FILE))
    }

    /// Execute build operation with the configured packaging program
    pub fn execute(&self) -> Result<Vec<BuildOutcome>> {
        let packager = CommandPackager::new(&self.options.packager);
        self.execute_with(&packager)
    }

    /// Execute build operation with an explicit packager
    pub fn execute_with(&self, packager: &dyn Packager) -> Result<Vec<BuildOutcome>> {
        let catalog = VariantCatalog::load_or_builtin(&self.catalog_path())?;
        let selected = catalog.select(&self.options.variants)?;
        tracing::info!(
            variants = ?selected.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(),
            output = %self.options.output_dir.display(),
            "building variants"
        );

        let mut progress = if self.options.show_progress {
            ProgressDisplay::new(selected.len() as u64)
        } else {
            ProgressDisplay::hidden()
        };
        let ctx = BuildContext {
            project_root: &self.options.project_root,
            output_dir: &self.options.output_dir,
            packager,
            setup_binary: self.options.setup_binary.as_deref(),
        };
        build::build_all(&ctx, &selected, &mut progress)
    }
}
