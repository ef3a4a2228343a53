//! Build pipeline: assemble, verify, record
//!
//! Fails closed. A variant whose tree still contains an excluded module is
//! deleted from the output directory before the violation is returned, so
//! nothing unverified is ever left where a release step could pick it up.

use std::path::PathBuf;

use crate::build::assembler::{self, BuildContext, BuildVariant};
use crate::build::integrity;
use crate::build::manifest::BuildManifest;
use crate::config::VariantConfig;
use crate::error::{Result, SetupError};
use crate::installer::file_ops;
use crate::progress::ProgressDisplay;

/// A verified variant and its manifest
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub variant: BuildVariant,
    pub manifest: BuildManifest,
    pub manifest_path: PathBuf,
}

/// Build one variant end to end
pub fn build_variant(
    ctx: &BuildContext<'_>,
    variant: &VariantConfig,
    progress: &mut ProgressDisplay,
) -> Result<BuildOutcome> {
    progress.start_step(format!("Packaging {}", variant.id));
    let assembled = assembler::assemble(variant, ctx);
    progress.finish_step();
    let assembled = assembled?;

    let fingerprints = variant.forbidden_fingerprints();
    let verified = integrity::verify_variant(
        &assembled.output_tree,
        &assembled.app_dir(),
        &fingerprints,
        &assembled.excluded_modules,
    );
    if let Err(err) = verified {
        discard(&assembled, &err);
        return Err(err);
    }

    let manifest = BuildManifest::generate(&assembled, &fingerprints)?;
    let manifest_path = manifest.write(&assembled.output_tree)?;
    tracing::info!(variant = %assembled.id, manifest = %manifest_path.display(), "variant built");

    Ok(BuildOutcome {
        variant: assembled,
        manifest,
        manifest_path,
    })
}

/// Remove an assembled variant that failed verification
fn discard(assembled: &BuildVariant, err: &SetupError) {
    if !matches!(err, SetupError::IntegrityViolation { .. }) {
        return;
    }
    match file_ops::remove_path(&assembled.variant_dir) {
        Ok(_) => tracing::warn!(variant = %assembled.id, "discarded variant that failed verification"),
        Err(remove_err) => tracing::error!(
            variant = %assembled.id,
            error = %remove_err,
            "could not discard variant that failed verification"
        ),
    }
}

/// Build `variants` in order, stopping at the first failure
pub fn build_all(
    ctx: &BuildContext<'_>,
    variants: &[&VariantConfig],
    progress: &mut ProgressDisplay,
) -> Result<Vec<BuildOutcome>> {
    let mut outcomes = Vec::with_capacity(variants.len());
    for (index, variant) in variants.iter().enumerate() {
        progress.update_variant(&variant.id, index + 1, variants.len());
        match build_variant(ctx, variant, progress) {
            Ok(outcome) => {
                progress.inc_variant();
                outcomes.push(outcome);
            }
            Err(err) => {
                progress.abandon();
                return Err(err);
            }
        }
    }
    progress.finish();
    Ok(outcomes)
}
