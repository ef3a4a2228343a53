//! Variant assembly: packaging plus auxiliary files
//!
//! Every variant is assembled under its own directory:
//!
//! ```text
//! <output_dir>/<variant>/
//!   work/                 packager scratch space
//!   dist/                 the output tree that ships
//!     <command>/          frozen application
//!     tsbot-setup         this installer, used by the scripts
//!     install.sh
//!     uninstall.sh
//!     README.md
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::build::packager::{Packager, PackagingJob};
use crate::config::VariantConfig;
use crate::error::Result;
use crate::installer::file_ops;
use crate::path_utils;

/// Output tree directory inside a variant directory
pub const DIST_DIR: &str = "dist";

/// Packager scratch directory inside a variant directory
pub const WORK_DIR: &str = "work";

/// File name of the bundled installer binary in every output tree
pub const SETUP_BINARY_NAME: &str = "tsbot-setup";

/// Where and how variants are built
pub struct BuildContext<'a> {
    pub project_root: &'a Path,
    pub output_dir: &'a Path,
    pub packager: &'a dyn Packager,
    /// Installer binary copied next to the frozen application
    pub setup_binary: Option<&'a Path>,
}

/// An assembled, not yet verified, variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVariant {
    pub id: String,
    pub entrypoint: String,
    pub command: String,
    pub excluded_modules: Vec<String>,
    /// Auxiliary files as copied, relative to `output_tree`
    pub auxiliary_files: Vec<PathBuf>,
    /// `<output_dir>/<id>`
    pub variant_dir: PathBuf,
    /// `<output_dir>/<id>/dist`
    pub output_tree: PathBuf,
}

impl BuildVariant {
    /// Directory of the frozen application inside the output tree
    pub fn app_dir(&self) -> PathBuf {
        self.output_tree.join(&self.command)
    }
}

/// An auxiliary file checked and resolved against the project root
struct ResolvedAuxiliary {
    source: PathBuf,
    dest: String,
    executable: bool,
}

/// Resolve auxiliary files, failing before anything is built
///
/// The setup binary is appended unless the variant ships its own file under
/// the same name.
fn resolve_auxiliary(variant: &VariantConfig, ctx: &BuildContext<'_>) -> Result<Vec<ResolvedAuxiliary>> {
    let project_root = ctx.project_root;
    let mut resolved = variant
        .auxiliary
        .iter()
        .map(|aux| {
            let source = project_root.join(&aux.source);
            if !source.is_file() {
                return Err(crate::error::build::auxiliary_missing(&source));
            }
            let dest = aux
                .dest_name()
                .filter(|name| path_utils::is_safe_component(name) && *name != variant.command)
                .ok_or_else(|| {
                    crate::error::config::invalid(format!(
                        "auxiliary file {} of variant '{}' has no usable destination name",
                        aux.source.display(),
                        variant.id
                    ))
                })?;
            Ok(ResolvedAuxiliary {
                source,
                dest,
                executable: aux.executable,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(binary) = ctx.setup_binary {
        if !binary.is_file() {
            return Err(crate::error::build::auxiliary_missing(binary));
        }
        if resolved.iter().all(|aux| aux.dest != SETUP_BINARY_NAME) {
            resolved.push(ResolvedAuxiliary {
                source: binary.to_path_buf(),
                dest: SETUP_BINARY_NAME.to_string(),
                executable: true,
            });
        }
    }
    Ok(resolved)
}

/// Resolve `--add-data` mappings against the project root
fn resolve_data(variant: &VariantConfig, project_root: &Path) -> Result<Vec<(PathBuf, String)>> {
    variant
        .data
        .iter()
        .map(|mapping| {
            let source = project_root.join(&mapping.source);
            if !source.exists() {
                return Err(crate::error::build::auxiliary_missing(&source));
            }
            Ok((source, mapping.dest.clone()))
        })
        .collect()
}

/// Package `variant` and bundle its auxiliary files
///
/// Inputs are checked first. The variant directory is then cleared, so an
/// artifact from an earlier build can never survive into the new tree.
pub fn assemble(variant: &VariantConfig, ctx: &BuildContext<'_>) -> Result<BuildVariant> {
    if !path_utils::is_safe_component(&variant.id) {
        return Err(crate::error::config::invalid(format!(
            "variant id '{}' is not a plain directory name",
            variant.id
        )));
    }
    let auxiliary = resolve_auxiliary(variant, ctx)?;
    let data = resolve_data(variant, ctx.project_root)?;

    let variant_dir = ctx.output_dir.join(&variant.id);
    let output_tree = variant_dir.join(DIST_DIR);
    let work_dir = variant_dir.join(WORK_DIR);

    if file_ops::remove_path(&variant_dir)? {
        tracing::debug!(path = %variant_dir.display(), "cleared previous build");
    }
    for dir in [&output_tree, &work_dir] {
        fs::create_dir_all(dir).map_err(|e| crate::error::fs::write_failed(dir, e))?;
    }

    ctx.packager.package(&PackagingJob {
        variant_id: &variant.id,
        project_root: ctx.project_root,
        entrypoint: &variant.entrypoint,
        command: &variant.command,
        exclude_modules: &variant.exclude_modules,
        data: &data,
        dist_dir: &output_tree,
        work_dir: &work_dir,
    })?;

    let mut built = BuildVariant {
        id: variant.id.clone(),
        entrypoint: variant.entrypoint.clone(),
        command: variant.command.clone(),
        excluded_modules: variant.exclude_modules.clone(),
        auxiliary_files: Vec::with_capacity(auxiliary.len()),
        variant_dir,
        output_tree,
    };

    let executable = built.app_dir().join(&variant.command);
    if !executable.is_file() {
        return Err(crate::error::build::packager_failed(
            &variant.id,
            0,
            format!("no executable at {}", executable.display()),
        ));
    }

    for aux in auxiliary {
        let target = built.output_tree.join(&aux.dest);
        fs::copy(&aux.source, &target).map_err(|e| crate::error::fs::write_failed(&target, e))?;
        if aux.executable {
            file_ops::make_executable(&target)?;
        }
        built.auxiliary_files.push(PathBuf::from(aux.dest));
    }

    tracing::info!(
        variant = %built.id,
        tree = %built.output_tree.display(),
        auxiliary = built.auxiliary_files.len(),
        "variant assembled"
    );

    Ok(built)
}
