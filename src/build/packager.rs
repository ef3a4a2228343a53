//! Packaging tool invocation
//!
//! The packager freezes the agent's sources into a self-contained directory
//! tree. It is an external program; this module only builds its command line
//! and interprets its exit status. [`Packager`] is the seam tests use to
//! stand in a fake that writes a tree directly.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Result, SetupError};

/// Default packaging program (PyInstaller-compatible command line)
pub const DEFAULT_PACKAGER: &str = "pyinstaller";

/// Environment variable overriding the packaging program
pub const PACKAGER_ENV: &str = "TSBOT_PACKAGER";

/// Lines of packager stderr kept in a failure report
const STDERR_TAIL_LINES: usize = 20;

/// Everything the packager needs for one variant
#[derive(Debug, Clone)]
pub struct PackagingJob<'a> {
    pub variant_id: &'a str,
    /// Working directory of the packager, normally the project root
    pub project_root: &'a Path,
    pub entrypoint: &'a str,
    /// Name of the frozen executable and of its directory under `dist_dir`
    pub command: &'a str,
    pub exclude_modules: &'a [String],
    /// Resolved `(source, dest)` data directories
    pub data: &'a [(PathBuf, String)],
    pub dist_dir: &'a Path,
    pub work_dir: &'a Path,
}

/// Something that turns a [`PackagingJob`] into `dist_dir/<command>/`
pub trait Packager {
    /// Run the packaging step; an error means no usable tree was produced
    fn package(&self, job: &PackagingJob<'_>) -> Result<()>;
}

/// Packager backed by an external PyInstaller-compatible program
#[derive(Debug, Clone)]
pub struct CommandPackager {
    program: String,
}

impl Default for CommandPackager {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGER)
    }
}

impl CommandPackager {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Command-line arguments for `job`, in the order they are passed
    pub fn arguments(&self, job: &PackagingJob<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--noconfirm".into(),
            "--clean".into(),
            "--onedir".into(),
            "--name".into(),
            job.command.into(),
            "--distpath".into(),
            job.dist_dir.into(),
            "--workpath".into(),
            job.work_dir.into(),
            "--specpath".into(),
            job.work_dir.into(),
        ];

        for module in job.exclude_modules {
            args.push("--exclude-module".into());
            args.push(module.into());
        }

        for (source, dest) in job.data {
            let mut mapping = OsString::from(source.as_os_str());
            mapping.push(":");
            mapping.push(dest);
            args.push("--add-data".into());
            args.push(mapping);
        }

        args.push(job.entrypoint.into());
        args
    }
}

impl Packager for CommandPackager {
    fn package(&self, job: &PackagingJob<'_>) -> Result<()> {
        let args = self.arguments(job);
        tracing::info!(
            variant = job.variant_id,
            program = %self.program,
            excluded = job.exclude_modules.len(),
            "running packager"
        );
        tracing::debug!(?args, "packager arguments");

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(job.project_root)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| SetupError::PackagerUnavailable {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let lines: Vec<&str> = stderr.lines().collect();
        let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
        Err(crate::error::build::packager_failed(
            job.variant_id,
            output.status.code().unwrap_or(-1),
            tail,
        ))
    }
}
