//! Install layout: the paths owned by an installation
//!
//! Nothing in this crate reads the home directory ad hoc. The CLI resolves it
//! once and every operation receives an [`InstallLayout`] (or the individual
//! paths taken from it), so tests can root everything in a temp directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};

/// Name of the command exposed on PATH and of the packaged executable
pub const COMMAND_NAME: &str = "tsbot";

/// Install root, relative to the home directory
pub const INSTALL_DIR: &str = "Applications/tsbot";

/// User-local binary directory, relative to the home directory
pub const BIN_DIR: &str = ".local/bin";

/// Private data directory owned by the running agent
pub const DATA_DIR: &str = ".tsbot";

/// Browser-session cache written by the agent
pub const CACHE_DIR: &str = ".cache/timesheetbot";

/// Shell startup files that receive the PATH export
pub const PROFILE_FILES: &[&str] = &[".zshrc", ".zprofile", ".bash_profile", ".bashrc"];

/// Sentinel comment placed directly above the export line
pub const MARKER_LINE: &str = "# Added by TimesheetBot installer";

/// PATH export appended to each shell profile
pub const EXPORT_LINE: &str = r#"export PATH="$HOME/.local/bin:$PATH""#;

/// Every path an installation creates or removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    pub home: PathBuf,
    pub install_root: PathBuf,
    pub bin_dir: PathBuf,
    pub command_name: String,
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub profile_files: Vec<PathBuf>,
    pub marker_line: String,
    pub export_line: String,
}

impl InstallLayout {
    /// Derive the standard layout from a home directory
    pub fn from_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            install_root: home.join(INSTALL_DIR),
            bin_dir: home.join(BIN_DIR),
            command_name: COMMAND_NAME.to_string(),
            data_dir: home.join(DATA_DIR),
            cache_dir: home.join(CACHE_DIR),
            profile_files: PROFILE_FILES.iter().map(|p| home.join(p)).collect(),
            marker_line: MARKER_LINE.to_string(),
            export_line: EXPORT_LINE.to_string(),
            home,
        }
    }

    /// Resolve the layout from an explicit home, falling back to the platform home directory
    pub fn resolve(home: Option<PathBuf>) -> Result<Self> {
        let home = match home {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => dirs::home_dir().ok_or(SetupError::HomeNotFound)?,
        };
        if !home.is_absolute() {
            return Err(crate::error::config::invalid(format!(
                "home directory must be absolute: {}",
                home.display()
            )));
        }
        Ok(Self::from_home(home))
    }

    /// Path of the command symlink placed in the binary directory
    pub fn command_link(&self) -> PathBuf {
        self.bin_dir.join(&self.command_name)
    }

    /// Path of the executable inside the install root
    pub fn installed_executable(&self) -> PathBuf {
        self.install_root.join(&self.command_name)
    }

    /// Whether `dir` is one of the entries of a PATH-like value
    ///
    /// Informational only: decides whether to suggest restarting the terminal.
    pub fn dir_on_path(dir: &Path, path_var: Option<&OsStr>) -> bool {
        path_var.is_some_and(|value| std::env::split_paths(value).any(|entry| entry == dir))
    }
}
