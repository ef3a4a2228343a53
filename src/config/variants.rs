//! Build variant catalog (tsbot-variants.yaml)
//!
//! A variant is one packaging configuration of the agent: the entrypoint to
//! freeze, the automation modules the packager must leave out, and the
//! auxiliary files shipped next to the frozen application.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::layout::COMMAND_NAME;
use crate::error::{Result, SetupError};
use crate::path_utils;

/// Default catalog file name, looked up in the project root
pub const CATALOG_FILE: &str = "tsbot-variants.yaml";

/// Entrypoint frozen by every built-in variant
pub const DEFAULT_ENTRYPOINT: &str = "timesheetbot_agent/cli.py";

/// A data directory handed to the packager (`--add-data source:dest`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataMapping {
    pub source: PathBuf,
    pub dest: String,
}

/// A file copied next to the frozen application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryFile {
    /// Source path, relative to the project root unless absolute
    pub source: PathBuf,

    /// File name inside the output tree (defaults to the source file name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,

    /// Mark the copied file executable
    #[serde(default)]
    pub executable: bool,
}

impl AuxiliaryFile {
    pub fn new(source: impl Into<PathBuf>, executable: bool) -> Self {
        Self {
            source: source.into(),
            dest: None,
            executable,
        }
    }

    /// Name the file gets inside the output tree
    pub fn dest_name(&self) -> Option<String> {
        match &self.dest {
            Some(dest) => Some(dest.clone()),
            None => self
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
        }
    }
}

/// One build variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    /// Variant identifier, also the output subdirectory name
    pub id: String,

    /// Entrypoint module handed to the packager
    pub entrypoint: String,

    /// Name of the frozen executable
    #[serde(default = "default_command")]
    pub command: String,

    /// Modules the packager must exclude, in order
    #[serde(default)]
    pub exclude_modules: Vec<String>,

    /// Extra fingerprints checked on top of the ones derived from `exclude_modules`
    #[serde(default)]
    pub fingerprints: Vec<String>,

    #[serde(default)]
    pub data: Vec<DataMapping>,

    #[serde(default = "default_auxiliary")]
    pub auxiliary: Vec<AuxiliaryFile>,
}

fn default_command() -> String {
    COMMAND_NAME.to_string()
}

fn default_auxiliary() -> Vec<AuxiliaryFile> {
    vec![
        AuxiliaryFile::new("scripts/install.sh", true),
        AuxiliaryFile::new("scripts/uninstall.sh", true),
        AuxiliaryFile::new("README.md", false),
    ]
}

fn default_data() -> Vec<DataMapping> {
    vec![DataMapping {
        source: PathBuf::from("timesheetbot_agent/config"),
        dest: "timesheetbot_agent/config".to_string(),
    }]
}

impl VariantConfig {
    /// Create a variant with the default command, data and auxiliary files
    pub fn new(id: impl Into<String>, entrypoint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entrypoint: entrypoint.into(),
            command: default_command(),
            exclude_modules: Vec::new(),
            fingerprints: Vec::new(),
            data: default_data(),
            auxiliary: default_auxiliary(),
        }
    }

    #[must_use]
    pub fn excluding<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_modules.extend(modules.into_iter().map(Into::into));
        self
    }

    /// Fingerprints the integrity check must not find in the output tree
    ///
    /// The last dotted segment of every excluded module (`timesheetbot_agent.napta`
    /// yields `napta`) followed by the explicit extras, lowercased and deduplicated
    /// in order.
    pub fn forbidden_fingerprints(&self) -> Vec<String> {
        let derived = self
            .exclude_modules
            .iter()
            .filter_map(|module| module.rsplit('.').next());
        let mut seen = HashSet::new();
        derived
            .chain(self.fingerprints.iter().map(String::as_str))
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty())
            .filter(|f| seen.insert(f.clone()))
            .collect()
    }
}

/// The set of variants a build can produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCatalog {
    pub variants: Vec<VariantConfig>,
}

impl Default for VariantCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl VariantCatalog {
    /// Variants used when no catalog file exists
    pub fn builtin() -> Self {
        Self {
            variants: vec![
                VariantConfig::new("full", DEFAULT_ENTRYPOINT),
                VariantConfig::new("fitnet", DEFAULT_ENTRYPOINT)
                    .excluding(["timesheetbot_agent.napta", "browser_cookie3"]),
                VariantConfig::new("manual", DEFAULT_ENTRYPOINT).excluding([
                    "timesheetbot_agent.napta",
                    "timesheetbot_agent.fitnet",
                    "playwright",
                    "browser_cookie3",
                ]),
            ],
        }
    }

    /// Parse a catalog from YAML and validate it
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Serialize the catalog to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load the catalog from `path`, or the built-in catalog if the file does not exist
    pub fn load_or_builtin(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no variant catalog, using built-in variants");
            return Ok(Self::builtin());
        }
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| crate::error::fs::read_failed(path, e))?;
        Self::from_yaml(&yaml).map_err(|e| match e {
            SetupError::ConfigParseFailed { reason, .. } => {
                crate::error::config::parse_failed(path, reason)
            }
            other => other,
        })
    }

    /// Check ids are unique and path-safe and every entrypoint is set
    pub fn validate(&self) -> Result<()> {
        if self.variants.is_empty() {
            return Err(crate::error::config::invalid("catalog defines no variants"));
        }
        let mut ids = HashSet::new();
        for variant in &self.variants {
            if !path_utils::is_safe_component(&variant.id) {
                return Err(crate::error::config::invalid(format!(
                    "variant id '{}' is not a plain directory name",
                    variant.id
                )));
            }
            if !ids.insert(variant.id.as_str()) {
                return Err(crate::error::config::invalid(format!(
                    "duplicate variant id '{}'",
                    variant.id
                )));
            }
            if variant.entrypoint.trim().is_empty() {
                return Err(crate::error::config::invalid(format!(
                    "variant '{}' has no entrypoint",
                    variant.id
                )));
            }
            if let Some(mapping) = variant
                .data
                .iter()
                .find(|m| !path_utils::is_contained_relative(Path::new(&m.dest)))
            {
                return Err(crate::error::config::invalid(format!(
                    "variant '{}' maps data to '{}', which leaves the application tree",
                    variant.id, mapping.dest
                )));
            }
            if !path_utils::is_safe_component(&variant.command) {
                return Err(crate::error::config::invalid(format!(
                    "variant '{}' has an invalid command name '{}'",
                    variant.id, variant.command
                )));
            }
        }
        Ok(())
    }

    /// Find a variant by id
    pub fn find(&self, id: &str) -> Option<&VariantConfig> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Select variants by id, or all of them when `ids` is empty
    pub fn select(&self, ids: &[String]) -> Result<Vec<&VariantConfig>> {
        if ids.is_empty() {
            return Ok(self.variants.iter().collect());
        }
        ids.iter()
            .map(|id| {
                self.find(id)
                    .ok_or_else(|| crate::error::build::variant_not_found(id.clone()))
            })
            .collect()
    }
}
