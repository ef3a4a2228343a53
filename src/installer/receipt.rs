//! Install receipt (install-receipt.json)
//!
//! Written as the last step of an install so its presence means the copy
//! finished. Lives inside the install root and disappears with it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::installer::quarantine::QuarantineOutcome;

/// Receipt file name inside the install root
pub const RECEIPT_FILE: &str = "install-receipt.json";

/// Record of one completed install
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallReceipt {
    /// Version of the installer that wrote the receipt
    pub installer_version: String,
    pub command: String,
    pub source_tree: PathBuf,
    /// BLAKE3 hash of the installed tree, receipt excluded
    pub tree_hash: String,
    pub quarantine: QuarantineOutcome,
}

impl InstallReceipt {
    /// Path of the receipt inside `install_root`
    pub fn path_in(install_root: &Path) -> PathBuf {
        install_root.join(RECEIPT_FILE)
    }

    pub fn write(&self, install_root: &Path) -> Result<()> {
        let path = Self::path_in(install_root);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json + "\n").map_err(|e| crate::error::fs::write_failed(&path, e))
    }

    /// Read the receipt, `None` when there is no install or no receipt
    pub fn read(install_root: &Path) -> Result<Option<Self>> {
        let path = Self::path_in(install_root);
        if !path.is_file() {
            return Ok(None);
        }
        let json =
            std::fs::read_to_string(&path).map_err(|e| crate::error::fs::read_failed(&path, e))?;
        let receipt = serde_json::from_str(&json)
            .map_err(|e| crate::error::config::parse_failed(&path, e))?;
        Ok(Some(receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::create_temp_dir;

    #[test]
    fn test_write_then_read() {
        let temp = create_temp_dir();
        let receipt = InstallReceipt {
            installer_version: "0.3.0".to_string(),
            command: "tsbot".to_string(),
            source_tree: PathBuf::from("/Volumes/tsbot/tsbot"),
            tree_hash: "blake3:abc".to_string(),
            quarantine: QuarantineOutcome::Skipped("not macOS".to_string()),
        };
        receipt.write(temp.path()).unwrap();

        assert_eq!(InstallReceipt::read(temp.path()).unwrap(), Some(receipt));
    }

    #[test]
    fn test_read_missing() {
        let temp = create_temp_dir();
        assert_eq!(InstallReceipt::read(&temp.path().join("nope")).unwrap(), None);
    }

    #[test]
    fn test_read_corrupt() {
        let temp = create_temp_dir();
        std::fs::write(InstallReceipt::path_in(temp.path()), "{not json").unwrap();
        assert!(InstallReceipt::read(temp.path()).is_err());
    }
}
