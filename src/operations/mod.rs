//! Operations module for the installation and build lifecycle
//!
//! This module provides high-level operations that coordinate:
//! - InstallOperation: Copy, link and PATH configuration for one install
//! - UninstallOperation: Removal of every installed part
//! - StatusOperation: Read-only inspection of an installation
//! - BuildOperation: Catalog selection and the variant build pipeline
//!
//! The operations coordinate with:
//! - Installer and uninstaller: filesystem work (installer, uninstaller modules)
//! - Build pipeline: packaging and integrity checks (build module)
//! - Configuration: install layout and variant catalog (config module)

pub mod build;
pub mod install;
pub mod status;
pub mod uninstall;

pub use build::{BuildOperation, BuildOptions};
pub use install::{InstallOperation, InstallOptions, InstallSummary};
pub use status::{InstallStatus, StatusOperation};
pub use uninstall::{UninstallOperation, UninstallOptions};
