//! Configuration handling for tsbot-setup
//!
//! This module contains data structures for:
//! - [`InstallLayout`] - every path the installer touches, rooted at one home directory
//! - `tsbot-variants.yaml` - the catalog of build variants

pub mod layout;
pub mod variants;

// Re-export commonly used types
pub use layout::InstallLayout;
pub use variants::{VariantCatalog, VariantConfig};
