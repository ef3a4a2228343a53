//! Version command implementation

use crate::build::packager::{DEFAULT_PACKAGER, PACKAGER_ENV};
use crate::config::layout::{BIN_DIR, INSTALL_DIR};
use crate::error::Result;

/// Run version command
pub fn run() -> Result<()> {
    println!("tsbot-setup {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!();
    println!("Defaults:");
    println!("  Install root: ~/{INSTALL_DIR}");
    println!("  Command link: ~/{BIN_DIR}");
    println!(
        "  Packager: {} (override with {PACKAGER_ENV})",
        std::env::var(PACKAGER_ENV).unwrap_or_else(|_| DEFAULT_PACKAGER.to_string())
    );

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
