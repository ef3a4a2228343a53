//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - uninstall: Uninstall command arguments
//! - build: Build command arguments
//! - verify: Verify command arguments
//! - status: Status command arguments
//! - variants: Variants command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod build;
pub mod completions;
pub mod install;
pub mod status;
pub mod uninstall;
pub mod variants;
pub mod verify;

pub use build::BuildArgs;
pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use status::StatusArgs;
pub use uninstall::UninstallArgs;
pub use variants::VariantsArgs;
pub use verify::VerifyArgs;

/// tsbot-setup - TimesheetBot installer and variant builder
///
/// Installs the frozen TimesheetBot agent for the current user and builds the
/// packaged variants it ships as.
#[derive(Parser, Debug)]
#[command(
    name = "tsbot-setup",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install, remove and build TimesheetBot",
    long_about = "tsbot-setup installs the frozen TimesheetBot agent into ~/Applications/tsbot, \
                  links the tsbot command into ~/.local/bin and puts that directory on PATH. \
                  It also builds the packaged variants and verifies that excluded automation \
                  modules never end up in a shipped tree.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  tsbot-setup install                       \x1b[90m# Install from the unpacked release\x1b[0m\n   \
                  tsbot-setup status                        \x1b[90m# Show what is installed\x1b[0m\n   \
                  tsbot-setup uninstall                     \x1b[90m# Remove everything\x1b[0m\n   \
                  tsbot-setup build manual                  \x1b[90m# Build the manual-only variant\x1b[0m\n   \
                  tsbot-setup verify build/manual/dist -f napta \x1b[90m# Scan a tree\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Home directory rooting every installed path
    #[arg(long, global = true, env = "HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install the frozen application for the current user
    Install(InstallArgs),

    /// Remove the application, its data and PATH entries
    Uninstall(UninstallArgs),

    /// Build packaged variants
    Build(BuildArgs),

    /// Scan a tree for forbidden module fingerprints
    Verify(VerifyArgs),

    /// Show which parts of an installation exist
    Status(StatusArgs),

    /// List build variants
    Variants(VariantsArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
