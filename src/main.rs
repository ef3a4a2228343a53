//! tsbot-setup - TimesheetBot installer and variant builder
//!
//! Installs the frozen TimesheetBot agent for one user (application tree,
//! command link, shell PATH entries), removes it again, and builds the
//! packaged variants with a fail-closed check that excluded automation
//! modules never ship.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod build;
mod cli;
mod commands;
mod config;
mod error;
mod hash;
mod installer;
mod operations;
mod path_utils;
mod progress;
mod uninstaller;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use error::SetupError;

/// Log filter used when RUST_LOG is not set
fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::new(if verbose { "tsbot_setup=debug" } else { "warn" })
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(err: &SetupError) {
    eprintln!("Error: {}", err);
    if let Some(help) = err.help() {
        eprintln!("  help: {}", help);
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(cli.home, args),
        Commands::Uninstall(args) => commands::uninstall::run(cli.home, args),
        Commands::Build(args) => commands::build::run(args),
        Commands::Verify(args) => commands::verify::run(args),
        Commands::Status(args) => commands::status::run(cli.home, args),
        Commands::Variants(args) => commands::variants::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        tracing::debug!(kind = ?e.kind(), "command failed");
        report(&e);
        std::process::exit(1);
    }
}
