use clap::Parser;
use std::path::PathBuf;

/// Arguments for the variants command
#[derive(Parser, Debug)]
pub struct VariantsArgs {
    /// Variant catalog (defaults to tsbot-variants.yaml in the current directory)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the effective catalog as YAML
    #[arg(long)]
    pub yaml: bool,
}
