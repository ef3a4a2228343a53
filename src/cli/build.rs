use clap::Parser;
use std::path::PathBuf;

/// Arguments for the build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Build every variant in the catalog:\n    tsbot-setup build\n\n\
                  Build only the manual variant:\n    tsbot-setup build manual\n\n\
                  Use a specific packager:\n    tsbot-setup build --packager ./venv/bin/pyinstaller")]
pub struct BuildArgs {
    /// Variant ids to build (all variants when omitted)
    pub variants: Vec<String>,

    /// Project root holding the agent sources and auxiliary files
    #[arg(long, short = 'p', default_value = ".", value_name = "DIR")]
    pub project: PathBuf,

    /// Directory receiving one subdirectory per variant
    #[arg(long, short = 'o', default_value = "build", value_name = "DIR")]
    pub output: PathBuf,

    /// Variant catalog (defaults to tsbot-variants.yaml in the project root)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Packaging program
    #[arg(long, env = "TSBOT_PACKAGER", default_value = "pyinstaller")]
    pub packager: String,

    /// Installer binary shipped in each variant (defaults to this binary)
    #[arg(long, value_name = "FILE", conflicts_with = "no_setup_binary")]
    pub setup_binary: Option<PathBuf>,

    /// Do not ship the installer binary
    #[arg(long)]
    pub no_setup_binary: bool,
}
