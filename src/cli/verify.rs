use clap::Parser;
use std::path::PathBuf;

/// Arguments for the verify command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Check a tree for leftovers of excluded modules:\n    tsbot-setup verify build/manual/dist --fingerprint napta --fingerprint fitnet\n\n\
                  Check a tree against a catalog variant:\n    tsbot-setup verify build/manual/dist --variant manual")]
pub struct VerifyArgs {
    /// Output tree to scan
    pub tree: PathBuf,

    /// Forbidden fingerprint (repeatable)
    #[arg(long = "fingerprint", short = 'f', value_name = "TEXT")]
    pub fingerprints: Vec<String>,

    /// Also check against the fingerprints of this catalog variant
    #[arg(long, value_name = "ID")]
    pub variant: Option<String>,

    /// Variant catalog used with --variant
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,
}
