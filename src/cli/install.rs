use clap::Parser;
use std::path::PathBuf;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install from the unpacked release next to this binary:\n    tsbot-setup install\n\n\
                  Install a freshly built variant:\n    tsbot-setup install --source build/manual/dist/tsbot\n\n\
                  Install into another home directory:\n    tsbot-setup --home /tmp/sandbox install")]
pub struct InstallArgs {
    /// Frozen application directory containing the `tsbot` executable
    /// (defaults to `tsbot/` next to this binary)
    #[arg(long, short = 's', value_name = "DIR")]
    pub source: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parsing_install_default_source() {
        let cli = Cli::try_parse_from(["tsbot-setup", "install"]).unwrap();
        match cli.command {
            Commands::Install(args) => assert_eq!(args.source, None),
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_install_with_source() {
        let cli = Cli::try_parse_from(["tsbot-setup", "install", "--source", "/opt/tsbot"]).unwrap();
        match cli.command {
            Commands::Install(args) => assert_eq!(args.source, Some(PathBuf::from("/opt/tsbot"))),
            _ => panic!("Expected Install command"),
        }
    }
}
