use clap::Parser;

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove the application, command link, data and PATH entries:\n    tsbot-setup uninstall\n\n\
                  Keep the browser-session cache:\n    tsbot-setup uninstall --keep-cache")]
pub struct UninstallArgs {
    /// Leave the agent's browser-session cache in place
    #[arg(long)]
    pub keep_cache: bool,
}
