use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    tsbot-setup completions bash > ~/.bash_completion.d/tsbot-setup\n\n\
                  Generate zsh completions:\n    tsbot-setup completions zsh > ~/.zfunc/_tsbot-setup\n\n\
                  Generate fish completions:\n    tsbot-setup completions fish > ~/.config/fish/completions/tsbot-setup.fish\n\n\
                  Generate PowerShell completions:\n    tsbot-setup completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
