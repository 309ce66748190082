use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    workbelt completions bash > ~/.bash_completion.d/workbelt\n\n\
                  Generate zsh completions:\n    workbelt completions zsh > ~/.zfunc/_workbelt\n\n\
                  Generate fish completions:\n    workbelt completions fish > ~/.config/fish/completions/workbelt.fish\n\n\
                  Generate PowerShell completions:\n    workbelt completions powershell")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
