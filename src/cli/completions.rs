use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    vela completions bash > ~/.bash_completion.d/vela\n\n\
                  Generate zsh completions:\n    vela completions zsh > ~/.zfunc/_vela\n\n\
                  Generate fish completions:\n    vela completions fish > ~/.config/fish/completions/vela.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
