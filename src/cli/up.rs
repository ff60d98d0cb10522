use clap::Parser;
use std::path::PathBuf;

/// Arguments for the up command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Apply vela.yaml from the current directory:\n    vela up\n\n\
                   Apply an explicit appfile:\n    vela up -f deploy/app.yaml")]
pub struct UpArgs {
    /// Specify file path for appfile (defaults to vela.yaml)
    #[arg(long = "file", short = 'f', value_name = "PATH")]
    pub file: Option<PathBuf>,
}
