//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - up: Up command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod up;

pub use completions::CompletionsArgs;
pub use up::UpArgs;

/// Vela - appfile deployment CLI
///
/// Compile a declarative appfile into deployment resources and apply them.
#[derive(Parser, Debug)]
#[command(
    name = "vela",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Lean deployment CLI for declarative appfiles",
    long_about = "Vela compiles a declarative appfile (vela.yaml) into normalized deployment \
                  resources, writes the bundle to .vela/deploy.yaml for inspection, and applies \
                  it against the target environment's cluster state.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  vela up                      \x1b[90m# Apply vela.yaml from the current directory\x1b[0m\n   \
                  vela up -f app.yaml          \x1b[90m# Apply an explicit appfile\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply an appfile, by default vela.yaml
    Up(UpArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
