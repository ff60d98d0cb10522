//! Vela - appfile deployment CLI
//!
//! Compiles a declarative appfile into normalized deployment resources and
//! reconciles them against the target environment's cluster state.

use clap::Parser;

mod appfile;
mod build;
mod cli;
mod cluster;
mod commands;
mod env;
mod error;
mod manifest;
mod reconcile;
mod resource;
mod template;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Up(args) => commands::up::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
