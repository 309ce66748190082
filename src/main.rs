//! Workbelt - project dependency bootstrapper
//!
//! Reads a declarative catalog of the tools a project needs, orders them so
//! prerequisites come first, and detects, installs or explains each one.

use clap::Parser;

mod cli;
mod commands;
mod common;
mod config;
mod domain;
mod error;
mod installer;
mod logging;
mod platform;
mod progress;
mod report;
mod resolver;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(cli.config, args),
        Commands::List(args) => commands::list::run(cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
