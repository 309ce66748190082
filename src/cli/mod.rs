//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - list: List command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod install;
pub mod list;

pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use list::ListArgs;

/// Workbelt - project dependency bootstrapper
///
/// Detects, installs and explains the tools a project needs, in prerequisite order.
#[derive(Parser, Debug)]
#[command(
    name = "workbelt",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bootstrap the dependencies a project needs, in order, once",
    long_about = "Workbelt reads workbelt.yaml, picks the dependencies that apply to this host, \
                  orders them so prerequisites come first, and installs what it can. \
                  Everything else ends up in a markdown report with manual instructions.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  workbelt install                      \x1b[90m# Detect and report, install nothing\x1b[0m\n   \
                  workbelt install -a                   \x1b[90m# Run install scripts where allowed\x1b[0m\n   \
                  workbelt install -a --open marked     \x1b[90m# Also open links of manual steps\x1b[0m\n   \
                  workbelt -c tools/workbelt.yaml list  \x1b[90m# Show the processing order\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to ./workbelt.yaml)
    #[arg(long, short = 'c', global = true, env = "WORKBELT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect and install dependencies
    Install(InstallArgs),

    /// Show applicable dependencies in processing order
    List(ListArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
