//! Install command implementation
//!
//! The install process:
//! 1. Load workbelt.yaml and its includes
//! 2. Pick the dependencies that apply to this host
//! 3. Order them so prerequisites come first
//! 4. Detect, install or explain each dependency in that order
//! 5. Write the markdown report, even when the run was aborted

use std::path::PathBuf;

use chrono::Local;
use console::Style;
use tracing::warn;

use crate::cli::InstallArgs;
use crate::commands::helpers::{config_path, load_project};
use crate::error::Result;
use crate::installer::{
    InstallOptions, InstallResult, InstallStatus, Installer, PathProbe, ResourceOpener,
    ShellRunner, SystemOpener,
};
use crate::platform;
use crate::progress::ProgressDisplay;
use crate::report::Report;

/// Run install command
pub fn run(config: Option<PathBuf>, args: InstallArgs) -> Result<()> {
    let path = config_path(config);
    let platform = platform::current();
    let project = load_project(&path, platform)?;

    let options = InstallOptions {
        autoinstall: args.autoinstall(project.config.autoinstall),
        open: args.open,
    };

    println!(
        "{} {} ({} dependencies on {})",
        Style::new().bold().green().apply_to("Bootstrapping"),
        Style::new().bold().apply_to(&project.name),
        project.ordered.len(),
        platform
    );
    if !options.autoinstall {
        println!(
            "{}",
            Style::new()
                .dim()
                .apply_to("Autoinstall is off; pass --autoinstall to run install scripts")
        );
    }

    let started = Local::now();
    let progress = ProgressDisplay::new(project.ordered.len());
    let opener = SystemOpener;
    let mut installer =
        Installer::new(options, &PathProbe, &ShellRunner, &opener).with_progress(&progress);

    let outcome = installer.run(&project.ordered);
    match &outcome {
        Ok(()) => progress.finish(),
        Err(e) => {
            progress.abandon();
            if e.is_fatal_install_error() {
                let done = installer.results().len();
                eprintln!(
                    "{} after {} of {} dependencies",
                    Style::new().bold().red().apply_to("Aborted"),
                    done,
                    project.ordered.len()
                );
            }
        }
    }
    let results = installer.into_results();

    print_summary(&results);

    if !args.no_report {
        let report = Report::new(&project.name, platform.to_string(), started, &results);
        match report.write() {
            Ok(report_path) => {
                println!(
                    "{} {}",
                    Style::new().bold().apply_to("Report:"),
                    report_path.display()
                );
                if args.open_report {
                    if let Err(e) = opener.open(&report_path.to_string_lossy()) {
                        warn!(error = %e, "could not open report");
                    }
                }
            }
            // The fatal error of the run takes precedence over a report failure.
            Err(e) if outcome.is_err() => warn!(error = %e, "could not write report"),
            Err(e) => return Err(e),
        }
    }

    outcome
}

fn print_summary(results: &[InstallResult]) {
    let count = |status: InstallStatus| results.iter().filter(|r| r.status() == status).count();

    println!();
    println!(
        "{} installed, {} already installed, {} to install manually, {} failed",
        Style::new().green().apply_to(count(InstallStatus::Installed)),
        Style::new().green().apply_to(count(InstallStatus::AlreadyInstalled)),
        Style::new().yellow().apply_to(count(InstallStatus::NotInstalled)),
        Style::new().red().apply_to(count(InstallStatus::Failed)),
    );

    for result in results.iter().filter(|r| r.status().needs_manual_action()) {
        if let Some(script) = &result.manual_script {
            println!(
                "  {} {}: {}",
                result.status().glyph(),
                Style::new().bold().apply_to(&result.name),
                Style::new().cyan().apply_to(script)
            );
        }
    }
}
