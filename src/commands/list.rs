//! List command implementation
//!
//! Shows the host labels and the applicable dependencies in the order an
//! install run would process them. Nothing is probed or installed.

use std::path::PathBuf;

use console::Style;
use serde::Serialize;

use crate::cli::ListArgs;
use crate::commands::helpers::{Project, config_path, load_project};
use crate::domain::Dependency;
use crate::error::Result;
use crate::platform::{self, Platform};

#[derive(Debug, Serialize)]
struct Listing<'a> {
    name: &'a str,
    platform: String,
    labels: Vec<String>,
    autoinstall: bool,
    dependencies: Vec<ListedDependency<'a>>,
}

#[derive(Debug, Serialize)]
struct ListedDependency<'a> {
    name: &'a str,
    description: Option<&'a str>,
    install: Option<&'a str>,
    depends_on: &'a [String],
    sudo: bool,
    autoinstall: Option<bool>,
    resources: &'a [String],
}

impl<'a> From<&'a Dependency> for ListedDependency<'a> {
    fn from(dependency: &'a Dependency) -> Self {
        Self {
            name: &dependency.name,
            description: dependency.description.as_deref(),
            install: dependency.install.as_deref(),
            depends_on: &dependency.depends_on,
            sudo: dependency.sudo,
            autoinstall: dependency.autoinstall,
            resources: &dependency.resources,
        }
    }
}

/// Run list command
pub fn run(config: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let platform = platform::current();
    let project = load_project(&config_path(config), platform)?;

    if args.json {
        let listing = listing(&project, platform);
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print_listing(&project, platform);
    }
    Ok(())
}

fn listing<'a>(project: &'a Project, platform: &Platform) -> Listing<'a> {
    Listing {
        name: &project.name,
        platform: platform.to_string(),
        labels: platform.labels(),
        autoinstall: project.config.autoinstall,
        dependencies: project.ordered.iter().map(ListedDependency::from).collect(),
    }
}

fn print_listing(project: &Project, platform: &Platform) {
    println!(
        "{} {}",
        Style::new().bold().apply_to("Project:"),
        project.name
    );
    println!(
        "{} {} ({})",
        Style::new().bold().apply_to("Platform:"),
        platform,
        platform.labels().join(", ")
    );
    println!();

    if project.ordered.is_empty() {
        println!("No dependencies apply to this platform.");
        return;
    }

    println!("Dependencies in processing order ({}):", project.ordered.len());
    println!();
    for (i, dependency) in project.ordered.iter().enumerate() {
        let mut flags = Vec::new();
        if dependency.sudo {
            flags.push("sudo".to_string());
        }
        match dependency.autoinstall {
            Some(true) => flags.push("autoinstall".to_string()),
            Some(false) => flags.push("manual".to_string()),
            None => {}
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };

        println!(
            "  {:>2}. {}{}",
            i + 1,
            Style::new().bold().yellow().apply_to(&dependency.name),
            Style::new().dim().apply_to(flags)
        );
        if let Some(description) = &dependency.description {
            println!("      {description}");
        }
        if !dependency.depends_on.is_empty() {
            println!(
                "      {} {}",
                Style::new().bold().apply_to("After:"),
                dependency.depends_on.join(", ")
            );
        }
        if let Some(install) = &dependency.install {
            println!(
                "      {} {}",
                Style::new().bold().apply_to("Install:"),
                Style::new().cyan().apply_to(install)
            );
        }
    }
}
