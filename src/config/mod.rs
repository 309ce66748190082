//! Configuration file handling for Workbelt
//!
//! This module contains:
//! - `workbelt.yaml` data structures (raw and loaded form)
//! - The loader, which renders templates and follows `includes`
//! - Selection of the catalog that applies to the current host
//!
//! ```yaml
//! name: acme
//! autoinstall: true
//! includes: [teams/*.yaml]
//! systems:
//!   all:
//!     git: https://git-scm.com/downloads
//!   ubuntu:
//!     git: sudo apt-get install -y git
//! ```

pub mod dependency;
pub mod loader;
pub mod serialization;
pub mod template;

use std::path::Path;

use serde::Deserialize;

pub use dependency::DependencyEntry;
pub use loader::ConfigLoader;
use serialization::OrderedMap;

use crate::domain::Dependency;
use crate::error::Result;
use crate::platform::Platform;

/// Default config file name, looked up in the current directory
pub const CONFIG_FILE: &str = "workbelt.yaml";

/// workbelt.yaml as written on disk
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub autoinstall: Option<bool>,

    #[serde(default)]
    pub includes: Option<Vec<String>>,

    #[serde(default)]
    pub systems: Option<OrderedMap<Option<OrderedMap<Option<DependencyEntry>>>>>,
}

/// Dependencies declared under one system label
#[derive(Debug, Clone, PartialEq)]
pub struct SystemCatalog {
    pub name: String,
    pub dependencies: Vec<Dependency>,
}

/// Loaded configuration with includes merged in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbeltConfig {
    /// Project name, used as the report title
    pub name: Option<String>,

    /// Global autoinstall policy
    pub autoinstall: bool,

    /// System catalogs in file order
    pub systems: Vec<SystemCatalog>,
}

impl WorkbeltConfig {
    /// Build the loaded form of a raw config whose dependencies run in `cwd`
    ///
    /// `null` systems and `null` entries are skipped.
    pub fn from_raw(raw: RawConfig, cwd: &Path) -> Result<Self> {
        let mut systems = Vec::new();
        for (system_name, catalog) in raw.systems.unwrap_or_default() {
            let Some(catalog) = catalog else {
                continue;
            };
            let mut dependencies = Vec::with_capacity(catalog.0.len());
            for (name, entry) in catalog {
                if let Some(entry) = entry {
                    dependencies.push(entry.into_dependency(&name, cwd)?);
                }
            }
            systems.push(SystemCatalog {
                name: system_name,
                dependencies,
            });
        }

        Ok(Self {
            name: raw.name,
            autoinstall: raw.autoinstall.unwrap_or(false),
            systems,
        })
    }

    /// Merge the systems of an included config into this one
    ///
    /// Included entries replace same-named entries in place; new entries and new
    /// systems are appended.
    pub fn merge_systems(&mut self, included: WorkbeltConfig) {
        for system in included.systems {
            match self.systems.iter_mut().find(|s| s.name == system.name) {
                Some(existing) => {
                    for dependency in system.dependencies {
                        upsert(&mut existing.dependencies, dependency);
                    }
                }
                None => self.systems.push(system),
            }
        }
    }

    /// The catalog that applies to `platform`, in catalog order
    ///
    /// Matching systems are merged in file order; a later system replaces a
    /// same-named dependency of an earlier one in place.
    pub fn catalog(&self, platform: &Platform) -> Vec<Dependency> {
        let mut catalog = Vec::new();
        for system in self.systems.iter().filter(|s| platform.matches(&s.name)) {
            for dependency in &system.dependencies {
                upsert(&mut catalog, dependency.clone());
            }
        }
        catalog
    }
}

fn upsert(dependencies: &mut Vec<Dependency>, dependency: Dependency) {
    match dependencies.iter_mut().find(|d| d.name == dependency.name) {
        Some(existing) => *existing = dependency,
        None => dependencies.push(dependency),
    }
}
