//! Dependency entries as declared in workbelt.yaml
//!
//! An entry is either a bare install command or a mapping:
//!
//! ```yaml
//! git: sudo apt-get install -y git
//! node:
//!   description: JavaScript runtime
//!   install: curl -fsSL https://fnm.vercel.app/install | bash
//!   instructions: Restart your shell afterwards
//!   open: https://nodejs.org
//!   depends_on: [git]
//! ```

use std::path::Path;

use serde::Deserialize;

use super::serialization::OneOrMany;
use crate::domain::Dependency;
use crate::error::{Result, WorkbeltError};

/// A dependency declaration in workbelt.yaml
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DependencyEntry {
    /// Shorthand: the value is the install command
    Script(String),
    Detailed(DependencyFields),
}

/// Mapping form of a dependency declaration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DependencyFields {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub install: Option<String>,

    #[serde(default)]
    pub instructions: Option<String>,

    #[serde(default)]
    pub open: Option<OneOrMany>,

    #[serde(default)]
    pub sudo: Option<bool>,

    #[serde(default)]
    pub depends_on: Vec<String>,

    #[serde(default)]
    pub autoinstall: Option<bool>,
}

impl DependencyEntry {
    /// Convert into a loaded dependency running in `cwd`
    ///
    /// An `install` value that is an http(s) URL becomes the first resource link
    /// instead of a shell command.
    pub fn into_dependency(self, name: &str, cwd: &Path) -> Result<Dependency> {
        if name.trim().is_empty() {
            return Err(WorkbeltError::ConfigInvalid {
                message: "Dependency name cannot be empty".to_string(),
            });
        }

        let fields = match self {
            DependencyEntry::Script(install) => DependencyFields {
                install: Some(install),
                ..DependencyFields::default()
            },
            DependencyEntry::Detailed(fields) => fields,
        };

        if let Some(empty) = fields.depends_on.iter().find(|d| d.trim().is_empty()) {
            return Err(WorkbeltError::ConfigInvalid {
                message: format!("Dependency '{name}' has an empty prerequisite name '{empty}'"),
            });
        }

        let mut resources = fields.open.map(OneOrMany::into_vec).unwrap_or_default();
        let install = match fields.install.filter(|s| !s.trim().is_empty()) {
            Some(url) if is_url(&url) => {
                resources.insert(0, url);
                None
            }
            other => other,
        };

        Ok(Dependency {
            description: fields.description,
            install,
            resources,
            instructions: fields.instructions,
            sudo: fields.sudo.unwrap_or(false),
            depends_on: fields.depends_on,
            autoinstall: fields.autoinstall,
            ..Dependency::new(name, cwd)
        })
    }
}

fn is_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> DependencyEntry {
        serde_yaml::from_str(yaml).expect("valid entry")
    }

    #[test]
    fn test_script_shorthand() {
        let dep = parse("brew install git")
            .into_dependency("git", Path::new("/work"))
            .expect("valid dependency");

        assert_eq!(dep.install.as_deref(), Some("brew install git"));
        assert!(!dep.sudo);
        assert!(dep.depends_on.is_empty());
        assert_eq!(dep.cwd, Path::new("/work"));
    }

    #[test]
    fn test_detailed_entry() {
        let yaml = r"
description: Runtime
install: ./install-node.sh
instructions: Restart your shell
open: [https://nodejs.org, https://npmjs.com]
sudo: true
depends_on: [git, curl]
autoinstall: false
";
        let dep = parse(yaml)
            .into_dependency("node", Path::new("/work"))
            .expect("valid dependency");

        assert_eq!(dep.description.as_deref(), Some("Runtime"));
        assert_eq!(dep.install.as_deref(), Some("./install-node.sh"));
        assert_eq!(dep.resources, vec!["https://nodejs.org", "https://npmjs.com"]);
        assert!(dep.sudo);
        assert_eq!(dep.depends_on, vec!["git", "curl"]);
        assert_eq!(dep.autoinstall, Some(false));
    }

    #[test]
    fn test_url_install_becomes_resource() {
        let dep = parse("https://docs.docker.com/get-docker/")
            .into_dependency("docker", Path::new("/work"))
            .expect("valid dependency");

        assert!(dep.install.is_none());
        assert_eq!(dep.resources, vec!["https://docs.docker.com/get-docker/"]);
    }

    #[test]
    fn test_url_install_precedes_open_links() {
        let yaml = "install: https://a.example\nopen: https://b.example\n";
        let dep = parse(yaml)
            .into_dependency("x", Path::new("/work"))
            .expect("valid dependency");

        assert_eq!(dep.resources, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_empty_prerequisite_rejected() {
        let result = parse("depends_on: ['']").into_dependency("x", Path::new("/work"));
        assert!(matches!(result, Err(WorkbeltError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = parse("echo hi").into_dependency(" ", Path::new("/work"));
        assert!(matches!(result, Err(WorkbeltError::ConfigInvalid { .. })));
    }
}
