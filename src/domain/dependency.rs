//! Dependency domain type
//!
//! A dependency is one named entry of the loaded catalog: something to install,
//! something to read, or both.

use std::path::PathBuf;

/// A fully loaded dependency, ready for resolution and installation
///
/// Constructed once from the catalog and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Catalog key; also the command name probed for on PATH
    pub name: String,

    /// Human readable description shown in the report
    pub description: Option<String>,

    /// Shell command that installs the dependency
    pub install: Option<String>,

    /// Documentation or download links, opened for manual reference
    pub resources: Vec<String>,

    /// Free text shown verbatim to the user
    pub instructions: Option<String>,

    /// Whether the install command needs elevated privileges
    pub sudo: bool,

    /// Names of dependencies that must succeed first
    pub depends_on: Vec<String>,

    /// Overrides the global autoinstall policy when set
    pub autoinstall: Option<bool>,

    /// Directory the install command runs in
    pub cwd: PathBuf,
}

impl Dependency {
    /// Create a dependency with only a name, running in `cwd`
    pub fn new(name: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            description: None,
            install: None,
            resources: Vec::new(),
            instructions: None,
            sudo: false,
            depends_on: Vec::new(),
            autoinstall: None,
            cwd: cwd.into(),
        }
    }

    /// A dependency with no prerequisites seeds the resolver walk
    pub fn is_root(&self) -> bool {
        self.depends_on.is_empty()
    }

    /// Effective autoinstall policy for this dependency
    pub fn wants_autoinstall(&self, global: bool) -> bool {
        self.autoinstall.unwrap_or(global)
    }
}
