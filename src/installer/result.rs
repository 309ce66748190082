//! Install status and per-dependency results

use serde::Serialize;
use tracing::debug;

use crate::domain::Dependency;

/// Outcome of processing one dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallStatus {
    NotInstalled,
    AlreadyInstalled,
    Installed,
    Failed,
}

impl InstallStatus {
    /// Whether dependents may rely on this dependency
    pub fn is_satisfied(self) -> bool {
        matches!(self, InstallStatus::Installed | InstallStatus::AlreadyInstalled)
    }

    /// Whether the user has to act on this dependency
    pub fn needs_manual_action(self) -> bool {
        matches!(self, InstallStatus::NotInstalled | InstallStatus::Failed)
    }

    pub fn glyph(self) -> &'static str {
        match self {
            InstallStatus::Installed | InstallStatus::AlreadyInstalled => "✔",
            InstallStatus::Failed => "✘",
            InstallStatus::NotInstalled => "➜",
        }
    }

    /// Report section heading for dependencies with this status
    pub fn heading(self) -> &'static str {
        match self {
            InstallStatus::Failed => "Failed to Auto Install",
            InstallStatus::NotInstalled => "Please Install Manually",
            InstallStatus::Installed => "Successfully Auto Installed",
            InstallStatus::AlreadyInstalled => "Already Installed",
        }
    }
}

impl std::fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            InstallStatus::NotInstalled => "not installed",
            InstallStatus::AlreadyInstalled => "already installed",
            InstallStatus::Installed => "installed",
            InstallStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// What happened to one dependency during a run
#[derive(Debug, Clone, Serialize)]
pub struct InstallResult {
    pub name: String,
    pub description: Option<String>,
    status: InstallStatus,
    /// Why the dependency was not auto installed
    pub reason: Option<String>,
    /// Install command the user should run by hand
    pub manual_script: Option<String>,
    pub instructions: Option<String>,
    pub resources: Vec<String>,
    /// Narration of what was done, in order
    pub messages: Vec<String>,
    /// Captured error text of a failed install script
    pub error: Option<String>,
}

impl InstallResult {
    pub fn new(dependency: &Dependency) -> Self {
        Self {
            name: dependency.name.clone(),
            description: dependency.description.clone(),
            status: InstallStatus::NotInstalled,
            reason: None,
            manual_script: None,
            instructions: None,
            resources: Vec::new(),
            messages: Vec::new(),
            error: None,
        }
    }

    pub fn status(&self) -> InstallStatus {
        self.status
    }

    /// Move to a new status
    ///
    /// `AlreadyInstalled` is sticky: once detection found the dependency, nothing
    /// downgrades it. Returns whether the transition happened.
    pub fn transition(&mut self, to: InstallStatus) -> bool {
        if self.status == InstallStatus::AlreadyInstalled && to != InstallStatus::AlreadyInstalled {
            debug!(name = %self.name, to = %to, "keeping already installed status");
            return false;
        }
        self.status = to;
        true
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}
