//! Install orchestration for Workbelt
//!
//! This module handles:
//! - Detecting dependencies that are already available
//! - Deciding whether a dependency may be installed unattended
//! - Running install scripts and classifying their outcome
//! - Surfacing instructions, manual scripts and resource links
//!
//! Dependencies are processed strictly one after another in resolver order. Each
//! result is kept so later dependencies can check whether their prerequisites
//! succeeded.
//!
//! ## Per-dependency state machine
//!
//! ```text
//! NotInstalled ──probe finds it──► AlreadyInstalled   (sticky)
//!      │
//!      └─eligible─► run script ──exit 0──► Installed
//!                        │
//!                        ├──exit n──► Failed          (run continues)
//!                        └──no exit code / no spawn──► fatal error (run aborts)
//! ```
//!
//! A dependency is eligible when it has an install script, autoinstall is on for
//! it, it was not detected, none of its prerequisites ended unsatisfied, and it
//! does not need sudo.

pub mod opener;
pub mod probe;
pub mod result;
pub mod script;


use tracing::{info, warn};

pub use opener::{ResourceOpener, SystemOpener};
pub use probe::{CapabilityProbe, PathProbe};
pub use result::{InstallResult, InstallStatus};
pub use script::{ScriptRunner, ShellRunner};

use crate::domain::Dependency;
use crate::error::{Result, WorkbeltError};
use crate::progress::ProgressDisplay;

/// When to open a dependency's resource links
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OpenMode {
    /// Open resources of every dependency
    All,
    /// Open resources only of dependencies that need manual action
    Marked,
    /// Never open resources
    #[default]
    None,
}

impl OpenMode {
    fn should_open(self, status: InstallStatus) -> bool {
        match self {
            OpenMode::All => true,
            OpenMode::Marked => status.needs_manual_action(),
            OpenMode::None => false,
        }
    }
}

/// Options for an install run
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Global autoinstall policy; dependencies may override it
    pub autoinstall: bool,
    pub open: OpenMode,
}

/// Why an ineligible dependency was not installed
const REASON_SUDO: &str = "requires sudo";
const REASON_MANUAL: &str = "not auto installed";

/// Runs the per-dependency state machine over an ordered catalog
pub struct Installer<'a> {
    options: InstallOptions,
    probe: &'a dyn CapabilityProbe,
    runner: &'a dyn ScriptRunner,
    opener: &'a dyn ResourceOpener,
    progress: Option<&'a ProgressDisplay>,
    results: Vec<InstallResult>,
}

impl<'a> Installer<'a> {
    pub fn new(
        options: InstallOptions,
        probe: &'a dyn CapabilityProbe,
        runner: &'a dyn ScriptRunner,
        opener: &'a dyn ResourceOpener,
    ) -> Self {
        Self {
            options,
            probe,
            runner,
            opener,
            progress: None,
            results: Vec::new(),
        }
    }

    /// Report progress on a spinner
    pub fn with_progress(mut self, progress: &'a ProgressDisplay) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Process dependencies in order
    ///
    /// Stops at the first fatal error. Results of dependencies finished before
    /// that stay available through [`Installer::results`].
    pub fn run(&mut self, dependencies: &[Dependency]) -> Result<()> {
        for (i, dependency) in dependencies.iter().enumerate() {
            if let Some(progress) = self.progress {
                progress.start(&dependency.name, i + 1);
            }

            let result = self.install(dependency)?;
            info!(name = %result.name, status = %result.status(), "processed dependency");

            if let Some(progress) = self.progress {
                progress.finish_dependency(&result);
            }
            self.results.push(result);
        }
        Ok(())
    }

    /// Results of every dependency processed so far, in processing order
    pub fn results(&self) -> &[InstallResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<InstallResult> {
        self.results
    }

    fn install(&self, dependency: &Dependency) -> Result<InstallResult> {
        let mut result = InstallResult::new(dependency);

        if self.probe.probe(&dependency.name)? {
            result.transition(InstallStatus::AlreadyInstalled);
        }
        let detected = result.status() == InstallStatus::AlreadyInstalled;

        let wants_autoinstall = dependency.install.is_some()
            && dependency.wants_autoinstall(self.options.autoinstall)
            && !detected;
        let blocked_by = self.blocked_by(dependency);
        let eligible = wants_autoinstall && blocked_by.is_empty() && !dependency.sudo;

        match dependency.install.as_deref() {
            Some(script) if eligible => self.run_script(dependency, script, &mut result)?,
            script => {
                if !detected {
                    result.reason = Some(if !blocked_by.is_empty() {
                        format!("blocked by unresolved prerequisites: {}", blocked_by.join(", "))
                    } else if dependency.sudo {
                        REASON_SUDO.to_string()
                    } else {
                        REASON_MANUAL.to_string()
                    });
                    result.manual_script = script.map(str::to_string);
                }
            }
        }

        result.instructions.clone_from(&dependency.instructions);
        result.resources.clone_from(&dependency.resources);

        if !dependency.resources.is_empty() && self.options.open.should_open(result.status()) {
            for failed in opener::open_all(self.opener, &dependency.resources) {
                result.info(format!("could not open {failed}"));
            }
        }

        Ok(result)
    }

    /// Prerequisites that already ran in this sequence without success
    fn blocked_by(&self, dependency: &Dependency) -> Vec<String> {
        dependency
            .depends_on
            .iter()
            .filter(|name| {
                self.results
                    .iter()
                    .any(|r| &r.name == *name && !r.status().is_satisfied())
            })
            .cloned()
            .collect()
    }

    fn run_script(
        &self,
        dependency: &Dependency,
        script: &str,
        result: &mut InstallResult,
    ) -> Result<()> {
        let run = || self.runner.run(script, &dependency.cwd);
        let outcome = match self.progress {
            Some(progress) => progress.suspend(run),
            None => run(),
        }
        .map_err(|e| WorkbeltError::ScriptSpawnFailed {
            name: dependency.name.clone(),
            reason: e.to_string(),
        })?;

        match outcome.exit_code {
            Some(0) => {
                result.transition(InstallStatus::Installed);
                result.info(format!("ran script `{script}`"));
            }
            Some(code) => {
                let message = format!("'{script}' exited with code {code}");
                warn!(name = %dependency.name, code, "install script failed");
                result.transition(InstallStatus::Failed);
                result.error = Some(if outcome.stderr.trim().is_empty() {
                    message.clone()
                } else {
                    outcome.stderr.trim_end().to_string()
                });
                result.info(message);
                result.manual_script = Some(script.to_string());
            }
            None => {
                return Err(WorkbeltError::ScriptTerminated {
                    name: dependency.name.clone(),
                });
            }
        }
        Ok(())
    }
}
