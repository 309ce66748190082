//! Capability probing: is a command already available on this host?

use std::path::PathBuf;

use tracing::debug;

use crate::error::{Result, WorkbeltError};

/// Answers whether a command with a given name is resolvable
pub trait CapabilityProbe {
    /// `Ok(true)` when found, `Ok(false)` when not found
    ///
    /// Any error is fatal for the whole install run.
    fn probe(&self, name: &str) -> Result<bool>;
}

/// Looks commands up on `PATH`
#[derive(Debug, Default, Clone, Copy)]
pub struct PathProbe;

impl CapabilityProbe for PathProbe {
    fn probe(&self, name: &str) -> Result<bool> {
        lookup_outcome(name, which::which(name))
    }
}

/// Map a `which` lookup to found / not found / fatal
///
/// An empty or unset `PATH` means nothing is resolvable, not a broken host.
fn lookup_outcome(name: &str, lookup: which::Result<PathBuf>) -> Result<bool> {
    match lookup {
        Ok(path) => {
            debug!(name, path = %path.display(), "found on PATH");
            Ok(true)
        }
        Err(
            which::Error::CannotFindBinaryPath
            | which::Error::CannotGetCurrentDirAndPathListEmpty,
        ) => {
            debug!(name, "not found on PATH");
            Ok(false)
        }
        Err(e) => Err(WorkbeltError::ProbeFailed {
            name: name.to_string(),
            reason: e.to_string(),
        }),
    }
}
