//! Common test utilities for Workbelt integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A project directory holding a workbelt.yaml
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a workspace with the given workbelt.yaml
    pub fn with_config(config: &str) -> Self {
        let workspace = Self::new();
        workspace.write_file("workbelt.yaml", config);
        workspace
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Workbelt command running inside this workspace
    ///
    /// Reports land under the workspace instead of the system temp dir.
    pub fn cmd(&self) -> Command {
        let mut cmd = workbelt_cmd();
        cmd.current_dir(&self.path)
            .env_remove("WORKBELT_CONFIG")
            .env_remove("RUST_LOG")
            .env("TMPDIR", &self.path);
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn workbelt_cmd() -> Command {
    Command::cargo_bin("workbelt").expect("workbelt binary is built")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
    }

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::with_config("systems: {}\n");
        workspace.write_file("nested/file.txt", "hello");
        assert!(workspace.file_exists("workbelt.yaml"));
        assert_eq!(workspace.read_file("nested/file.txt"), "hello");
    }
}
