//! Loading workbelt.yaml and the files it includes
//!
//! Loading a file:
//! 1. Render it as a template (see [`super::template`])
//! 2. Parse the YAML
//! 3. Turn entries into dependencies running in the file's directory
//! 4. Load every include the same way and merge its systems over this file's
//!
//! Each file is loaded at most once per loader, so include cycles terminate.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use wax::Glob;

use super::template;
use super::{RawConfig, WorkbeltConfig};
use crate::error::{Result, WorkbeltError};

/// Loads configuration files, tracking which ones were already read
#[derive(Debug)]
pub struct ConfigLoader {
    loaded: HashSet<PathBuf>,
    env: BTreeMap<String, String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader that exposes the process environment to templates
    pub fn new() -> Self {
        Self::with_env(std::env::vars().collect())
    }

    /// Create a loader with an explicit template environment
    pub fn with_env(env: BTreeMap<String, String>) -> Self {
        Self {
            loaded: HashSet::new(),
            env,
        }
    }

    /// Load a config file and everything it includes
    pub fn load(&mut self, path: &Path) -> Result<WorkbeltConfig> {
        if !path.is_file() {
            return Err(WorkbeltError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let path = fs::canonicalize(path).map_err(|e| WorkbeltError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.loaded.insert(path.clone());

        let text = fs::read_to_string(&path).map_err(|e| WorkbeltError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let cwd = path.parent().unwrap_or_else(|| Path::new("/")).to_path_buf();

        debug!(path = %path.display(), "loading config");
        self.load_str(&text, &path, &cwd)
    }

    /// Load config text as if it had been read from `path`
    ///
    /// Includes and working directories resolve against `cwd`.
    pub fn load_str(&mut self, text: &str, path: &Path, cwd: &Path) -> Result<WorkbeltConfig> {
        let rendered =
            template::render(text, &self.env).map_err(|e| WorkbeltError::TemplateFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let raw: RawConfig = if rendered.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(&rendered).map_err(|e| WorkbeltError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?
        };

        let includes = raw.includes.clone().unwrap_or_default();
        let mut config = WorkbeltConfig::from_raw(raw, cwd)?;

        for include in expand_includes(&includes, cwd)? {
            let canonical = fs::canonicalize(&include).unwrap_or_else(|_| include.clone());
            if self.loaded.contains(&canonical) {
                debug!(path = %include.display(), "skipping already loaded include");
                continue;
            }
            let included = self.load(&include)?;
            config.merge_systems(included);
        }

        Ok(config)
    }
}

/// Expand include patterns relative to `base` into file paths
///
/// Literal paths are returned as given (missing files surface as load errors);
/// glob patterns expand to the matching files in sorted order.
fn expand_includes(patterns: &[String], base: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if !is_glob(pattern) {
            paths.push(base.join(pattern));
            continue;
        }

        let glob = Glob::new(pattern).map_err(|e| WorkbeltError::InvalidInclude {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;

        let mut matched: Vec<PathBuf> = glob
            .walk(base)
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file())
            .collect();
        matched.sort();

        debug!(pattern = %pattern, matches = matched.len(), "expanded include");
        paths.extend(matched);
    }

    Ok(paths)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    fn loader() -> ConfigLoader {
        ConfigLoader::with_env(BTreeMap::from([("HOME".to_string(), "/home/test".to_string())]))
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let result = loader().load(&temp.path().join("workbelt.yaml"));
        assert!(matches!(result, Err(WorkbeltError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_sets_working_directory() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = write(
            temp.path(),
            "workbelt.yaml",
            "name: demo\nautoinstall: true\nsystems:\n  all:\n    git: echo git\n",
        );

        let config = loader().load(&path).expect("config loads");
        let expected_cwd = fs::canonicalize(temp.path()).expect("canonical temp dir");

        assert_eq!(config.name.as_deref(), Some("demo"));
        assert!(config.autoinstall);
        assert_eq!(config.systems[0].dependencies[0].cwd, expected_cwd);
    }

    #[test]
    fn test_load_renders_templates() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = write(
            temp.path(),
            "workbelt.yaml",
            "systems:\n  all:\n    tool: \"ls {{ env.HOME }}\"\n",
        );

        let config = loader().load(&path).expect("config loads");
        assert_eq!(
            config.systems[0].dependencies[0].install.as_deref(),
            Some("ls /home/test")
        );
    }

    #[test]
    fn test_load_parse_error_names_file() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = write(temp.path(), "workbelt.yaml", "systems: [unclosed\n");

        let err = loader().load(&path).expect_err("invalid yaml");
        assert!(matches!(err, WorkbeltError::ConfigParseFailed { .. }));
        assert!(err.to_string().contains("workbelt.yaml"));
    }

    #[test]
    fn test_includes_merge_with_own_working_directory() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = write(
            temp.path(),
            "workbelt.yaml",
            "includes: [team/extra.yaml]\nsystems:\n  all:\n    git: echo base\n    make: echo make\n",
        );
        write(
            temp.path(),
            "team/extra.yaml",
            "systems:\n  all:\n    git: echo team\n    node: echo node\n",
        );

        let config = loader().load(&path).expect("config loads");
        let deps = &config.systems[0].dependencies;
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();

        assert_eq!(names, vec!["git", "make", "node"]);
        assert_eq!(deps[0].install.as_deref(), Some("echo team"));
        assert!(deps[0].cwd.ends_with("team"));
        assert!(!deps[1].cwd.ends_with("team"));
    }

    #[test]
    fn test_glob_includes() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = write(
            temp.path(),
            "workbelt.yaml",
            "includes: ['parts/*.yaml']\nsystems: ~\n",
        );
        write(temp.path(), "parts/a.yaml", "systems:\n  all:\n    a: echo a\n");
        write(temp.path(), "parts/b.yaml", "systems:\n  all:\n    b: echo b\n");
        write(temp.path(), "parts/notes.txt", "ignored");

        let config = loader().load(&path).expect("config loads");
        let names: Vec<&str> = config.systems[0]
            .dependencies
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_include_cycle_terminates() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = write(
            temp.path(),
            "workbelt.yaml",
            "includes: [other.yaml]\nsystems:\n  all:\n    a: echo a\n",
        );
        write(
            temp.path(),
            "other.yaml",
            "includes: [workbelt.yaml]\nsystems:\n  all:\n    b: echo b\n",
        );

        let config = loader().load(&path).expect("config loads");
        assert_eq!(config.systems[0].dependencies.len(), 2);
    }

    #[test]
    fn test_missing_literal_include_fails() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = write(temp.path(), "workbelt.yaml", "includes: [nope.yaml]\n");

        let result = loader().load(&path);
        assert!(matches!(result, Err(WorkbeltError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_empty_file_is_empty_config() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = write(temp.path(), "workbelt.yaml", "");

        let config = loader().load(&path).expect("config loads");
        assert!(config.systems.is_empty());
    }

    #[test]
    fn test_is_glob() {
        assert!(is_glob("*.yaml"));
        assert!(is_glob("teams/{a,b}.yaml"));
        assert!(!is_glob("teams/a.yaml"));
    }
}
