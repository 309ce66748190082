//! Loading shared by the commands that read workbelt.yaml

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{CONFIG_FILE, ConfigLoader, WorkbeltConfig};
use crate::domain::Dependency;
use crate::error::Result;
use crate::platform::Platform;
use crate::resolver;

/// A loaded project: its config and the dependencies that apply to this host
pub struct Project {
    pub name: String,
    pub config: WorkbeltConfig,
    /// Applicable dependencies in processing order
    pub ordered: Vec<Dependency>,
}

/// Config path from the CLI, or `workbelt.yaml` in the current directory
pub fn config_path(config: Option<PathBuf>) -> PathBuf {
    config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// Load the config at `path` and resolve the processing order for `platform`
pub fn load_project(path: &Path, platform: &Platform) -> Result<Project> {
    let config = ConfigLoader::new().load(path)?;
    let catalog = config.catalog(platform);
    let ordered = resolver::resolve(&catalog);
    debug!(
        platform = %platform,
        declared = catalog.len(),
        ordered = ordered.len(),
        "resolved processing order"
    );

    Ok(Project {
        name: project_name(&config, path),
        config,
        ordered,
    })
}

/// Configured name, else the name of the directory holding the config
fn project_name(config: &WorkbeltConfig, path: &Path) -> String {
    if let Some(name) = &config.name {
        return name.clone();
    }
    std::fs::canonicalize(path)
        .ok()
        .and_then(|p| {
            p.parent()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "Workbelt".to_string())
}
