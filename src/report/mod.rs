//! Markdown install report
//!
//! The report lists every processed dependency grouped by outcome, with an
//! overview of anchor links at the top. It is written to a fresh directory
//! under the system temp dir so repeated runs never overwrite each other.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::common::string_utils::{heading_anchor, kebab_case};
use crate::error::{Result, WorkbeltError};
use crate::installer::{InstallResult, InstallStatus};

/// Order of the report sections
const SECTIONS: [InstallStatus; 4] = [
    InstallStatus::Failed,
    InstallStatus::NotInstalled,
    InstallStatus::Installed,
    InstallStatus::AlreadyInstalled,
];

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Summary of one install run
pub struct Report<'a> {
    pub name: &'a str,
    pub os: String,
    pub username: String,
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
    pub results: &'a [InstallResult],
}

impl<'a> Report<'a> {
    /// Report for a run that started at `started` and just finished
    pub fn new(name: &'a str, os: String, started: DateTime<Local>, results: &'a [InstallResult]) -> Self {
        Self {
            name,
            os,
            username: current_username(),
            started,
            finished: Local::now(),
            results,
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("# {} Install Report\n\n", self.name);
        out.push_str(&format!("- **OS:** {}\n", self.os));
        out.push_str(&format!("- **User:** {}\n", self.username));
        out.push_str(&format!("- **Started:** {}\n", self.started.format(TIME_FORMAT)));
        out.push_str(&format!("- **Finished:** {}\n", self.finished.format(TIME_FORMAT)));

        out.push_str("\n## Dependencies\n\n");
        for status in SECTIONS {
            for result in self.with_status(status) {
                let heading = format!("{} {}", status.glyph(), result.name);
                out.push_str(&format!(
                    "- [**{heading}**](#{}): {status}\n",
                    heading_anchor(&heading)
                ));
            }
        }

        for status in SECTIONS {
            let mut group = self.with_status(status).peekable();
            if group.peek().is_none() {
                continue;
            }
            out.push_str(&format!("\n## {}\n", status.heading()));
            for result in group {
                out.push('\n');
                out.push_str(&render_result(result));
            }
        }

        out
    }

    /// Write the report under `base` and return its path
    pub fn write_to(&self, base: &Path) -> Result<PathBuf> {
        let failed = |path: &Path, e: std::io::Error| WorkbeltError::ReportWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        fs::create_dir_all(base).map_err(|e| failed(base, e))?;
        let dir = tempfile::Builder::new()
            .prefix("report-")
            .tempdir_in(base)
            .map_err(|e| failed(base, e))?
            .keep();

        let stem = match kebab_case(self.name) {
            s if s.is_empty() => "workbelt".to_string(),
            s => s,
        };
        let path = dir.join(format!("{stem}-install-report.md"));
        fs::write(&path, self.render()).map_err(|e| failed(&path, e))?;
        debug!(path = %path.display(), "wrote install report");
        Ok(path)
    }

    /// Write the report under the default report directory
    pub fn write(&self) -> Result<PathBuf> {
        self.write_to(&default_dir())
    }

    fn with_status(&self, status: InstallStatus) -> impl Iterator<Item = &InstallResult> {
        self.results.iter().filter(move |r| r.status() == status)
    }
}

/// Markdown narrative for one dependency
pub fn render_result(result: &InstallResult) -> String {
    let status = result.status();
    let mut out = format!("### {} {}\n", status.glyph(), result.name);

    if let Some(description) = &result.description {
        out.push_str(&format!("\n{description}\n"));
    }
    if let Some(reason) = &result.reason {
        out.push_str(&format!("\n**{status}:** {reason}\n"));
    }
    if let Some(script) = &result.manual_script {
        out.push_str(&format!("\nInstall with:\n\n```sh\n{}\n```\n", script.trim_end()));
    }
    if !result.messages.is_empty() {
        out.push('\n');
        for message in &result.messages {
            out.push_str(&format!("- {message}\n"));
        }
    }
    if let Some(instructions) = &result.instructions {
        out.push_str(&format!("\n{}\n", instructions.trim_end()));
    }
    if !result.resources.is_empty() {
        out.push_str("\nResources:\n\n");
        for resource in &result.resources {
            out.push_str(&format!("- <{resource}>\n"));
        }
    }
    if let Some(error) = &result.error {
        out.push_str(&format!("\nError output:\n\n```\n{}\n```\n", error.trim_end()));
    }

    out
}

/// `<tmp>/workbelt`, never relative to the working directory
pub fn default_dir() -> PathBuf {
    let tmp = std::env::temp_dir();
    let base = if tmp.is_absolute() {
        tmp
    } else if cfg!(windows) {
        std::env::var("TEMP")
            .or_else(|_| std::env::var("TMP"))
            .map_or_else(|_| PathBuf::from("C:\\Windows\\Temp"), PathBuf::from)
    } else {
        PathBuf::from("/tmp")
    };
    base.join("workbelt")
}

fn current_username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
