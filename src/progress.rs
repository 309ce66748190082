//! Spinner display for install runs

use console::Style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::installer::{InstallResult, InstallStatus};

/// Progress display for one install run
pub struct ProgressDisplay {
    /// Spinner for the dependency currently being processed
    spinner: ProgressBar,
    /// Total number of dependencies in the run
    total: usize,
}

impl ProgressDisplay {
    /// Create a new progress display with total dependency count
    pub fn new(total: usize) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .map(|s| s.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✔"]))
        {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));

        Self { spinner, total }
    }

    /// Update to show the dependency being processed
    pub fn start(&self, name: &str, current: usize) {
        self.spinner
            .set_message(format!("({}/{}) {}", current, self.total, name));
    }

    /// Run `f` with the spinner hidden, e.g. while a script owns the terminal
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.spinner.suspend(f)
    }

    /// Print the final line for a processed dependency
    pub fn finish_dependency(&self, result: &InstallResult) {
        let status = result.status();
        let style = match status {
            InstallStatus::Installed | InstallStatus::AlreadyInstalled => Style::new().green(),
            InstallStatus::Failed => Style::new().red(),
            InstallStatus::NotInstalled => Style::new().yellow(),
        };
        let detail = match (&result.reason, status) {
            (Some(reason), InstallStatus::NotInstalled) => format!("{status} ({reason})"),
            _ => status.to_string(),
        };
        self.spinner.suspend(|| {
            println!(
                "{} {} {}",
                style.apply_to(status.glyph()),
                Style::new().bold().apply_to(&result.name),
                Style::new().dim().apply_to(detail)
            );
        });
    }

    /// Clear the spinner after the last dependency
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.spinner.abandon();
    }
}
