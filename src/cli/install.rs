use clap::Parser;

use crate::installer::OpenMode;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Detect only, report what is missing:\n    workbelt install\n\n\
                   Install everything that may run unattended:\n    workbelt install --autoinstall\n\n\
                   Ignore autoinstall from workbelt.yaml:\n    workbelt install --no-autoinstall\n\n\
                   Open links of dependencies that need manual steps:\n    workbelt install --open marked")]
pub struct InstallArgs {
    /// Run install scripts unattended (overrides `autoinstall` in workbelt.yaml)
    #[arg(long, short = 'a', conflicts_with = "no_autoinstall")]
    pub autoinstall: bool,

    /// Never run install scripts unless a dependency forces it
    #[arg(long, short = 'n')]
    pub no_autoinstall: bool,

    /// Which dependencies' resource links to open in the browser
    #[arg(long, value_enum, value_name = "MODE", default_value_t = OpenMode::None)]
    pub open: OpenMode,

    /// Do not write the markdown report
    #[arg(long)]
    pub no_report: bool,

    /// Open the report after writing it
    #[arg(long, conflicts_with = "no_report")]
    pub open_report: bool,
}

impl InstallArgs {
    /// Global autoinstall policy given the configured default
    pub fn autoinstall(&self, configured: bool) -> bool {
        if self.autoinstall {
            true
        } else if self.no_autoinstall {
            false
        } else {
            configured
        }
    }
}
