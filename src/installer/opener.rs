//! Opening resource links with the desktop's default handler

use std::io;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

/// Opens a URL or path for the user
///
/// Implementations must be shareable across threads; one dependency's resources
/// are opened concurrently.
pub trait ResourceOpener: Sync {
    fn open(&self, target: &str) -> io::Result<()>;
}

/// Uses `open` on macOS, `cmd /C start` on Windows and `xdg-open` elsewhere
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(target: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(target);
            cmd
        } else if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(target);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(target);
            cmd
        }
    }
}

impl ResourceOpener for SystemOpener {
    fn open(&self, target: &str) -> io::Result<()> {
        let status = Self::command(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::other(format!("opener exited with {status}")))
        }
    }
}

/// Open every target concurrently and wait for all of them
///
/// Failures are logged and returned; they never abort a run.
pub fn open_all(opener: &dyn ResourceOpener, targets: &[String]) -> Vec<String> {
    thread::scope(|scope| {
        let handles: Vec<_> = targets
            .iter()
            .map(|target| (target, scope.spawn(move || opener.open(target))))
            .collect();

        let mut failed = Vec::new();
        for (target, handle) in handles {
            match handle.join() {
                Ok(Ok(())) => debug!(target = %target, "opened resource"),
                Ok(Err(e)) => {
                    warn!(target = %target, error = %e, "failed to open resource");
                    failed.push(target.clone());
                }
                Err(_) => failed.push(target.clone()),
            }
        }
        failed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording {
        opened: Mutex<Vec<String>>,
    }

    impl ResourceOpener for Recording {
        fn open(&self, target: &str) -> io::Result<()> {
            if target.contains("broken") {
                return Err(io::Error::other("no handler"));
            }
            self.opened
                .lock()
                .map_err(|_| io::Error::other("poisoned"))?
                .push(target.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_open_all_opens_every_target() {
        let opener = Recording {
            opened: Mutex::new(Vec::new()),
        };
        let targets = vec!["https://a.example".to_string(), "https://b.example".to_string()];

        let failed = open_all(&opener, &targets);

        assert!(failed.is_empty());
        let mut opened = opener.opened.into_inner().expect("not poisoned");
        opened.sort();
        assert_eq!(opened, targets);
    }

    #[test]
    fn test_open_all_reports_failures() {
        let opener = Recording {
            opened: Mutex::new(Vec::new()),
        };
        let targets = vec!["https://ok.example".to_string(), "https://broken.example".to_string()];

        let failed = open_all(&opener, &targets);

        assert_eq!(failed, vec!["https://broken.example"]);
    }
}
