//! Running install scripts through the host shell
//!
//! Scripts inherit stdin and stdout so interactive installers work. Stderr is
//! forwarded to the terminal as it arrives and also captured, so a failed script
//! can be explained in the report.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

/// How long to keep collecting stderr once the script has exited
const STDERR_GRACE: Duration = Duration::from_millis(200);

/// How an install script ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutcome {
    /// `None` when the process was terminated without an exit code (e.g. by a signal)
    pub exit_code: Option<i32>,
    /// What the script wrote to stderr up to shortly after it exited
    pub stderr: String,
}

/// Executes install scripts
pub trait ScriptRunner {
    /// Run `script` in `cwd` and wait for it to end
    ///
    /// An `Err` means the script could not be started at all.
    fn run(&self, script: &str, cwd: &Path) -> io::Result<ScriptOutcome>;
}

/// Runs scripts with `sh -c` (or `cmd /C` on Windows)
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    fn command(script: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(script);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(script);
            cmd
        }
    }
}

impl ScriptRunner for ShellRunner {
    fn run(&self, script: &str, cwd: &Path) -> io::Result<ScriptOutcome> {
        debug!(script, cwd = %cwd.display(), "spawning install script");

        let mut child = Self::command(script)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()?;

        let (tx, rx) = mpsc::channel::<Vec<u8>>();
        match child.stderr.take() {
            Some(mut pipe) => {
                thread::spawn(move || {
                    let mut chunk = [0u8; 4096];
                    loop {
                        match pipe.read(&mut chunk) {
                            Ok(0) | Err(_) => break,
                            Ok(n) => {
                                let _ = io::stderr().write_all(&chunk[..n]);
                                let _ = tx.send(chunk[..n].to_vec());
                            }
                        }
                    }
                });
            }
            None => drop(tx),
        }

        let status = child.wait()?;

        // A background process started by the script may keep the pipe open long
        // after the script exits. Collect what arrives within the grace period and
        // leave the rest to the forwarding thread.
        let deadline = Instant::now() + STDERR_GRACE;
        let mut captured = Vec::new();
        while let Ok(chunk) = rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            captured.extend_from_slice(&chunk);
        }

        debug!(code = ?status.code(), "install script exited");
        Ok(ScriptOutcome {
            exit_code: status.code(),
            stderr: String::from_utf8_lossy(&captured).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_successful_script() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let outcome = ShellRunner.run("true", temp.path()).expect("script starts");
        assert_eq!(outcome.exit_code, Some(0));
    }

    #[test]
    fn test_exit_code_and_stderr_captured() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let outcome = ShellRunner
            .run("echo boom >&2; exit 3", temp.path())
            .expect("script starts");
        assert_eq!(outcome.exit_code, Some(3));
        assert_eq!(outcome.stderr.trim(), "boom");
    }

    #[test]
    fn test_runs_in_working_directory() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        ShellRunner
            .run("touch marker", temp.path())
            .expect("script starts");
        assert!(temp.path().join("marker").exists());
    }

    #[test]
    fn test_signal_has_no_exit_code() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let outcome = ShellRunner
            .run("kill -9 $$", temp.path())
            .expect("script starts");
        assert_eq!(outcome.exit_code, None);
    }

    #[test]
    fn test_missing_working_directory_fails_to_start() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let result = ShellRunner.run("true", &temp.path().join("missing"));
        assert!(result.is_err());
    }

    #[test]
    fn test_background_child_does_not_hold_up_exit() {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let started = Instant::now();
        let outcome = ShellRunner
            .run("echo early >&2; sleep 5 >/dev/null & exit 0", temp.path())
            .expect("script starts");
        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(outcome.stderr.trim(), "early");
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "returned after {:?}",
            started.elapsed()
        );
    }
}
