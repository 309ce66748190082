//! Platform detection for the current host

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

use super::Platform;

static CURRENT: OnceLock<Platform> = OnceLock::new();

/// Platform of the current host, detected once per process
pub fn current() -> &'static Platform {
    CURRENT.get_or_init(|| {
        let release = release_file(Path::new("/etc")).and_then(|path| fs::read_to_string(path).ok());
        let wow64 = std::env::var("PROCESSOR_ARCHITEW6432").ok();
        let platform = classify(
            std::env::consts::OS,
            host_arch(std::env::consts::ARCH, wow64.as_deref()),
            release.as_deref(),
        );
        debug!(platform = %platform, "detected host platform");
        platform
    })
}

/// Classify a host from its OS name, CPU architecture and release file contents
///
/// `release` is the text of a Linux `*-release` file, if one was found.
pub fn classify(os: &str, arch: &str, release: Option<&str>) -> Platform {
    match os {
        "windows" => {
            if arch.contains("64") {
                Platform::Win64
            } else {
                Platform::Win32
            }
        }
        "macos" => Platform::Darwin,
        "linux" => release.map_or(Platform::Linux, classify_release),
        other => Platform::Other(other.to_string()),
    }
}

/// CPU architecture of the host rather than of this build
///
/// A 32-bit process on 64-bit Windows sees `PROCESSOR_ARCHITEW6432`.
fn host_arch<'a>(build_arch: &'a str, wow64: Option<&'a str>) -> &'a str {
    match wow64 {
        Some(_) => "x86_64",
        None => build_arch,
    }
}

fn classify_release(release: &str) -> Platform {
    let release = release.to_lowercase();
    if release.contains("centos") {
        Platform::Centos
    } else if release.contains("debian") {
        Platform::Debian
    } else if release.contains("fedora") {
        Platform::Fedora
    } else if release.contains("red hat") {
        Platform::RedHat
    } else if release.contains("ubuntu") {
        Platform::Ubuntu
    } else {
        Platform::Linux
    }
}

/// First `*-release` file in `etc_dir`, falling back to `os-release`
fn release_file(etc_dir: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(etc_dir)
        .ok()?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with("-release"))
        })
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .or_else(|| Some(etc_dir.join("os-release")))
        .filter(|path| path.is_file())
}
