//! Host platform classification
//!
//! This module handles:
//! - The base platform of the current host (via detection module)
//! - Expanding a base platform into every catalog label it answers to
//!
//! The catalog groups dependencies under system labels (`all`, `linux`, `ubuntu`,
//! `mac`, ...). A host matches `all` plus every label returned by [`Platform::labels`].

pub mod detection;

pub use detection::current;

/// Catalog label that applies to every host
pub const ALL: &str = "all";

/// Base classification of a host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Centos,
    Darwin,
    Debian,
    Fedora,
    RedHat,
    Ubuntu,
    Linux,
    Win32,
    Win64,
    /// Any other OS, by its Rust `std::env::consts::OS` name
    Other(String),
}

impl Platform {
    /// Canonical name of the base classification
    pub fn name(&self) -> &str {
        match self {
            Platform::Centos => "centos",
            Platform::Darwin => "darwin",
            Platform::Debian => "debian",
            Platform::Fedora => "fedora",
            Platform::RedHat => "redhat",
            Platform::Ubuntu => "ubuntu",
            Platform::Linux => "linux",
            Platform::Win32 => "win32",
            Platform::Win64 => "win64",
            Platform::Other(os) => os,
        }
    }

    fn is_ubuntu(&self) -> bool {
        *self == Platform::Ubuntu
    }

    fn is_debian(&self) -> bool {
        self.is_ubuntu() || *self == Platform::Debian
    }

    fn is_rhel(&self) -> bool {
        matches!(self, Platform::RedHat | Platform::Centos | Platform::Fedora)
    }

    fn is_linux(&self) -> bool {
        self.is_rhel() || self.is_debian() || *self == Platform::Linux
    }

    fn is_darwin(&self) -> bool {
        *self == Platform::Darwin
    }

    fn is_windows(&self) -> bool {
        matches!(self, Platform::Win32 | Platform::Win64)
    }

    /// Every catalog label this host answers to, excluding `all`
    pub fn labels(&self) -> Vec<String> {
        let checks = [
            ("centos", *self == Platform::Centos),
            ("darwin", self.is_darwin()),
            ("debian", self.is_debian()),
            ("fedora", *self == Platform::Fedora),
            ("linux", self.is_linux()),
            ("mac", self.is_darwin()),
            ("osx", self.is_darwin()),
            ("redhat", *self == Platform::RedHat),
            ("rhel", self.is_rhel()),
            ("ubuntu", self.is_ubuntu()),
            ("unix", self.is_linux() || self.is_darwin()),
            ("win32", *self == Platform::Win32),
            ("win64", *self == Platform::Win64),
            ("win", self.is_windows()),
            ("windows", self.is_windows()),
        ];

        let mut labels: Vec<String> = checks
            .iter()
            .filter(|(_, matched)| *matched)
            .map(|(label, _)| (*label).to_string())
            .collect();

        if let Platform::Other(os) = self {
            labels.push(os.clone());
        }

        labels
    }

    /// Whether a catalog system label applies to this host
    pub fn matches(&self, label: &str) -> bool {
        label == ALL || self.labels().iter().any(|l| l == label)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ubuntu_labels() {
        let labels = Platform::Ubuntu.labels();
        assert_eq!(labels, vec!["debian", "linux", "ubuntu", "unix"]);
    }

    #[test]
    fn test_fedora_is_rhel_and_linux() {
        let labels = Platform::Fedora.labels();
        assert!(labels.contains(&"rhel".to_string()));
        assert!(labels.contains(&"linux".to_string()));
        assert!(!labels.contains(&"debian".to_string()));
    }

    #[test]
    fn test_darwin_aliases() {
        let labels = Platform::Darwin.labels();
        assert_eq!(labels, vec!["darwin", "mac", "osx", "unix"]);
    }

    #[test]
    fn test_windows_labels() {
        assert_eq!(Platform::Win64.labels(), vec!["win64", "win", "windows"]);
        assert_eq!(Platform::Win32.labels(), vec!["win32", "win", "windows"]);
    }

    #[test]
    fn test_other_platform_uses_os_name() {
        let platform = Platform::Other("freebsd".to_string());
        assert_eq!(platform.labels(), vec!["freebsd"]);
        assert_eq!(platform.to_string(), "freebsd");
    }

    #[test]
    fn test_matches_all_and_labels() {
        assert!(Platform::Debian.matches("all"));
        assert!(Platform::Debian.matches("linux"));
        assert!(!Platform::Debian.matches("ubuntu"));
        assert!(!Platform::Debian.matches("mac"));
    }
}
