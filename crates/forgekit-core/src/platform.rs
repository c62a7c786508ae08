//! Host platform detection and per-platform naming conventions
//!
//! Vendored tool binaries live under a per-platform subdirectory
//! (`Windows/`, `MacOSX/`, `Linux/`) and carry an `.exe` suffix on
//! Windows. The project generator takes a different action keyword per
//! host OS. All of that lives here so the pipeline modules never touch
//! `cfg` or `std::env::consts` directly.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Host operating system a pipeline run executes on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPlatform {
    Windows,
    MacOs,
    Linux,
}

impl HostPlatform {
    /// Detect the platform of the running process
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => HostPlatform::Windows,
            "macos" => HostPlatform::MacOs,
            _ => HostPlatform::Linux,
        }
    }

    /// Name of the per-platform subdirectory vendored binaries live in
    pub fn vendor_dir(&self) -> &'static str {
        match self {
            HostPlatform::Windows => "Windows",
            HostPlatform::MacOs => "MacOSX",
            HostPlatform::Linux => "Linux",
        }
    }

    /// Executable file name for a tool base name on this platform
    pub fn executable_name(&self, base: &str) -> String {
        match self {
            HostPlatform::Windows => format!("{base}.exe"),
            _ => base.to_string(),
        }
    }

    /// Relative path of a vendored executable: `<vendor-dir>/<name>`
    pub fn vendored_executable(&self, base: &str) -> PathBuf {
        PathBuf::from(self.vendor_dir()).join(self.executable_name(base))
    }

    /// Action keyword the project generator expects for this platform
    pub fn project_action(&self) -> &'static str {
        match self {
            HostPlatform::Windows => "vs2019",
            HostPlatform::MacOs => "xcode4",
            HostPlatform::Linux => "gmake2",
        }
    }
}

impl std::str::FromStr for HostPlatform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(HostPlatform::Windows),
            "macos" => Ok(HostPlatform::MacOs),
            "linux" => Ok(HostPlatform::Linux),
            _ => Err(format!("Unknown platform: {s}")),
        }
    }
}

impl std::fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HostPlatform::Windows => "windows",
            HostPlatform::MacOs => "macos",
            HostPlatform::Linux => "linux",
        };
        write!(f, "{name}")
    }
}
