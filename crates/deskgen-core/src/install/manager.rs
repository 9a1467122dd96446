//! Package manager detection

use std::fmt;
use std::process::Command;

/// External package managers the generator drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Bower,
}

impl PackageManager {
    /// Name of the binary on PATH
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bower => "bower",
        }
    }

    pub fn install_args(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Npm | PackageManager::Yarn | PackageManager::Bower => &["install"],
        }
    }

    /// Command line as shown to the user
    pub fn install_command(&self) -> String {
        format!("{} {}", self.binary(), self.install_args().join(" "))
    }

    /// Script-level manager: yarn when it is on PATH, npm otherwise
    pub fn detect_script_manager() -> Self {
        Self::script_manager(is_installed(PackageManager::Yarn))
    }

    pub fn script_manager(has_yarn: bool) -> Self {
        if has_yarn {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// Detection result for a package manager
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub manager: PackageManager,
    pub version: Option<String>,
    pub available: bool,
}

/// Check if a package manager is available in PATH
pub fn is_installed(manager: PackageManager) -> bool {
    which::which(manager.binary()).is_ok()
}

/// Check a package manager and read its version
pub fn check_tool(manager: PackageManager) -> ToolInfo {
    let Ok(path) = which::which(manager.binary()) else {
        return ToolInfo {
            manager,
            version: None,
            available: false,
        };
    };

    let version = Command::new(path)
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string());

    ToolInfo {
        manager,
        version,
        available: true,
    }
}
