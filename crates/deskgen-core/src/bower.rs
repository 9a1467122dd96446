//! Front-end dependency manifest (`bower.json`) and installer config (`.bowerrc`)
//!
//! The manifest is written during emission and read back by the wirer, so the
//! reader accepts exactly what the writer produces: optional sections that
//! were not needed are simply absent.

use crate::error::ScaffoldError;
use crate::resolver::ResolvedAssets;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const MANIFEST_FILE: &str = "bower.json";
pub const RC_FILE: &str = ".bowerrc";
pub const DEFAULT_DIRECTORY: &str = "bower_components";

/// Per-package override of what the installed package declares
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<MainFiles>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<BTreeMap<String, String>>,
}

/// `main` is either a single path or a list of paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MainFiles {
    One(String),
    Many(Vec<String>),
}

impl MainFiles {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            MainFiles::One(file) => vec![file.clone()],
            MainFiles::Many(files) => files.clone(),
        }
    }
}

/// The generated `bower.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    pub name: String,

    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<BTreeMap<String, PackageOverride>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolutions: Option<BTreeMap<String, String>>,
}

impl DependencyManifest {
    /// Build the manifest for a project
    pub fn new(package_name: impl Into<String>, resolved: &ResolvedAssets) -> Self {
        Self {
            name: package_name.into(),
            private: true,
            dependencies: resolved.dependencies.clone(),
            overrides: None,
            resolutions: None,
        }
    }

    /// Override declared for a package, if any
    pub fn override_for(&self, package: &str) -> Option<&PackageOverride> {
        self.overrides.as_ref().and_then(|o| o.get(package))
    }

    /// Serialize as the file is written (pretty JSON, trailing newline)
    pub fn to_json(&self) -> Result<String, ScaffoldError> {
        let mut json = serde_json::to_string_pretty(self).map_err(|source| {
            ScaffoldError::Manifest {
                path: MANIFEST_FILE.into(),
                source,
            }
        })?;
        json.push('\n');
        Ok(json)
    }

    /// Read the manifest from a project directory
    pub fn read(project_dir: &Path) -> Result<Self, ScaffoldError> {
        read_json(&project_dir.join(MANIFEST_FILE))
    }
}

/// The parts of `.bowerrc` the wirer cares about
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BowerRc {
    #[serde(default = "default_directory")]
    pub directory: String,
}

fn default_directory() -> String {
    DEFAULT_DIRECTORY.to_string()
}

impl Default for BowerRc {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

impl BowerRc {
    /// Read `.bowerrc`, falling back to defaults when the file does not exist
    pub fn read(project_dir: &Path) -> Result<Self, ScaffoldError> {
        let path = project_dir.join(RC_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        read_json(&path)
    }
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ScaffoldError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| ScaffoldError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}
