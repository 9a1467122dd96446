//! Template source - the bundled template set or a local directory
//!
//! The bundled set is compiled into the binary. A local directory (from
//! `--template-dir` or `DESKGEN_TEMPLATE_DIR`) replaces it wholesale, which is
//! how template authors try out changes without rebuilding.

use super::manifest::TemplateManifest;
use crate::error::ScaffoldError;
use include_dir::{include_dir, Dir};
use std::path::PathBuf;

/// Environment variable overriding the bundled templates
pub const TEMPLATE_DIR_ENV: &str = "DESKGEN_TEMPLATE_DIR";

/// Name of the root manifest in every template source
pub const MANIFEST_FILE: &str = "template.yaml";

static BUNDLED: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Where template files are read from
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Bundled(&'static Dir<'static>),
    Local(PathBuf),
}

impl TemplateSource {
    /// Templates compiled into the binary
    pub fn bundled() -> Self {
        Self::Bundled(&BUNDLED)
    }

    /// Templates from a local directory
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    /// Explicit directory first, then the environment override, then the bundled set
    pub fn resolve(template_dir: Option<PathBuf>) -> Self {
        match template_dir {
            Some(path) => Self::local(path),
            None => Self::from_env(),
        }
    }

    /// Local directory from the environment, or the bundled set
    pub fn from_env() -> Self {
        match std::env::var(TEMPLATE_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::local(PathBuf::from(dir)),
            _ => Self::bundled(),
        }
    }

    /// Human-readable description for log output
    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Bundled(_) => "bundled templates".to_string(),
            TemplateSource::Local(path) => format!("local templates from {}", path.display()),
        }
    }

    /// Read a template file as bytes
    pub fn read(&self, name: &str) -> Result<Vec<u8>, ScaffoldError> {
        match self {
            TemplateSource::Bundled(dir) => dir
                .get_file(name)
                .map(|file| file.contents().to_vec())
                .ok_or_else(|| ScaffoldError::TemplateMissing(name.to_string())),
            TemplateSource::Local(root) => {
                let path = root.join(name);
                std::fs::read(&path).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => ScaffoldError::TemplateMissing(name.to_string()),
                    _ => ScaffoldError::io(path, e),
                })
            }
        }
    }

    /// Read a template file as text
    pub fn read_string(&self, name: &str) -> Result<String, ScaffoldError> {
        let bytes = self.read(name)?;
        String::from_utf8(bytes).map_err(|e| {
            ScaffoldError::io(
                name,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }

    /// Parse the root manifest
    pub fn manifest(&self) -> Result<TemplateManifest, ScaffoldError> {
        TemplateManifest::parse(&self.read_string(MANIFEST_FILE)?)
    }
}
