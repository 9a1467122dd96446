//! Template manifest types and parsing

use crate::error::ScaffoldError;
use crate::resolver::TemplateSet;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A static asset copied as-is; a missing one does not stop emission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticFile {
    /// Source path relative to the template root
    pub source: String,

    /// Destination path in the project (defaults to source if not specified)
    #[serde(default)]
    pub dest: Option<String>,
}

impl StaticFile {
    /// Get the destination path (falls back to source if dest not specified)
    pub fn destination(&self) -> &str {
        self.dest.as_deref().unwrap_or(&self.source)
    }
}

/// Page and stylesheet templates of one starting-point family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetFiles {
    #[serde(default)]
    pub description: String,

    /// Skeleton page template
    pub markup: String,

    /// Skeleton stylesheet template
    pub stylesheet: String,
}

/// Root template manifest (templates/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Oldest CLI version the templates are written for
    pub version: String,

    /// Browser meta assets copied into the app directory
    #[serde(default)]
    pub static_files: Vec<StaticFile>,

    /// Template files per set, keyed by set directory name
    pub sets: BTreeMap<String, SetFiles>,

    /// Test harness files per test framework name
    #[serde(default)]
    pub test_harnesses: BTreeMap<String, Vec<StaticFile>>,
}

impl TemplateManifest {
    pub fn parse(content: &str) -> Result<Self, ScaffoldError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Files of the set the resolver picked
    pub fn set(&self, set: TemplateSet) -> Result<&SetFiles, ScaffoldError> {
        self.sets
            .get(set.dir_name())
            .ok_or_else(|| ScaffoldError::UnknownTemplateSet(set.dir_name().to_string()))
    }

    /// Files scaffolding the harness of `framework` (matched case-insensitively)
    pub fn test_harness(&self, framework: &str) -> Result<&[StaticFile], ScaffoldError> {
        let key = framework.trim().to_ascii_lowercase();
        self.test_harnesses
            .get(&key)
            .map(Vec::as_slice)
            .ok_or_else(|| ScaffoldError::TemplateMissing(format!("test/{}", key)))
    }

    /// Warning text when the CLI is older than the templates expect
    ///
    /// Unparseable versions on either side yield no warning.
    pub fn compatibility_warning(&self, cli_version: &str, upgrade_command: &str) -> Option<String> {
        let cli = parse_version(cli_version)?;
        let required = parse_version(&self.version)?;

        (cli < required).then(|| {
            format!(
                "These templates were written for deskgen {} or newer, you are running {}. \
                 Consider updating: {}",
                required, cli, upgrade_command
            )
        })
    }
}

fn parse_version(version: &str) -> Option<Version> {
    Version::parse(version.strip_prefix('v').unwrap_or(version)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
name: desk-theme
version: 0.2.0
static_files:
  - source: robots.txt
    dest: app/robots.txt
  - source: humans.txt
sets:
  v5:
    markup: v5/index.html
    stylesheet: v5/main.css
test_harnesses:
  mocha:
    - source: test/mocha/index.html
      dest: test/index.html
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = TemplateManifest::parse(MANIFEST).unwrap();
        assert_eq!(manifest.static_files[0].destination(), "app/robots.txt");
        assert_eq!(manifest.static_files[1].destination(), "humans.txt");
        assert_eq!(
            manifest.set(TemplateSet::Bootstrap).unwrap().markup,
            "v5/index.html"
        );
        assert!(matches!(
            manifest.set(TemplateSet::Foundation),
            Err(ScaffoldError::UnknownTemplateSet(_))
        ));
    }

    #[test]
    fn test_harness_lookup() {
        let manifest = TemplateManifest::parse(MANIFEST).unwrap();
        let files = manifest.test_harness("Mocha").unwrap();
        assert_eq!(files[0].destination(), "test/index.html");
        assert!(matches!(
            manifest.test_harness("qunit"),
            Err(ScaffoldError::TemplateMissing(name)) if name == "test/qunit"
        ));
    }

    #[test]
    fn test_cli_older_than_templates() {
        let manifest = TemplateManifest::parse(MANIFEST).unwrap();
        let warning = manifest.compatibility_warning("0.1.0", "cargo install deskgen --force");
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_or_newer() {
        let manifest = TemplateManifest::parse(MANIFEST).unwrap();
        assert!(manifest.compatibility_warning("0.2.0", "x").is_none());
        assert!(manifest.compatibility_warning("v1.0.0", "x").is_none());
    }

    #[test]
    fn test_invalid_versions_skip_warning() {
        let manifest = TemplateManifest::parse(MANIFEST).unwrap();
        assert!(manifest.compatibility_warning("dev", "x").is_none());
    }
}
