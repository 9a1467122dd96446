//! Answers collected from the user

use crate::resolver::StartingPoint;
use std::path::Path;

/// What the user chose; fixed once collected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub project_name: String,
    /// Path of the hosted site files, may be empty
    pub deploy_path: String,
    pub starting_point: StartingPoint,
}

impl Answers {
    pub fn new(
        project_name: impl Into<String>,
        deploy_path: impl Into<String>,
        starting_point: StartingPoint,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            deploy_path: deploy_path.into(),
            starting_point,
        }
    }

    /// Package name for the dependency manifest
    pub fn package_name(&self) -> String {
        slugify(&self.project_name)
    }
}

/// Default project name: the destination directory's name
pub fn default_project_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "desk-theme".to_string())
}

/// Lowercase, ASCII alphanumerics separated by single dashes
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
        // anything else is dropped
    }

    slug
}
