//! Writing template output into the project tree

use super::source::TemplateSource;
use crate::error::ScaffoldError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Write bytes to `target` under `root`, creating parent directories
///
/// An existing file is replaced.
pub async fn write_file(root: &Path, target: &str, content: &[u8]) -> Result<PathBuf, ScaffoldError> {
    let target_path = root.join(target);
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ScaffoldError::io(parent, e))?;
    }

    fs::write(&target_path, content)
        .await
        .map_err(|e| ScaffoldError::io(&target_path, e))?;

    Ok(target_path)
}

/// Copy a template file verbatim
pub async fn copy_file(
    source: &TemplateSource,
    template: &str,
    root: &Path,
    target: &str,
) -> Result<PathBuf, ScaffoldError> {
    let content = source.read(template)?;
    write_file(root, target, &content).await
}

/// Create a directory under `root`; an existing one is fine
pub async fn ensure_dir(root: &Path, dir: &str) -> Result<PathBuf, ScaffoldError> {
    let path = root.join(dir);
    fs::create_dir_all(&path)
        .await
        .map_err(|e| ScaffoldError::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_parents_and_overwrites() {
        let temp = tempfile::tempdir().unwrap();

        let path = write_file(temp.path(), "app/styles/main.css", b"a").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"a");

        write_file(temp.path(), "app/styles/main.css", b"b").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"b");
    }

    #[tokio::test]
    async fn test_copy_missing_template() {
        let temp = tempfile::tempdir().unwrap();
        let source = TemplateSource::local(temp.path().join("templates"));

        let err = copy_file(&source, "gitignore", temp.path(), ".gitignore")
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateMissing(_)));
        assert!(!temp.path().join(".gitignore").exists());
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        ensure_dir(temp.path(), "app/images").await.unwrap();
        ensure_dir(temp.path(), "app/images").await.unwrap();
        assert!(temp.path().join("app/images").is_dir());
    }
}
