//! Post-install wiring of front-end dependencies
//!
//! Reads back the generated `bower.json`, resolves what the installer put on
//! disk and rewrites the marker blocks of the generated page and, with Sass
//! enabled, of the stylesheets. The two passes are independent: a failure in
//! the stylesheet pass leaves the page pass in place.

pub mod components;
pub mod inject;

pub use components::{resolve_components, Component, ResolvedComponents};
pub use inject::{relative_path, BlockStyle, Injection};

use crate::bower::{BowerRc, DependencyManifest};
use crate::config::Options;
use crate::error::ScaffoldError;
use crate::install::{skipped_install_message, PackageManager};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Generated page, relative to the project root
pub const PAGE: &str = "app/index.html";

/// Directory holding the stylesheets, relative to the project root
pub const STYLES_DIR: &str = "app/styles";

/// Packages wired by hand in the page template, so they can load after the framework
pub const PAGE_EXCLUDES: &[&str] = &["bootstrap-sass", "bootstrap.js"];

/// What the wiring step did
#[derive(Debug)]
pub enum WireOutcome {
    /// Installation was skipped; the user gets instructions instead
    Skipped { message: String },
    Wired(WireReport),
}

/// Files rewritten and problems seen
#[derive(Debug, Default)]
pub struct WireReport {
    /// Rewritten files with the number of references injected into each
    pub files: Vec<(PathBuf, usize)>,
    pub warnings: Vec<String>,
}

/// Final step of a run: wire dependencies, or explain how to when nothing was installed
pub fn finish(options: &Options, project_dir: &Path) -> Result<WireOutcome, ScaffoldError> {
    if options.skip_install {
        return Ok(WireOutcome::Skipped {
            message: skipped_install_message(PackageManager::detect_script_manager()),
        });
    }

    wire_project(project_dir, options.sass).map(WireOutcome::Wired)
}

/// Inject installed dependencies into the page and, with `sass`, the stylesheets
pub fn wire_project(project_dir: &Path, sass: bool) -> Result<WireReport, ScaffoldError> {
    let manifest = DependencyManifest::read(project_dir)?;
    let rc = BowerRc::read(project_dir)?;
    let resolved = resolve_components(project_dir, &manifest, &rc)?;

    let mut report = WireReport {
        warnings: resolved.warnings.clone(),
        ..WireReport::default()
    };

    let page = Injection {
        style: BlockStyle::Html,
        file_dir: Path::new("app"),
        excludes: PAGE_EXCLUDES,
    };
    let count = rewrite(&project_dir.join(PAGE), &page, &resolved)?;
    report.files.push((project_dir.join(PAGE), count));

    if sass {
        let styles = Injection {
            style: BlockStyle::Scss,
            file_dir: Path::new(STYLES_DIR),
            excludes: &[],
        };
        match stylesheets(&project_dir.join(STYLES_DIR)) {
            Ok(sheets) => {
                for sheet in sheets {
                    match rewrite(&sheet, &styles, &resolved) {
                        Ok(count) => report.files.push((sheet, count)),
                        Err(e) => report.warnings.push(e.to_string()),
                    }
                }
            }
            Err(e) => report.warnings.push(e.to_string()),
        }
    }

    Ok(report)
}

fn rewrite(
    path: &Path,
    injection: &Injection<'_>,
    resolved: &ResolvedComponents,
) -> Result<usize, ScaffoldError> {
    let content = std::fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
    let (rewritten, count) = injection.apply(&content, resolved);
    if rewritten != content {
        std::fs::write(path, rewritten).map_err(|e| ScaffoldError::io(path, e))?;
    }
    Ok(count)
}

/// `*.scss` files directly inside the styles directory, sorted by name
fn stylesheets(dir: &Path) -> Result<Vec<PathBuf>, ScaffoldError> {
    let mut sheets = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            ScaffoldError::io(path, e.into())
        })?;
        let is_scss = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("scss"));
        if entry.file_type().is_file() && is_scss {
            sheets.push(entry.into_path());
        }
    }
    Ok(sheets)
}
