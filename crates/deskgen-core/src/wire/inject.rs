//! Marker-block injection
//!
//! Rewrites everything between an opening `bower:<type>` marker and the next
//! `endbower` marker with one reference per installed file of that type.

use super::components::ResolvedComponents;
use regex::{Captures, Regex};
use std::path::{Component as PathComponent, Path};
use std::sync::LazyLock;

static HTML_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([ \t]*)(<!--\s*bower:*(\S*?)\s*-->)(?s:.*?)(<!--\s*endbower\s*-->)")
        .expect("valid html block pattern")
});

static SCSS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([ \t]*)(//\s*bower:*(\S*))(?s:.*?)(//\s*endbower)")
        .expect("valid scss block pattern")
});

/// Leading `../` runs collapse to a root-relative path
static HTML_IGNORE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\.\./)*\.\.").expect("valid ignore pattern"));

/// Leading `../` runs are dropped
static SCSS_IGNORE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\.\./)+").expect("valid ignore pattern"));

/// Kind of file being rewritten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    Html,
    Scss,
}

impl BlockStyle {
    fn block(&self) -> &'static Regex {
        match self {
            BlockStyle::Html => &HTML_BLOCK,
            BlockStyle::Scss => &SCSS_BLOCK,
        }
    }

    fn ignore_path(&self) -> &'static Regex {
        match self {
            BlockStyle::Html => &HTML_IGNORE_PATH,
            BlockStyle::Scss => &SCSS_IGNORE_PATH,
        }
    }

    /// Reference line for a file of `kind`, or None when the style has no form for it
    fn reference(&self, kind: &str, path: &str) -> Option<String> {
        match (self, kind) {
            (BlockStyle::Html, "js") => Some(format!("<script src=\"{}\"></script>", path)),
            (BlockStyle::Html, "css") => Some(format!("<link rel=\"stylesheet\" href=\"{}\" />", path)),
            (BlockStyle::Scss, "scss" | "css") => Some(format!("@import \"{}\";", path)),
            (BlockStyle::Scss, "sass") => Some(format!("@import {}", path)),
            _ => None,
        }
    }
}

/// What to inject into one file
pub struct Injection<'a> {
    pub style: BlockStyle,
    /// Directory of the file being rewritten, relative to the project root
    pub file_dir: &'a Path,
    /// Path fragments or package names that must never be injected
    pub excludes: &'a [&'a str],
}

impl Injection<'_> {
    /// References for one block type, in load order
    fn references(&self, kind: &str, components: &ResolvedComponents) -> Vec<String> {
        components
            .files_of_type(kind)
            .filter(|(name, file)| !self.is_excluded(name, file))
            .filter_map(|(_, file)| {
                let relative = relative_path(self.file_dir, Path::new(file));
                let path = self.style.ignore_path().replace(&relative, "");
                self.style.reference(kind, &path)
            })
            .collect()
    }

    fn is_excluded(&self, component: &str, file: &str) -> bool {
        self.excludes
            .iter()
            .any(|pattern| component == *pattern || file.contains(pattern))
    }

    /// Rewrite every marker block in `content`; returns the new content and
    /// the number of references written
    pub fn apply(&self, content: &str, components: &ResolvedComponents) -> (String, usize) {
        let line_ending = if content.contains("\r\n") { "\r\n" } else { "\n" };
        let mut injected = 0;

        let rewritten = self.style.block().replace_all(content, |caps: &Captures| {
            let indent = &caps[1];
            let kind = caps[3].to_ascii_lowercase();
            let references = self.references(&kind, components);
            injected += references.len();

            let mut block = format!("{}{}{}", indent, &caps[2], line_ending);
            for reference in references {
                block.push_str(indent);
                block.push_str(&reference);
                block.push_str(line_ending);
            }
            block.push_str(indent);
            block.push_str(&caps[4]);
            block
        });

        (rewritten.into_owned(), injected)
    }
}

/// `/`-separated path from directory `from` to `to`; both relative to the same root
pub fn relative_path(from: &Path, to: &Path) -> String {
    let from: Vec<_> = normal_components(from);
    let to: Vec<_> = normal_components(to);
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = std::iter::repeat("..".to_string())
        .take(from.len() - common)
        .collect();
    parts.extend(to[common..].iter().cloned());
    parts.join("/")
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            PathComponent::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}
