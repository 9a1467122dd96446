//! Installed front-end components and their load order

use crate::bower::{read_json, BowerRc, DependencyManifest, MainFiles};
use crate::error::ScaffoldError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Metadata files checked in an installed package, in order
const META_FILES: &[&str] = &[".bower.json", "bower.json", "package.json"];

#[derive(Debug, Default, Deserialize)]
struct PackageMeta {
    #[serde(default)]
    main: Option<MainFiles>,
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
}

/// An installed package and the files it asks to be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    /// Main files relative to the project root, `/`-separated
    pub files: Vec<String>,
}

/// Components in load order plus anything worth telling the user
#[derive(Debug, Default)]
pub struct ResolvedComponents {
    pub components: Vec<Component>,
    pub warnings: Vec<String>,
}

impl ResolvedComponents {
    /// Files with the given extension, in load order, as `(component, path)`
    pub fn files_of_type<'a>(&'a self, ext: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.components.iter().flat_map(move |c| {
            c.files
                .iter()
                .filter(move |f| extension(f).is_some_and(|e| e.eq_ignore_ascii_case(ext)))
                .map(move |f| (c.name.as_str(), f.as_str()))
        })
    }
}

fn extension(file: &str) -> Option<&str> {
    Path::new(file).extension().and_then(|e| e.to_str())
}

/// Resolve every declared dependency, dependencies before dependents
pub fn resolve_components(
    project_dir: &Path,
    manifest: &DependencyManifest,
    rc: &BowerRc,
) -> Result<ResolvedComponents, ScaffoldError> {
    let mut resolver = Resolver {
        project_dir,
        components_dir: PathBuf::from(&rc.directory),
        manifest,
        visited: HashSet::new(),
        visiting: HashSet::new(),
        cache: HashMap::new(),
        out: ResolvedComponents::default(),
    };

    for name in manifest.dependencies.keys() {
        resolver.visit(name)?;
    }

    Ok(resolver.out)
}

struct Resolver<'a> {
    project_dir: &'a Path,
    /// Components directory relative to the project root
    components_dir: PathBuf,
    manifest: &'a DependencyManifest,
    visited: HashSet<String>,
    visiting: HashSet<String>,
    cache: HashMap<String, Option<PackageMeta>>,
    out: ResolvedComponents,
}

impl Resolver<'_> {
    fn visit(&mut self, name: &str) -> Result<(), ScaffoldError> {
        if self.visited.contains(name) || !self.visiting.insert(name.to_string()) {
            return Ok(());
        }

        let Some((main, dependencies)) = self.load(name)? else {
            self.out.warnings.push(format!(
                "{} is not installed. Try running `bower install`.",
                name
            ));
            self.finish(name);
            return Ok(());
        };

        for dep in &dependencies {
            self.visit(dep)?;
        }

        let package_dir = self.components_dir.join(name);
        let mut files = Vec::new();
        for file in &main {
            let relative = package_dir.join(file.trim_start_matches("./"));
            if self.project_dir.join(&relative).is_file() {
                files.push(to_slash(&relative));
            } else {
                self.out.warnings.push(format!(
                    "{} declares main file {} which does not exist",
                    name, file
                ));
            }
        }
        if main.is_empty() {
            self.out
                .warnings
                .push(format!("{} was not injected, it declares no main file", name));
        }

        self.out.components.push(Component {
            name: name.to_string(),
            files,
        });
        self.finish(name);
        Ok(())
    }

    fn finish(&mut self, name: &str) {
        self.visiting.remove(name);
        self.visited.insert(name.to_string());
    }

    /// Main files and dependency names, with project overrides applied
    fn load(&mut self, name: &str) -> Result<Option<(Vec<String>, Vec<String>)>, ScaffoldError> {
        if !self.cache.contains_key(name) {
            let meta = self.read_meta(name)?;
            self.cache.insert(name.to_string(), meta);
        }
        let Some(Some(meta)) = self.cache.get(name) else {
            return Ok(None);
        };

        let overrides = self.manifest.override_for(name);
        let main = overrides
            .and_then(|o| o.main.as_ref())
            .or(meta.main.as_ref())
            .map(MainFiles::to_vec)
            .unwrap_or_default();
        let dependencies = overrides
            .and_then(|o| o.dependencies.as_ref())
            .unwrap_or(&meta.dependencies)
            .keys()
            .cloned()
            .collect();

        Ok(Some((main, dependencies)))
    }

    fn read_meta(&self, name: &str) -> Result<Option<PackageMeta>, ScaffoldError> {
        let package_dir = self.project_dir.join(&self.components_dir).join(name);
        if !package_dir.is_dir() {
            return Ok(None);
        }

        for meta_file in META_FILES {
            let path = package_dir.join(meta_file);
            if path.is_file() {
                return read_json(&path).map(Some);
            }
        }

        // Installed but undescribed; only overrides can name its files
        Ok(Some(PackageMeta::default()))
    }
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bower::PackageOverride;

    fn install_package(root: &Path, name: &str, meta: &str, files: &[&str]) {
        let dir = root.join("bower_components").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(".bower.json"), meta).unwrap();
        for file in files {
            let path = dir.join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "").unwrap();
        }
    }

    fn manifest(deps: &[&str]) -> DependencyManifest {
        DependencyManifest {
            name: "acme".to_string(),
            private: true,
            dependencies: deps.iter().map(|d| (d.to_string(), "*".to_string())).collect(),
            overrides: None,
            resolutions: None,
        }
    }

    #[test]
    fn test_dependencies_load_first() {
        let temp = tempfile::tempdir().unwrap();
        install_package(
            temp.path(),
            "a-plugin",
            r#"{ "main": "dist/plugin.js", "dependencies": { "jquery": "~1.9.1" } }"#,
            &["dist/plugin.js"],
        );
        install_package(temp.path(), "jquery", r#"{ "main": "jquery.js" }"#, &["jquery.js"]);

        let resolved =
            resolve_components(temp.path(), &manifest(&["a-plugin", "jquery"]), &BowerRc::default())
                .unwrap();
        let names: Vec<_> = resolved.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["jquery", "a-plugin"]);
        assert_eq!(
            resolved.components[1].files,
            vec!["bower_components/a-plugin/dist/plugin.js"]
        );
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_missing_package_is_reported() {
        let temp = tempfile::tempdir().unwrap();
        let resolved =
            resolve_components(temp.path(), &manifest(&["modernizr"]), &BowerRc::default()).unwrap();
        assert!(resolved.components.is_empty());
        assert!(resolved.warnings[0].contains("modernizr is not installed"));
    }

    #[test]
    fn test_override_replaces_main() {
        let temp = tempfile::tempdir().unwrap();
        install_package(
            temp.path(),
            "font-awesome",
            r#"{ "main": ["less/font-awesome.less"] }"#,
            &["css/font-awesome.css"],
        );
        let mut manifest = manifest(&["font-awesome"]);
        manifest.overrides = Some(BTreeMap::from([(
            "font-awesome".to_string(),
            PackageOverride {
                main: Some(MainFiles::One("./css/font-awesome.css".to_string())),
                dependencies: None,
            },
        )]));

        let resolved = resolve_components(temp.path(), &manifest, &BowerRc::default()).unwrap();
        let css: Vec<_> = resolved.files_of_type("css").collect();
        assert_eq!(
            css,
            vec![("font-awesome", "bower_components/font-awesome/css/font-awesome.css")]
        );
    }

    #[test]
    fn test_dependency_cycle_terminates() {
        let temp = tempfile::tempdir().unwrap();
        install_package(temp.path(), "a", r#"{ "main": "a.js", "dependencies": { "b": "*" } }"#, &["a.js"]);
        install_package(temp.path(), "b", r#"{ "main": "b.js", "dependencies": { "a": "*" } }"#, &["b.js"]);

        let resolved =
            resolve_components(temp.path(), &manifest(&["a"]), &BowerRc::default()).unwrap();
        let names: Vec<_> = resolved.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
