//! File emission sequencer
//!
//! Writes every artifact of a new project in a fixed order. Each step gets
//! only the values it needs, all taken from the immutable `ScaffoldContext`.

use crate::bower::{self, DependencyManifest};
use crate::config::ScaffoldContext;
use crate::error::ScaffoldError;
use crate::resolver::ResolvedAssets;
use crate::templates::{copy_file, ensure_dir, write_file, Renderer, TemplateManifest, TemplateSource};
use serde_json::json;
use std::path::PathBuf;

/// Empty asset directories every project starts with
const ASSET_DIRS: &[&str] = &["app/images", "app/fonts"];

/// Browser meta assets every project should carry
const REQUIRED_STATIC: &[&str] = &["app/favicon.ico", "app/apple-touch-icon.png", "app/robots.txt"];

/// Outcome of an emission run
#[derive(Debug, Default)]
pub struct EmissionReport {
    /// Files and directories written, in emission order
    pub written: Vec<PathBuf>,
    /// Optional assets that could not be copied, with the reason
    pub skipped: Vec<(String, String)>,
}

impl EmissionReport {
    fn push(&mut self, path: PathBuf) {
        self.written.push(path);
    }
}

/// Emit the whole project tree
///
/// A missing required template aborts with `ScaffoldError::TemplateMissing`,
/// leaving whatever was already written in place.
pub async fn emit_project(
    ctx: &ScaffoldContext,
    source: &TemplateSource,
) -> Result<EmissionReport, ScaffoldError> {
    let manifest = source.manifest()?;
    let resolved = ctx.resolved();
    let emitter = Emitter {
        ctx,
        source,
        manifest: &manifest,
        resolved: &resolved,
        renderer: Renderer::new(),
    };

    let mut report = EmissionReport::default();
    emitter.build_script(&mut report).await?;
    emitter.package_manifest(&mut report).await?;
    emitter.babel_config(&mut report).await?;
    emitter.git_files(&mut report).await?;
    emitter.dependency_manifest(&mut report).await?;
    emitter.editor_config(&mut report).await?;
    emitter.static_assets(&mut report).await;
    emitter.stylesheet(&mut report).await?;
    emitter.script(&mut report).await?;
    emitter.markup(&mut report).await?;
    emitter.misc(&mut report).await?;
    emitter.test_harness(&mut report).await?;

    Ok(report)
}

struct Emitter<'a> {
    ctx: &'a ScaffoldContext,
    source: &'a TemplateSource,
    manifest: &'a TemplateManifest,
    resolved: &'a ResolvedAssets,
    renderer: Renderer,
}

impl Emitter<'_> {
    async fn render_to(
        &self,
        template: &str,
        target: &str,
        data: &serde_json::Value,
        report: &mut EmissionReport,
    ) -> Result<(), ScaffoldError> {
        let rendered = self.renderer.render(self.source, template, data)?;
        report.push(write_file(&self.ctx.destination, target, rendered.as_bytes()).await?);
        Ok(())
    }

    async fn render_markup_to(
        &self,
        template: &str,
        target: &str,
        data: &serde_json::Value,
        report: &mut EmissionReport,
    ) -> Result<(), ScaffoldError> {
        let rendered = self.renderer.render_markup(self.source, template, data)?;
        report.push(write_file(&self.ctx.destination, target, rendered.as_bytes()).await?);
        Ok(())
    }

    async fn copy(
        &self,
        template: &str,
        target: &str,
        report: &mut EmissionReport,
    ) -> Result<(), ScaffoldError> {
        report.push(copy_file(self.source, template, &self.ctx.destination, target).await?);
        Ok(())
    }

    async fn build_script(&self, report: &mut EmissionReport) -> Result<(), ScaffoldError> {
        let data = json!({
            "date": self.ctx.date.format("%Y-%m-%d").to_string(),
            "name": self.ctx.generator.name,
            "version": self.ctx.generator.version,
            "includeBootstrap": self.resolved.includes_ui_framework,
            "startingPoint": self.ctx.answers.starting_point.key(),
            "includeBabel": self.ctx.options.babel,
            "includeSass": self.ctx.options.sass,
            "testFramework": self.ctx.options.test_framework,
            // Quoted JS string literal
            "deployPath": serde_json::Value::from(self.ctx.answers.deploy_path.as_str()).to_string(),
        });
        self.render_to("gulpfile.js", "gulpfile.js", &data, report).await
    }

    async fn package_manifest(&self, report: &mut EmissionReport) -> Result<(), ScaffoldError> {
        let data = json!({
            "includeBabel": self.ctx.options.babel,
            "includeBootstrap": self.resolved.includes_ui_framework,
            "includeSass": self.ctx.options.sass,
        });
        self.render_to("_package.json", "package.json", &data, report).await
    }

    async fn babel_config(&self, report: &mut EmissionReport) -> Result<(), ScaffoldError> {
        self.copy("babelrc", ".babelrc", report).await
    }

    async fn git_files(&self, report: &mut EmissionReport) -> Result<(), ScaffoldError> {
        self.copy("gitignore", ".gitignore", report).await?;
        self.copy("gitattributes", ".gitattributes", report).await
    }

    async fn dependency_manifest(&self, report: &mut EmissionReport) -> Result<(), ScaffoldError> {
        let manifest = DependencyManifest::new(self.ctx.answers.package_name(), self.resolved);
        let json = manifest.to_json()?;
        report.push(write_file(&self.ctx.destination, bower::MANIFEST_FILE, json.as_bytes()).await?);

        self.copy("bowerrc", bower::RC_FILE, report).await
    }

    async fn editor_config(&self, report: &mut EmissionReport) -> Result<(), ScaffoldError> {
        self.copy("editorconfig", ".editorconfig", report).await
    }

    /// Each asset is independent; failures are recorded, not returned
    async fn static_assets(&self, report: &mut EmissionReport) {
        for file in &self.manifest.static_files {
            let dest = file.destination();
            match copy_file(self.source, &file.source, &self.ctx.destination, dest).await {
                Ok(path) => report.push(path),
                Err(e) => report.skipped.push((dest.to_string(), e.to_string())),
            }
        }

        for dest in REQUIRED_STATIC {
            let listed = self
                .manifest
                .static_files
                .iter()
                .any(|file| file.destination() == *dest);
            if !listed {
                report.skipped.push((
                    dest.to_string(),
                    "not listed in the template manifest".to_string(),
                ));
            }
        }
    }

    async fn stylesheet(&self, report: &mut EmissionReport) -> Result<(), ScaffoldError> {
        let set = self.manifest.set(self.resolved.template_set)?;
        let target = format!("app/styles/main.{}", self.ctx.options.stylesheet_extension());
        let data = json!({
            "includeBootstrap": self.resolved.includes_ui_framework,
            "includeSass": self.ctx.options.sass,
            "startingPoint": self.ctx.answers.starting_point.key(),
        });
        self.render_to(&set.stylesheet, &target, &data, report).await
    }

    async fn script(&self, report: &mut EmissionReport) -> Result<(), ScaffoldError> {
        self.copy("main.js", "app/scripts/main.js", report).await
    }

    async fn markup(&self, report: &mut EmissionReport) -> Result<(), ScaffoldError> {
        let set = self.manifest.set(self.resolved.template_set)?;
        let (bs_path, bs_plugins) = self.resolved.plugin_paths(self.ctx.options.sass);
        let data = json!({
            "appname": self.ctx.answers.project_name,
            "startingPoint": self.ctx.answers.starting_point.key(),
            "bsPath": bs_path,
            "bsPlugins": bs_plugins,
            "includeSass": self.ctx.options.sass,
            "includeBootstrap": self.resolved.includes_ui_framework,
            "includeModernizr": true,
            "includeJQuery": self.resolved.includes_dom_utility,
        });
        self.render_markup_to(&set.markup, "app/index.html", &data, report).await
    }

    async fn misc(&self, report: &mut EmissionReport) -> Result<(), ScaffoldError> {
        self.copy("data.json", "app/data.json", report).await?;
        for dir in ASSET_DIRS {
            report.push(ensure_dir(&self.ctx.destination, dir).await?);
        }
        Ok(())
    }

    /// Test runner page and starter spec for the chosen test framework
    async fn test_harness(&self, report: &mut EmissionReport) -> Result<(), ScaffoldError> {
        let files = self.manifest.test_harness(&self.ctx.options.test_framework)?;
        for file in files {
            self.copy(&file.source, file.destination(), report).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Answers, GeneratorInfo, Options};
    use crate::resolver::StartingPoint;
    use chrono::NaiveDate;
    use std::path::Path;

    fn context(dir: &Path, starting_point: StartingPoint, options: Options) -> ScaffoldContext {
        ScaffoldContext::new(
            GeneratorInfo::new("deskgen", "0.1.0"),
            options,
            Answers::new("Acme", "", starting_point),
            dir.to_path_buf(),
        )
        .with_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    fn read(dir: &Path, file: &str) -> String {
        std::fs::read_to_string(dir.join(file)).unwrap()
    }

    #[tokio::test]
    async fn test_classic_scenario() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = context(temp.path(), StartingPoint::ClassicResponsive, Options::default());

        let report = emit_project(&ctx, &TemplateSource::bundled()).await.unwrap();
        assert!(report.skipped.is_empty(), "{:?}", report.skipped);

        let manifest = DependencyManifest::read(temp.path()).unwrap();
        assert_eq!(manifest.name, "acme");
        let keys: Vec<_> = manifest.dependencies.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["bootstrap-sass", "font-awesome", "jquery", "jquery-validation", "modernizr"]
        );

        let html = read(temp.path(), "app/index.html");
        let prefix = "/bower_components/bootstrap-sass/assets/javascripts/bootstrap/";
        let positions: Vec<usize> = resolve_names(StartingPoint::ClassicResponsive)
            .iter()
            .map(|name| {
                html.find(&format!("src=\"{}{}.js\"", prefix, name))
                    .unwrap_or_else(|| panic!("missing plugin {}", name))
            })
            .collect();
        assert_eq!(positions.len(), 12);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("<title>Acme</title>"));
        assert!(html.contains("<!-- bower:js -->"));
        assert!(html.contains("jQuery(function"));

        assert!(temp.path().join("app/styles/main.css").exists());
        assert!(!temp.path().join("app/styles/main.scss").exists());
    }

    fn resolve_names(sp: StartingPoint) -> &'static [&'static str] {
        crate::resolver::resolve(sp).plugins.unwrap().names
    }

    #[tokio::test]
    async fn test_foundation_scenario() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = context(temp.path(), StartingPoint::FoundationFive, Options::default());

        emit_project(&ctx, &TemplateSource::bundled()).await.unwrap();

        let manifest = DependencyManifest::read(temp.path()).unwrap();
        assert!(manifest.dependencies.contains_key("foundation"));
        assert!(!manifest.dependencies.contains_key("bootstrap-sass"));

        let html = read(temp.path(), "app/index.html");
        assert!(!html.contains("bootstrap-sass"));
    }

    #[tokio::test]
    async fn test_emission_order_and_tree() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = context(temp.path(), StartingPoint::ClassicResponsive, Options::default());

        let report = emit_project(&ctx, &TemplateSource::bundled()).await.unwrap();
        let written: Vec<String> = report
            .written
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(
            written,
            vec![
                "gulpfile.js",
                "package.json",
                ".babelrc",
                ".gitignore",
                ".gitattributes",
                "bower.json",
                ".bowerrc",
                ".editorconfig",
                "app/favicon.ico",
                "app/apple-touch-icon.png",
                "app/robots.txt",
                "app/styles/main.css",
                "app/scripts/main.js",
                "app/index.html",
                "app/data.json",
                "app/images",
                "app/fonts",
                "test/index.html",
                "test/spec/test.js",
                "test/bower.json",
                "test/.bowerrc",
            ]
        );
        assert!(temp.path().join("app/fonts").is_dir());
    }

    #[tokio::test]
    async fn test_emission_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = context(temp.path(), StartingPoint::ClassicResponsive, Options::default());
        let source = TemplateSource::bundled();

        let first = emit_project(&ctx, &source).await.unwrap();
        let snapshot: Vec<Vec<u8>> = first
            .written
            .iter()
            .filter(|p| p.is_file())
            .map(|p| std::fs::read(p).unwrap())
            .collect();

        let second = emit_project(&ctx, &source).await.unwrap();
        let again: Vec<Vec<u8>> = second
            .written
            .iter()
            .filter(|p| p.is_file())
            .map(|p| std::fs::read(p).unwrap())
            .collect();

        assert_eq!(first.written, second.written);
        assert_eq!(snapshot, again);
    }

    #[tokio::test]
    async fn test_sass_stylesheet_and_build_script_values() {
        let temp = tempfile::tempdir().unwrap();
        let options = Options {
            sass: true,
            babel: false,
            test_framework: "jasmine".to_string(),
            ..Options::default()
        };
        let ctx = context(temp.path(), StartingPoint::BootstrapFour, options);

        emit_project(&ctx, &TemplateSource::bundled()).await.unwrap();

        let scss = read(temp.path(), "app/styles/main.scss");
        assert!(scss.contains("// bower:scss"));
        assert!(!temp.path().join("app/styles/main.css").exists());

        let gulpfile = read(temp.path(), "gulpfile.js");
        assert!(gulpfile.contains("2024-03-01"));
        assert!(gulpfile.contains("deskgen 0.1.0"));
        assert!(gulpfile.contains("jasmine"));
        assert!(gulpfile.contains("bootStrapFour"));
        assert!(!gulpfile.contains("babel"));

        // Source-form plugin directory and no pinned DOM utility
        let html = read(temp.path(), "app/index.html");
        assert!(html.contains("/bower_components/bootstrap/js/src/util.js"));
        assert!(!html.contains("jQuery(function"));

        assert!(read(temp.path(), "test/index.html").contains("Jasmine Spec Runner"));
        assert!(read(temp.path(), "test/bower.json").contains("jasmine-core"));
    }

    #[tokio::test]
    async fn test_mocha_harness_by_default() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = context(temp.path(), StartingPoint::FoundationFive, Options::default());

        emit_project(&ctx, &TemplateSource::bundled()).await.unwrap();

        assert!(read(temp.path(), "test/index.html").contains("mocha.setup('bdd')"));
        assert!(read(temp.path(), "test/spec/test.js").contains("describe("));
        assert!(read(temp.path(), "test/bower.json").contains("\"chai\""));
        assert!(temp.path().join("test/.bowerrc").is_file());
    }

    #[tokio::test]
    async fn test_unknown_test_framework_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let options = Options {
            test_framework: "qunit".to_string(),
            ..Options::default()
        };
        let ctx = context(temp.path(), StartingPoint::ClassicResponsive, options);

        let err = emit_project(&ctx, &TemplateSource::bundled()).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateMissing(name) if name == "test/qunit"));

        // Earlier steps stay on disk
        assert!(temp.path().join("app/index.html").is_file());
        assert!(!temp.path().join("test").exists());
    }

    #[tokio::test]
    async fn test_user_values_are_escaped() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = ScaffoldContext::new(
            GeneratorInfo::new("deskgen", "0.1.0"),
            Options::default(),
            Answers::new("Tom & <Jerry>", "it's/dist", StartingPoint::ClassicResponsive),
            temp.path().to_path_buf(),
        );

        emit_project(&ctx, &TemplateSource::bundled()).await.unwrap();

        let html = read(temp.path(), "app/index.html");
        assert!(html.contains("<title>Tom &amp; &lt;Jerry&gt;</title>"));
        assert!(!html.contains("<Jerry>"));

        let gulpfile = read(temp.path(), "gulpfile.js");
        assert!(gulpfile.contains("const deployPath = \"it's/dist\";"));
    }

    #[tokio::test]
    async fn test_empty_deploy_path_is_falsy_literal() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = context(temp.path(), StartingPoint::ClassicResponsive, Options::default());

        emit_project(&ctx, &TemplateSource::bundled()).await.unwrap();

        assert!(read(temp.path(), "gulpfile.js").contains("const deployPath = \"\";"));
    }

    #[tokio::test]
    async fn test_unlisted_static_assets_are_reported() {
        let temp = tempfile::tempdir().unwrap();
        let templates = temp.path().join("templates");
        copy_bundled_to(&templates);

        let mut manifest = TemplateManifest::parse(
            &std::fs::read_to_string(templates.join("template.yaml")).unwrap(),
        )
        .unwrap();
        manifest.static_files.clear();
        std::fs::write(
            templates.join("template.yaml"),
            serde_yaml::to_string(&manifest).unwrap(),
        )
        .unwrap();

        let out = temp.path().join("out");
        let ctx = context(&out, StartingPoint::ClassicResponsive, Options::default());
        let report = emit_project(&ctx, &TemplateSource::local(templates))
            .await
            .unwrap();

        let skipped: Vec<&str> = report.skipped.iter().map(|(dest, _)| dest.as_str()).collect();
        assert_eq!(skipped, REQUIRED_STATIC.to_vec());
        assert!(out.join("app/index.html").exists());
    }

    #[tokio::test]
    async fn test_missing_template_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let templates = temp.path().join("templates");
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(
            templates.join("template.yaml"),
            "name: t\nversion: 0.1.0\nsets: {}\n",
        )
        .unwrap();
        let out = temp.path().join("out");
        let ctx = context(&out, StartingPoint::ClassicResponsive, Options::default());

        let err = emit_project(&ctx, &TemplateSource::local(templates))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateMissing(name) if name == "gulpfile.js"));
    }

    #[tokio::test]
    async fn test_missing_static_asset_is_skipped() {
        let temp = tempfile::tempdir().unwrap();
        let templates = temp.path().join("templates");
        copy_bundled_to(&templates);
        std::fs::remove_file(templates.join("favicon.ico")).unwrap();

        let out = temp.path().join("out");
        let ctx = context(&out, StartingPoint::FoundationFive, Options::default());
        let report = emit_project(&ctx, &TemplateSource::local(templates))
            .await
            .unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "app/favicon.ico");
        assert!(out.join("app/robots.txt").exists());
        assert!(out.join("app/index.html").exists());
    }

    fn copy_bundled_to(target: &Path) {
        let TemplateSource::Bundled(dir) = TemplateSource::bundled() else {
            unreachable!()
        };
        std::fs::create_dir_all(target).unwrap();
        dir.extract(target).unwrap();
    }
}
