//! Handlebars rendering of templated files

use super::source::TemplateSource;
use crate::error::ScaffoldError;
use handlebars::Handlebars;
use serde::Serialize;

/// Renders template files from a source
///
/// Code files (build script, manifests, stylesheets) render verbatim; pages
/// render with HTML escaping of substituted values.
pub struct Renderer {
    code: Handlebars<'static>,
    markup: Handlebars<'static>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        let mut code = Handlebars::new();
        code.register_escape_fn(handlebars::no_escape);

        Self {
            code,
            markup: Handlebars::new(),
        }
    }

    /// Render template text with the given data, without escaping
    pub fn render_str<T: Serialize>(
        &self,
        name: &str,
        template: &str,
        data: &T,
    ) -> Result<String, ScaffoldError> {
        render_with(&self.code, name, template, data)
    }

    /// Render page text with the given data, HTML-escaping every value
    pub fn render_markup_str<T: Serialize>(
        &self,
        name: &str,
        template: &str,
        data: &T,
    ) -> Result<String, ScaffoldError> {
        render_with(&self.markup, name, template, data)
    }

    /// Read a template from the source and render it
    pub fn render<T: Serialize>(
        &self,
        source: &TemplateSource,
        name: &str,
        data: &T,
    ) -> Result<String, ScaffoldError> {
        let template = source.read_string(name)?;
        self.render_str(name, &template, data)
    }

    /// Read a page template from the source and render it with escaping
    pub fn render_markup<T: Serialize>(
        &self,
        source: &TemplateSource,
        name: &str,
        data: &T,
    ) -> Result<String, ScaffoldError> {
        let template = source.read_string(name)?;
        self.render_markup_str(name, &template, data)
    }
}

fn render_with<T: Serialize>(
    handlebars: &Handlebars<'static>,
    name: &str,
    template: &str,
    data: &T,
) -> Result<String, ScaffoldError> {
    handlebars
        .render_template(template, data)
        .map_err(|e| ScaffoldError::Render {
            name: name.to_string(),
            source: Box::new(e),
        })
}
