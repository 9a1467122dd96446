//! Error types for scaffolding operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the core scaffolding operations
///
/// Orchestration code wraps these in `anyhow` with context; callers that need
/// to tell a missing optional asset from a real failure match on the variant.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A template file the emission step needs is not in the template set
    #[error("template '{0}' not found in template set")]
    TemplateMissing(String),

    /// A template failed to render
    #[error("failed to render template '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON manifest (bower.json, .bowerrc, installed package metadata) is malformed
    #[error("invalid manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The root template.yaml is malformed
    #[error("invalid template manifest: {0}")]
    TemplateManifest(#[from] serde_yaml::Error),

    /// A starting point key that is not one of the four known variants
    #[error("unknown starting point '{0}' (expected one of: bootStrap, foundationFive, bootStrapFour, foundationSix)")]
    UnknownStartingPoint(String),

    /// The template manifest does not describe a set the resolver asked for
    #[error("template set '{0}' is not described in template.yaml")]
    UnknownTemplateSet(String),
}

impl ScaffoldError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::Io {
            path: path.into(),
            source,
        }
    }
}
