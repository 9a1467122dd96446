//! Template reading, rendering and copying
//!
//! This module provides:
//! - The root template manifest (template.yaml)
//! - Template sources: the bundled set or a local directory
//! - Handlebars rendering for templated files
//! - Writers that place template output into the project tree

pub mod copier;
pub mod manifest;
pub mod render;
pub mod source;

pub use copier::{copy_file, ensure_dir, write_file};
pub use manifest::{SetFiles, StaticFile, TemplateManifest};
pub use render::Renderer;
pub use source::TemplateSource;
