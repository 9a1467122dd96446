//! deskgen Core - Shared library for scaffolding Desk theme projects
//!
//! This library provides the core functionality for scaffolding a Desk theme
//! project: resolving the chosen framework starting point, emitting the
//! boilerplate tree, running the package managers and wiring the installed
//! front-end packages into the generated page.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - The starting-point resolver, template
//!   rendering, dependency manifest types, the package-manager runner and the
//!   marker-based dependency wirer
//! - **Layer 2: Workflow Orchestration** - `ScaffoldContext` threaded through
//!   the file emission sequencer
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use deskgen_core::{emit, install, wire, Answers, GeneratorInfo, Options, ScaffoldContext, StartingPoint};
//! use deskgen_core::templates::TemplateSource;
//!
//! let answers = Answers::new("Acme", "", StartingPoint::ClassicResponsive);
//! let ctx = ScaffoldContext::new(GeneratorInfo::current(), Options::default(), answers, dir);
//! let source = TemplateSource::from_env();
//!
//! emit::emit_project(&ctx, &source).await?;
//! install::install_dependencies(&ctx.options, &ctx.destination).await;
//! wire::wire_project(&ctx.destination, ctx.options.sass)?;
//! ```

pub mod bower;
pub mod config;
pub mod emit;
pub mod error;
pub mod install;
pub mod resolver;
pub mod templates;
pub mod wire;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Answers, GeneratorInfo, Options, ScaffoldContext};
pub use error::ScaffoldError;
pub use resolver::{resolve, PluginSet, ResolvedAssets, StartingPoint, TemplateSet};

#[cfg(feature = "tui")]
pub use tui::run;

/// CLI version - used for template compatibility checking
/// The binary passes its own version, this is the fallback
pub const DEFAULT_CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
