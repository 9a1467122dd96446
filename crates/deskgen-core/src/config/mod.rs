//! Generator configuration: parsed flags, collected answers and the
//! immutable context threaded through every scaffolding step

pub mod answers;
pub mod generator;
pub mod options;

pub use answers::{default_project_name, slugify, Answers};
pub use generator::{GeneratorInfo, ScaffoldContext};
pub use options::Options;
