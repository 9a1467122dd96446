//! Generator identity and the scaffolding context

use super::{Answers, Options};
use crate::resolver::{resolve, ResolvedAssets};
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;

/// Name stamped into generated files
pub const GENERATOR_NAME: &str = "deskgen";

/// Name and version of the generator, stamped into the build script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInfo {
    pub name: String,
    pub version: String,
}

impl GeneratorInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Identity of this library build
    pub fn current() -> Self {
        Self::new(GENERATOR_NAME, crate::DEFAULT_CLI_VERSION)
    }
}

/// Everything a scaffolding step may read
///
/// Built once after the answers are collected and passed by reference to
/// each step. Nothing in it changes afterwards.
#[derive(Debug, Clone)]
pub struct ScaffoldContext {
    pub generator: GeneratorInfo,
    pub options: Options,
    pub answers: Answers,
    /// Root of the output tree
    pub destination: PathBuf,
    /// Date stamped into generated files
    pub date: NaiveDate,
}

impl ScaffoldContext {
    pub fn new(
        generator: GeneratorInfo,
        options: Options,
        answers: Answers,
        destination: PathBuf,
    ) -> Self {
        Self {
            generator,
            options,
            answers,
            destination,
            date: Utc::now().date_naive(),
        }
    }

    /// Fix the stamped date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Assets for the chosen starting point
    pub fn resolved(&self) -> ResolvedAssets {
        resolve(self.answers.starting_point)
    }
}
