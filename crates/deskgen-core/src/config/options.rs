//! Generator options parsed from the command line

/// Test framework used when none is given
pub const DEFAULT_TEST_FRAMEWORK: &str = "mocha";

/// Flags that shape what gets generated and whether dependencies are installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Skip the welcome banner
    pub skip_welcome_message: bool,

    /// Skip the notice printed before dependencies are installed
    pub skip_install_message: bool,

    /// Skip both install passes (and therefore the wiring step)
    pub skip_install: bool,

    /// Test framework name written into the build script
    pub test_framework: String,

    /// Build script uses the Babel transpile step
    pub babel: bool,

    /// Use the Sass preprocessor for the skeleton stylesheet
    pub sass: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            skip_welcome_message: false,
            skip_install_message: false,
            skip_install: false,
            test_framework: DEFAULT_TEST_FRAMEWORK.to_string(),
            babel: true,
            sass: false,
        }
    }
}

impl Options {
    /// File extension of the skeleton stylesheet
    pub fn stylesheet_extension(&self) -> &'static str {
        if self.sass {
            "scss"
        } else {
            "css"
        }
    }
}
