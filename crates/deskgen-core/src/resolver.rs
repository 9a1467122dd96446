//! Starting-point resolution
//!
//! Maps the framework starting point chosen by the user to the front-end
//! packages to declare, the template set to render and the JS plugin files
//! the page loads by hand. Everything here is a pure function of the
//! starting point.

use crate::error::ScaffoldError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Packages every starting point declares
const COMMON_DEPENDENCIES: &[(&str, &str)] = &[
    ("jquery-validation", "^1.16.0"),
    ("font-awesome", "~4.7"),
    ("modernizr", "~2.8.1"),
];

/// Pinned DOM utility given to the supported starting points
const DOM_UTILITY: (&str, &str) = ("jquery", "~1.9.1");

/// Bootstrap 3 plugins, in load order
const BOOTSTRAP_THREE_PLUGINS: &[&str] = &[
    "affix",
    "alert",
    "dropdown",
    "tooltip",
    "modal",
    "transition",
    "button",
    "popover",
    "carousel",
    "scrollspy",
    "collapse",
    "tab",
];

/// Bootstrap 4 plugins, in load order (`util` must come first)
const BOOTSTRAP_FOUR_PLUGINS: &[&str] = &[
    "util",
    "alert",
    "button",
    "carousel",
    "collapse",
    "dropdown",
    "modal",
    "scrollspy",
    "tab",
    "tooltip",
    "popover",
];

/// Framework skeleton the user starts from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum StartingPoint {
    /// Bootstrap 3 responsive template (Desk default)
    #[default]
    #[value(name = "bootStrap", alias = "classic")]
    ClassicResponsive,
    /// Foundation 5.x starting point
    #[value(name = "foundationFive", alias = "foundation5")]
    FoundationFive,
    /// Bootstrap 4, offered but not fully wired
    #[value(name = "bootStrapFour", alias = "bootstrap4")]
    BootstrapFour,
    /// Foundation 6, offered but not fully wired
    #[value(name = "foundationSix", alias = "foundation6")]
    FoundationSix,
}

impl StartingPoint {
    pub const ALL: [StartingPoint; 4] = [
        StartingPoint::ClassicResponsive,
        StartingPoint::FoundationFive,
        StartingPoint::BootstrapFour,
        StartingPoint::FoundationSix,
    ];

    /// Stable key used in templates and on the command line
    pub fn key(&self) -> &'static str {
        match self {
            StartingPoint::ClassicResponsive => "bootStrap",
            StartingPoint::FoundationFive => "foundationFive",
            StartingPoint::BootstrapFour => "bootStrapFour",
            StartingPoint::FoundationSix => "foundationSix",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StartingPoint::ClassicResponsive => "v5 - Responsive Template (Desk default)",
            StartingPoint::FoundationFive => {
                "Foundation - Starting point based off Foundation v5.3 framework"
            }
            StartingPoint::BootstrapFour => "Bootstrap 4 - Not yet available",
            StartingPoint::FoundationSix => "Foundation 6 - Not yet available",
        }
    }

    /// Whether the starting point is fully wired
    pub fn supported(&self) -> bool {
        match self {
            StartingPoint::ClassicResponsive | StartingPoint::FoundationFive => true,
            StartingPoint::BootstrapFour | StartingPoint::FoundationSix => false,
        }
    }
}

impl fmt::Display for StartingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for StartingPoint {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StartingPoint::ALL
            .into_iter()
            .find(|sp| sp.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScaffoldError::UnknownStartingPoint(s.to_string()))
    }
}

/// Which skeleton page/stylesheet pair gets rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSet {
    Bootstrap,
    Foundation,
}

impl TemplateSet {
    /// Directory name of the set inside the template source
    pub fn dir_name(&self) -> &'static str {
        match self {
            TemplateSet::Bootstrap => "v5",
            TemplateSet::Foundation => "foundation",
        }
    }
}

/// JS plugins of a UI framework that the page includes one by one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSet {
    /// Location of the precompiled plugin files
    pub compiled_prefix: &'static str,
    /// Location of the plugin sources, used when the style preprocessor is on
    pub source_prefix: &'static str,
    /// Plugin module names in load order
    pub names: &'static [&'static str],
}

impl PluginSet {
    /// Plugin directory for the installed form selected by `sass`
    pub fn prefix(&self, sass: bool) -> &'static str {
        if sass {
            self.source_prefix
        } else {
            self.compiled_prefix
        }
    }
}

/// Everything derived from a starting point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssets {
    /// Front-end package name to version constraint
    pub dependencies: BTreeMap<String, String>,
    pub template_set: TemplateSet,
    pub plugins: Option<PluginSet>,
    /// A Bootstrap flavour is part of the skeleton
    pub includes_ui_framework: bool,
    /// The pinned DOM utility is declared
    pub includes_dom_utility: bool,
}

impl ResolvedAssets {
    /// Plugin prefix and names for the page template, empty when there are none
    pub fn plugin_paths(&self, sass: bool) -> (&'static str, &'static [&'static str]) {
        match &self.plugins {
            Some(plugins) => (plugins.prefix(sass), plugins.names),
            None => ("", &[]),
        }
    }
}

/// Resolve a starting point into the assets it needs
pub fn resolve(starting_point: StartingPoint) -> ResolvedAssets {
    let mut dependencies: BTreeMap<String, String> = COMMON_DEPENDENCIES
        .iter()
        .map(|(name, version)| (name.to_string(), version.to_string()))
        .collect();

    let includes_dom_utility = starting_point.supported();
    if includes_dom_utility {
        dependencies.insert(DOM_UTILITY.0.to_string(), DOM_UTILITY.1.to_string());
    }

    let (package, template_set, plugins) = match starting_point {
        StartingPoint::ClassicResponsive => (
            ("bootstrap-sass", "~3.3.5"),
            TemplateSet::Bootstrap,
            Some(PluginSet {
                compiled_prefix: "/bower_components/bootstrap-sass/assets/javascripts/bootstrap/",
                source_prefix: "/bower_components/bootstrap-sass/assets/javascripts/bootstrap/",
                names: BOOTSTRAP_THREE_PLUGINS,
            }),
        ),
        StartingPoint::FoundationFive => (("foundation", "5.5.3"), TemplateSet::Foundation, None),
        StartingPoint::BootstrapFour => (
            ("bootstrap", "latest"),
            TemplateSet::Bootstrap,
            Some(PluginSet {
                compiled_prefix: "/bower_components/bootstrap/js/dist/",
                source_prefix: "/bower_components/bootstrap/js/src/",
                names: BOOTSTRAP_FOUR_PLUGINS,
            }),
        ),
        StartingPoint::FoundationSix => {
            (("foundation-sites", "latest"), TemplateSet::Foundation, None)
        }
    };
    dependencies.insert(package.0.to_string(), package.1.to_string());

    ResolvedAssets {
        dependencies,
        template_set,
        plugins,
        includes_ui_framework: template_set == TemplateSet::Bootstrap,
        includes_dom_utility,
    }
}
