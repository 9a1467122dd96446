//! Dependency installation
//!
//! Two passes share the `skip_install` flag: the script-level manifest
//! (`package.json`, via yarn or npm) and the front-end manifest
//! (`bower.json`, via bower). A failing pass is reported and the run goes on.

pub mod manager;
pub mod runner;

pub use manager::{check_tool, is_installed, PackageManager, ToolInfo};
pub use runner::run_install;

use crate::config::Options;
use colored::Colorize;
use std::path::Path;

/// Result of one install pass
#[derive(Debug)]
pub struct InstallOutcome {
    pub manager: PackageManager,
    /// Error message when the pass failed
    pub error: Option<String>,
}

impl InstallOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Managers to run, in order
pub fn install_plan(script_manager: PackageManager) -> [PackageManager; 2] {
    [script_manager, PackageManager::Bower]
}

/// Notice printed before installing
pub fn install_message(plan: &[PackageManager]) -> String {
    let commands: Vec<String> = plan.iter().map(|m| m.install_command()).collect();
    format!(
        "I'm all done. Running {} for you to install the required dependencies. \
         If this fails, try running the command yourself.",
        commands.join(" & ")
    )
}

/// One-line status of a package manager before it runs, or an error when it is missing
pub fn tool_status(info: &ToolInfo) -> Result<String, String> {
    if !info.available {
        return Err(format!(
            "{} was not found on PATH; skipping `{}`",
            info.manager.binary(),
            info.manager.install_command()
        ));
    }
    Ok(format!(
        "Using {} ({})",
        info.manager.binary(),
        info.version.as_deref().unwrap_or("unknown version")
    ))
}

/// Instructions shown when installation was skipped
pub fn skipped_install_message(script_manager: PackageManager) -> String {
    format!(
        "After running {}, inject your front end dependencies by running {}.",
        format!("{} & bower install", script_manager.install_command())
            .yellow()
            .bold(),
        "deskgen wire".yellow().bold()
    )
}

/// Run both install passes unless `skip_install` is set
///
/// Returns one outcome per pass that ran; an empty list means nothing ran.
pub async fn install_dependencies(options: &Options, project_dir: &Path) -> Vec<InstallOutcome> {
    if options.skip_install {
        return Vec::new();
    }

    let plan = install_plan(PackageManager::detect_script_manager());
    if !options.skip_install_message {
        println!();
        println!("{}", install_message(&plan));
    }

    let mut outcomes = Vec::with_capacity(plan.len());
    for manager in plan {
        match tool_status(&check_tool(manager)) {
            Ok(status) => println!("{}", status.dimmed()),
            Err(missing) => {
                eprintln!("{} {}", "Warning:".yellow(), missing);
                outcomes.push(InstallOutcome {
                    manager,
                    error: Some(missing),
                });
                continue;
            }
        }

        let error = match run_install(manager, project_dir).await {
            Ok(()) => None,
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red(), e);
                Some(format!("{:#}", e))
            }
        };
        outcomes.push(InstallOutcome { manager, error });
    }

    outcomes
}
