//! deskgen - Project scaffolding for Desk themes

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use deskgen_core::config::options::DEFAULT_TEST_FRAMEWORK;
use deskgen_core::tui::CreateArgs;
use deskgen_core::{Options, StartingPoint};
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "deskgen")]
#[command(about = "CLI for scaffolding Desk theme projects")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Create flags, accepted without the `create` subcommand
    #[command(flatten)]
    pub create: CliCreateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Desk theme project
    Create(CliCreateArgs),
    /// Inject installed front-end packages into an existing project
    Wire(WireArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Do not print the welcome message
    #[arg(long = "skip-welcome-message")]
    pub skip_welcome_message: bool,

    /// Do not print the notice before installing dependencies
    #[arg(long = "skip-install-message")]
    pub skip_install_message: bool,

    /// Do not install dependencies
    #[arg(long = "skip-install")]
    pub skip_install: bool,

    /// Test framework named in the build script
    #[arg(long = "test-framework", default_value = DEFAULT_TEST_FRAMEWORK)]
    pub test_framework: String,

    /// Compile scripts with Babel
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub babel: bool,

    /// Use Sass stylesheets
    #[arg(long)]
    pub sass: bool,

    /// Local directory to use for templates instead of the bundled set (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Project directory to create
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Deployment path of the hosted site files
    #[arg(long = "deploy-path")]
    pub deploy_path: Option<String>,

    /// Framework starting point
    #[arg(short, long = "starting-point", value_enum)]
    pub starting_point: Option<StartingPoint>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            options: Options {
                skip_welcome_message: args.skip_welcome_message,
                skip_install_message: args.skip_install_message,
                skip_install: args.skip_install,
                test_framework: args.test_framework,
                babel: args.babel,
                sass: args.sass,
            },
            template_dir: args.template_dir,
            directory: args.directory,
            name: args.name,
            deploy_path: args.deploy_path,
            starting_point: args.starting_point,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct WireArgs {
    /// Project directory (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Also wire the Sass stylesheets
    #[arg(long)]
    pub sass: bool,
}

fn wire(args: WireArgs) -> Result<()> {
    let dir = match args.directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let report = deskgen_core::wire::wire_project(&dir, args.sass)?;
    for (file, count) in &report.files {
        let shown = file.strip_prefix(&dir).unwrap_or(file);
        println!(
            "{} {} references into {}",
            "Injected".green(),
            count,
            shown.display()
        );
    }
    for warning in &report.warnings {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let Args { command, create } = Args::parse();

    match command {
        Some(Command::Create(create_args)) => {
            let result = deskgen_core::run(create_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::Wire(wire_args)) => wire(wire_args),
        None => {
            // No subcommand provided, default to create behavior
            let result = deskgen_core::run(create.into(), CLI_VERSION).await;

            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
