//! Charm-style CLI prompts using cliclack

use crate::config::{default_project_name, Answers, GeneratorInfo, Options, ScaffoldContext};
use crate::emit::{emit_project, EmissionReport};
use crate::install::install_dependencies;
use crate::resolver::StartingPoint;
use crate::templates::TemplateSource;
use crate::wire::{self, WireOutcome};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Command to suggest when the template set is newer than the CLI
const UPGRADE_COMMAND: &str = "cargo install deskgen --force";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Generation flags
    pub options: Options,

    /// Local directory to use for templates instead of the bundled set
    pub template_dir: Option<PathBuf>,

    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Project name
    pub name: Option<String>,

    /// Deployment path of the hosted site files
    pub deploy_path: Option<String>,

    /// Framework starting point
    pub starting_point: Option<StartingPoint>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro("Desk theme generator")?;

    if !args.options.skip_welcome_message {
        cliclack::log::info(
            "Welcome! This sets up a Desk theme with a gulp build, a package \
             manifest and a front-end framework of your choice.",
        )?;
    }

    // Step 1: Select directory
    let project_dir = select_directory(&args)?;

    // Step 2: Collect answers
    let answers = collect_answers(&args, &project_dir)?;

    // Step 3: Setup template source
    let source = setup_source(&args.template_dir)?;
    let manifest = source
        .manifest()
        .with_context(|| format!("Failed to load {}", source.describe()))?;

    if let Some(warning) = manifest.compatibility_warning(cli_version, UPGRADE_COMMAND) {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    let ctx = ScaffoldContext::new(
        GeneratorInfo::new(crate::config::generator::GENERATOR_NAME, cli_version),
        args.options.clone(),
        answers,
        project_dir,
    );

    // Step 4: Emit project files
    create_project(&ctx, &source).await?;

    // Step 5: Install dependencies
    let outcomes = install_dependencies(&ctx.options, &ctx.destination).await;
    for outcome in outcomes.iter().filter(|o| !o.succeeded()) {
        cliclack::log::warning(format!(
            "{} did not complete. Run it yourself, then `deskgen wire`.",
            outcome.manager.install_command()
        ))?;
    }

    // Step 6: Wire installed packages into the page
    wire_dependencies(&ctx)?;

    // Step 7: Show next steps
    print_next_steps(&ctx.destination)?;

    Ok(())
}

fn setup_source(template_dir: &Option<PathBuf>) -> Result<TemplateSource> {
    let source = TemplateSource::resolve(template_dir.clone());
    cliclack::log::info(format!("Using {}", source.describe()))?;
    Ok(source)
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let p = absolutize(&current_dir, dir);
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else if args.yes {
        current_dir
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            absolutize(&current_dir, Path::new(&input))
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Existing files are overwritten without asking again
    if path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!(
                    "Directory has {} existing items; generated files will overwrite them",
                    count
                ))?;

                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

fn absolutize(current_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        current_dir.join(path)
    }
}

fn collect_answers(args: &CreateArgs, project_dir: &Path) -> Result<Answers> {
    let default_name = default_project_name(project_dir);

    let project_name = match &args.name {
        Some(name) => name.clone(),
        None if args.yes => default_name,
        None => cliclack::input("What's the name of your project?")
            .default_input(&default_name)
            .interact()?,
    };

    let deploy_path = match &args.deploy_path {
        Some(path) => path.clone(),
        None if args.yes => String::new(),
        None => cliclack::input("What is the deploy path of your site files?")
            .placeholder("leave empty for none")
            .required(false)
            .interact()?,
    };

    let starting_point = match args.starting_point {
        Some(point) => point,
        None if args.yes => StartingPoint::default(),
        None => {
            let mut select = cliclack::select("Which starting point would you like?")
                .initial_value(StartingPoint::default());
            for point in StartingPoint::ALL {
                select = select.item(point, point.display_name(), point.key());
            }
            select.interact()?
        }
    };

    if !starting_point.supported() {
        cliclack::log::warning(format!(
            "{} is not fully supported yet; expect to finish the framework setup by hand.",
            starting_point.display_name()
        ))?;
    }

    cliclack::log::success(format!(
        "Project: {} ({})",
        project_name,
        starting_point.display_name()
    ))?;

    Ok(Answers::new(project_name, deploy_path, starting_point))
}

async fn create_project(ctx: &ScaffoldContext, source: &TemplateSource) -> Result<EmissionReport> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let report = match emit_project(ctx, source).await {
        Ok(report) => report,
        Err(e) => {
            spinner.stop("Failed to create project");
            return Err(e).context("Project generation stopped; files written so far were kept");
        }
    };

    spinner.stop(format!(
        "Created {} files in {}",
        report.written.len(),
        ctx.destination.display()
    ));

    for (asset, reason) in &report.skipped {
        cliclack::log::warning(format!("Skipped {}: {}", asset, reason))?;
    }

    Ok(report)
}

fn wire_dependencies(ctx: &ScaffoldContext) -> Result<()> {
    match wire::finish(&ctx.options, &ctx.destination)? {
        WireOutcome::Skipped { message } => {
            cliclack::log::info(message)?;
        }
        WireOutcome::Wired(report) => {
            for (file, count) in &report.files {
                let shown = file.strip_prefix(&ctx.destination).unwrap_or(file);
                cliclack::log::success(format!(
                    "Injected {} references into {}",
                    count,
                    shown.display()
                ))?;
            }
            for warning in &report.warnings {
                cliclack::log::warning(warning)?;
            }
        }
    }
    Ok(())
}

fn print_next_steps(project_dir: &Path) -> Result<()> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();

    if current.as_deref() != Some(project_dir) {
        steps.push(format!("cd {}", project_dir.display()));
    }
    steps.push("gulp serve".to_string());

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy theming!")?;

    Ok(())
}
