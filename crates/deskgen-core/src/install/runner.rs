//! Running a package manager and streaming its output

use super::manager::PackageManager;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Run `<manager> install` in `dir`, streaming its output
///
/// Waits for the child without a timeout; the user can only interrupt the
/// whole run.
pub async fn run_install(manager: PackageManager, dir: &Path) -> Result<()> {
    let cmd = manager.install_command();
    println!();
    println!("{} {}", "Running:".dimmed(), cmd.yellow());
    println!();

    let binary = which::which(manager.binary())
        .with_context(|| format!("{} was not found on PATH", manager.binary()))?;

    let mut child = TokioCommand::new(binary)
        .args(manager.install_args())
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start {}", cmd))?;

    let stdout = child
        .stdout
        .take()
        .context("Failed to capture stdout")?;
    let stderr = child
        .stderr
        .take()
        .context("Failed to capture stderr")?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_open = true;
    let mut stderr_open = true;

    while stdout_open || stderr_open {
        tokio::select! {
            line = stdout_reader.next_line(), if stdout_open => {
                match line {
                    Ok(Some(line)) => println!("  {}", line),
                    Ok(None) => stdout_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_open = false;
                    }
                }
            }
            line = stderr_reader.next_line(), if stderr_open => {
                match line {
                    Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                    Ok(None) => stderr_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_open = false;
                    }
                }
            }
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed to wait for {}", cmd))?;
    println!();

    if status.success() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} failed with exit code: {}\n\
             Please try running it yourself.",
            cmd,
            status.code().unwrap_or(-1)
        );
    }
}
