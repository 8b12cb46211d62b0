//! Relay CLI
//!
//! Acts as the user in an agent conversation: acknowledges messages,
//! tracks step progress and composes the user's own messages.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use relay_agents::config::{RUN_ID_ENV, WORKSPACE_ENV};
use relay_agents::{RunConfig, Settings, UserAgent};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.workspace, cli.run_id),
        None => {
            println!("{} agent conversation relay", "relay".green().bold());
            println!();
            println!("Run {} for available commands.", "relay --help".cyan());
            Ok(())
        }
    }
}

/// Logs go to stderr; stdout carries protocol replies.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "relay_cli=debug,relay_agents=debug,relay_messages=debug"
    } else {
        "relay_cli=info,relay_agents=info,relay_messages=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn execute_command(
    cmd: Commands,
    workspace: Option<PathBuf>,
    run_id: Option<String>,
) -> Result<()> {
    match cmd {
        Commands::User => cmd_user(workspace, run_id),
        Commands::Compose { kind, to, details } => {
            println!(
                "{}",
                commands::run_compose(workspace.as_deref(), kind, &to, &details)?
            );
            Ok(())
        }
        Commands::Actions { json } => {
            print!("{}", commands::run_actions(json)?);
            Ok(())
        }
        Commands::Sample { action, from, to } => {
            println!("{}", commands::run_sample(&action, &from, &to)?);
            Ok(())
        }
    }
}

fn cmd_user(workspace: Option<PathBuf>, run_id: Option<String>) -> Result<()> {
    let workspace = workspace.ok_or_else(|| {
        relay_agents::Error::configuration(WORKSPACE_ENV, "not set (use --workspace)")
    })?;
    let run_id = run_id.ok_or_else(|| {
        relay_agents::Error::configuration(RUN_ID_ENV, "not set (use --run-id)")
    })?;

    let layout = RunConfig::new(workspace, run_id)?.layout();
    let settings = Settings::for_layout(&layout)?;
    let mut agent = UserAgent::for_run(&layout, &settings)?;

    let stdin = std::io::stdin();
    let summary = commands::run_user(
        &mut agent,
        stdin.lock(),
        std::io::stdout().lock(),
        std::io::stderr(),
    )?;

    if summary.failed > 0 {
        return Err(CliError::user(format!(
            "{} of {} message(s) could not be handled",
            summary.failed,
            summary.handled + summary.failed
        )));
    }
    Ok(())
}
