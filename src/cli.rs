//! CLI argument parsing and command dispatch

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use devlint::output::OutputConfig;

use crate::commands;

/// devlint - Lint and fix a repository's metadata files
#[derive(Parser, Debug)]
#[command(name = "devlint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the project and offer to fix each issue
    Lint(commands::lint::LintArgs),

    /// List the rule sets that apply to the project
    Ls(commands::ls::LsArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(&self.log_level)?;
        let output = OutputConfig::from_env_and_flag(&self.color);
        console::set_colors_enabled(output.use_color);

        match self.command {
            Commands::Lint(args) => commands::lint::execute(args, output),
            Commands::Ls(args) => commands::ls::execute(args, output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// `RUST_LOG` wins over `--log-level` when set.
fn init_logging(level: &str) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init()
        .context("Failed to initialize logging")
}
