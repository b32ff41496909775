//! # Lint Command Implementation
//!
//! This module implements the `lint` subcommand, which runs every applicable
//! rule set against a project and offers to fix each issue it finds.
//!
//! ## Functionality
//!
//! - **Layer Selection**: `--match` limits the run to project, ecosystem,
//!   name or organization layers
//! - **Filtering**: `--only` and `--exclude` select rule sets by long id
//! - **Fixing**: Each fix is confirmed interactively unless `--yes` is given
//! - **Strict Mode**: `--strict` also reports issues that are strict-only
//!
//! The exit code is `0` when every rule set passed or was skipped and `1`
//! otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use devlint::defaults::{default_user_config, USER_CONFIG_ENV};
use devlint::git::GitCli;
use devlint::output::{OutputConfig, Reporter};
use devlint::phases::discovery::parse_match_kinds;
use devlint::phases::orchestrator::{self, Providers, RunOptions};
use devlint::prompt::{AutoYes, Confirm, Interactive};
use devlint::remote::GhCli;
use devlint::rules::catalog::RuleCatalog;

use super::enter_project_dir;

/// Check the project and offer to fix each issue
#[derive(Args, Debug)]
pub struct LintArgs {
    /// The project directory.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Apply every fix without asking.
    #[arg(short, long)]
    pub yes: bool,

    /// Also report strict-only issues.
    #[arg(long)]
    pub strict: bool,

    /// Only run layers of these kinds (project, ecosystem, name, organization).
    #[arg(long = "match", value_name = "KIND", value_delimiter = ',')]
    pub match_kinds: Vec<String>,

    /// Only run these rule sets, by long id (e.g. "100-directory/30-readme").
    #[arg(long, value_name = "ID", value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip these rule sets, by long id. Ignored when --only is given.
    #[arg(long, value_name = "ID", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// User configuration file.
    ///
    /// Defaults to `devlint/config.toml` in the system configuration
    /// directory (`~/.config/devlint/config.toml` on Linux).
    #[arg(long, value_name = "FILE", env = USER_CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Exit with 1 after a complete run, even when nothing failed.
    #[arg(long)]
    pub always_fail: bool,
}

/// Execute the `lint` command.
pub fn execute(args: LintArgs, output: OutputConfig) -> Result<ExitCode> {
    let selection = parse_match_kinds(&args.match_kinds)?;
    let root = enter_project_dir(&args.dir)?;

    let vcs = GitCli::new(&root);
    let remote = GhCli::new();
    let catalog = RuleCatalog::builtin();
    let confirm: &dyn Confirm = if args.yes { &AutoYes } else { &Interactive };

    let options = RunOptions {
        strict: args.strict,
        selection,
        only: args.only,
        exclude: args.exclude,
        user_config: args.config.or_else(default_user_config),
    };
    let providers = Providers {
        vcs: &vcs,
        remote: &remote,
        catalog: &catalog,
        confirm,
    };

    let mut reporter = Reporter::stdout(output);
    let summary = orchestrator::execute_lint(&root, &options, &providers, &mut reporter)?;
    Ok(ExitCode::from(summary.exit_code(args.always_fail)))
}
