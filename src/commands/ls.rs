//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists the rule sets a
//! `lint` run would evaluate for a project.
//!
//! With `--all`, rule sets replaced by a more specific layer are listed too,
//! in discovery order, each marked with the rule set that overrides it.
//!
//! This command is read-only: no rule set is constructed and no issue is
//! evaluated.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use devlint::defaults::{default_user_config, USER_CONFIG_ENV};
use devlint::git::GitCli;
use devlint::output::{OutputConfig, Reporter};
use devlint::phases::discovery::parse_match_kinds;
use devlint::phases::orchestrator::{self, Plan, Providers, RunOptions};
use devlint::phases::RuleSetDescriptor;
use devlint::prompt::AutoYes;
use devlint::remote::GhCli;
use devlint::rules::catalog::RuleCatalog;

use super::enter_project_dir;

/// List the rule sets that apply to the project
#[derive(Args, Debug)]
pub struct LsArgs {
    /// The project directory.
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Only list layers of these kinds (project, ecosystem, name, organization).
    #[arg(long = "match", value_name = "KIND", value_delimiter = ',')]
    pub match_kinds: Vec<String>,

    /// Also list overridden rule sets.
    #[arg(short, long)]
    pub all: bool,

    /// Show catalog paths instead of long ids.
    #[arg(short, long)]
    pub long: bool,

    /// User configuration file.
    #[arg(long, value_name = "FILE", env = USER_CONFIG_ENV)]
    pub config: Option<PathBuf>,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, output: OutputConfig) -> Result<ExitCode> {
    let selection = parse_match_kinds(&args.match_kinds)?;
    let root = enter_project_dir(&args.dir)?;

    let vcs = GitCli::new(&root);
    let remote = GhCli::new();
    let catalog = RuleCatalog::builtin();
    let options = RunOptions {
        selection,
        user_config: args.config.or_else(default_user_config),
        ..RunOptions::default()
    };
    let providers = Providers {
        vcs: &vcs,
        remote: &remote,
        catalog: &catalog,
        confirm: &AutoYes,
    };

    let plan = Plan::build(&root, &options, &providers)?;
    let mut reporter = Reporter::stdout(output);
    orchestrator::print_header(&plan, &mut reporter)?;

    let name = |d: &RuleSetDescriptor| {
        if args.long {
            d.path.clone()
        } else {
            d.long_id.clone()
        }
    };

    if args.all {
        for descriptor in &plan.discovered {
            match plan.overridden.iter().find(|o| o.descriptor == *descriptor) {
                Some(o) => reporter.line(&format!("{} (overridden by {})", name(descriptor), o.by))?,
                None => reporter.line(&name(descriptor))?,
            }
        }
    } else {
        for descriptor in &plan.rule_sets {
            reporter.line(&name(descriptor))?;
        }
    }

    reporter.flush()?;
    Ok(ExitCode::SUCCESS)
}
