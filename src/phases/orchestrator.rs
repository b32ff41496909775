//! Orchestrator for a complete lint run
//!
//! Coordinates context resolution, configuration loading and the three
//! phases:
//! 1. Discover rule sets in every applicable layer
//! 2. Resolve overrides between layers
//! 3. Run each surviving rule set through the issue pipeline
//!
//! Rule sets filtered out by `--only`/`--exclude` are never constructed.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::discovery::MatchKind;
use super::pipeline::{PipelineOptions, RuleSetReport};
use super::{phase1, phase2, phase3, RuleSetDescriptor};
use crate::config::Config;
use crate::context::{self, ProjectContext};
use crate::ecosystem::{self, Ecosystem};
use crate::error::Result;
use crate::filesystem::ProjectFs;
use crate::git::Vcs;
use crate::output::{Marker, Reporter};
use crate::prompt::Confirm;
use crate::remote::RemoteRepository;
use crate::rules::catalog::RuleCatalog;
use crate::rules::RuleContext;

/// User-controlled settings of a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Report strict-only issues.
    pub strict: bool,
    /// Layer groups to consider; empty means all.
    pub selection: Vec<MatchKind>,
    /// Only run these rule sets (long ids or paths).
    pub only: Vec<String>,
    /// Never run these rule sets (long ids or paths).
    pub exclude: Vec<String>,
    /// User configuration file, merged below the project's `dev.toml`.
    pub user_config: Option<PathBuf>,
}

/// The collaborators a run talks to.
pub struct Providers<'a> {
    pub vcs: &'a dyn Vcs,
    pub remote: &'a dyn RemoteRepository,
    pub catalog: &'a RuleCatalog,
    pub confirm: &'a dyn Confirm,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// The project is on a skip list; no rule set ran.
    pub skipped_project: bool,
    pub reports: Vec<RuleSetReport>,
}

impl RunSummary {
    /// Whether any rule set failed or errored.
    pub fn failed(&self) -> bool {
        self.reports.iter().any(RuleSetReport::failed)
    }

    /// `0` for a clean run and `1` otherwise. With `always_fail` every run
    /// exits `1`.
    pub fn exit_code(&self, always_fail: bool) -> u8 {
        if always_fail || self.failed() {
            1
        } else {
            0
        }
    }
}

/// What a project resolves to before any rule set runs.
pub struct Plan {
    pub context: ProjectContext,
    pub ecosystems: Vec<Ecosystem>,
    pub config: Config,
    /// Every rule set found, before override resolution and filtering.
    pub discovered: Vec<RuleSetDescriptor>,
    /// Rule sets that survived override resolution, in run order.
    pub rule_sets: Vec<RuleSetDescriptor>,
    /// Rule sets replaced by a later one, with the long id of the winner.
    pub overridden: Vec<phase2::Overridden>,
}

impl Plan {
    /// Resolve the context, configuration and rule set list for `root`.
    pub fn build(root: &Path, options: &RunOptions, providers: &Providers<'_>) -> Result<Self> {
        let context = context::resolve(root, providers.vcs)?;
        let ecosystems = ecosystem::detect(&ProjectFs::new(context.root_dir()))?;
        let config = Config::load(context.root_dir(), options.user_config.as_deref(), &context)?;

        // Phase 1: Discovery
        let discovered = phase1::discover(
            &context,
            &ecosystems,
            providers.catalog,
            &options.selection,
        );
        debug!("discovered {} rule set(s)", discovered.len());

        // Phase 2: Override Resolution
        let (kept, overridden) = phase2::partition_overrides(discovered.clone());
        for o in &overridden {
            debug!("{} is overridden by {}", o.descriptor.long_id, o.by);
        }

        let rule_sets = kept
            .into_iter()
            .filter(|d| is_selected(d, &options.only, &options.exclude))
            .collect();

        Ok(Self {
            context,
            ecosystems,
            config,
            discovered,
            rule_sets,
            overridden,
        })
    }
}

/// Whether `descriptor` passes the filters. A non-empty `only` list wins
/// over `exclude`.
pub fn is_selected(descriptor: &RuleSetDescriptor, only: &[String], exclude: &[String]) -> bool {
    let matches = |id: &String| {
        let id = id.trim_matches('/');
        id == descriptor.long_id || id == descriptor.path
    };
    if only.is_empty() {
        !exclude.iter().any(matches)
    } else {
        only.iter().any(matches)
    }
}

/// Print the run header.
pub fn print_header<W: Write>(plan: &Plan, out: &mut Reporter<W>) -> Result<()> {
    out.field("Directory", &plan.context.root_dir().display().to_string())?;
    out.field("Ecosystems", &ecosystem::format_list(&plan.ecosystems))?;
    if let Some(full_name) = plan.context.full_name() {
        out.field("Project", &full_name)?;
    }
    out.line("")?;
    Ok(())
}

/// Execute a complete lint run of the project at `root`.
pub fn execute_lint<W: Write>(
    root: &Path,
    options: &RunOptions,
    providers: &Providers<'_>,
    out: &mut Reporter<W>,
) -> Result<RunSummary> {
    let plan = Plan::build(root, options, providers)?;
    execute_plan(&plan, options, providers, out)
}

/// Run every rule set of an already built plan.
///
/// A rule set that fails, errors or cannot be constructed is reported and
/// the run moves on to the next one.
pub fn execute_plan<W: Write>(
    plan: &Plan,
    options: &RunOptions,
    providers: &Providers<'_>,
    out: &mut Reporter<W>,
) -> Result<RunSummary> {
    print_header(plan, out)?;

    let mut summary = RunSummary::default();

    if plan.config.skips(&plan.context) {
        let full_name = plan.context.full_name().unwrap_or_default();
        info!("{} is on a skip list", full_name);
        out.status(Marker::Skip, &full_name)?;
        summary.skipped_project = true;
        out.line("Done.")?;
        return Ok(summary);
    }

    let cx = RuleContext::new(&plan.context, providers.vcs, providers.remote);
    let pipeline = PipelineOptions {
        config: &plan.config,
        strict: options.strict,
        confirm: providers.confirm,
    };

    // Phase 3: Pipeline
    for descriptor in &plan.rule_sets {
        let report = match providers.catalog.load(&descriptor.path) {
            Ok(rule_set) => phase3::run_rule_set(descriptor, rule_set.as_ref(), &cx, &pipeline, out)?,
            Err(e) => {
                out.marker(Marker::Error, &descriptor.long_id, &[e.to_string()])?;
                RuleSetReport {
                    long_id: descriptor.long_id.clone(),
                    status: phase3::RuleSetStatus::Errored,
                    issues: Vec::new(),
                }
            }
        };
        summary.reports.push(report);
    }

    out.line("Done.")?;
    out.flush()?;
    Ok(summary)
}
