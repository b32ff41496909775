//! Phase 3: Issue Pipeline
//!
//! Evaluates one rule set: gates it on `skip` and its dependencies, then pulls
//! issues from its stream one at a time. Each issue is filtered (strict-only
//! issues, issues turned off in configuration), reported, and fixed if the
//! user agrees. The first issue left unfixed fails the rule set and ends its
//! stream, so later checks never observe a state the user declined to repair.
//!
//! Strict-only issues in a non-strict run print nothing: they are recorded as
//! [`IssueOutcome::SkippedStrict`] in the report and logged at `debug`, and
//! the rule set can still pass. Every other outcome prints a
//! `[MARKER] longId[/issueId]` line.

use std::io::Write;

use log::{debug, warn};

use super::RuleSetDescriptor;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Marker, Reporter};
use crate::prompt::{Confirm, FIX_QUESTION};
use crate::rules::{Issue, Message, RuleContext, RuleSet};

/// What happened to a single issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// Strict-only issue in a non-strict run.
    SkippedStrict,
    /// Turned off in configuration.
    SkippedSuppressed,
    FixApplied,
    FixAbsent,
    FixDeclined,
    FixFailed(String),
}

/// Final state of a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSetStatus {
    Pass,
    Fail,
    Errored,
    Skipped,
}

/// Result of evaluating one rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSetReport {
    pub long_id: String,
    pub status: RuleSetStatus,
    /// `(issue key, outcome)` in the order issues were produced.
    pub issues: Vec<(String, IssueOutcome)>,
}

impl RuleSetReport {
    fn new(long_id: &str, status: RuleSetStatus) -> Self {
        Self {
            long_id: long_id.to_string(),
            status,
            issues: Vec::new(),
        }
    }

    pub fn failed(&self) -> bool {
        matches!(self.status, RuleSetStatus::Fail | RuleSetStatus::Errored)
    }
}

/// Settings shared by every rule set of a run.
pub struct PipelineOptions<'a> {
    pub config: &'a Config,
    pub strict: bool,
    pub confirm: &'a dyn Confirm,
}

/// Execute Phase 3 for one rule set.
///
/// Only I/O errors writing the report are returned; everything a rule set
/// does wrong is reported and folded into its [`RuleSetStatus`].
pub fn run_rule_set<W: Write>(
    descriptor: &RuleSetDescriptor,
    rule_set: &dyn RuleSet,
    cx: &RuleContext<'_>,
    options: &PipelineOptions<'_>,
    out: &mut Reporter<W>,
) -> Result<RuleSetReport> {
    let long_id = descriptor.long_id.as_str();

    if rule_set.skip() {
        out.status(Marker::Skip, long_id)?;
        return Ok(RuleSetReport::new(long_id, RuleSetStatus::Skipped));
    }

    for dependency in rule_set.dependencies() {
        let reason = match (dependency.check)(cx) {
            Ok(true) => continue,
            Ok(false) => format!("Dependency \"{}\" is not satisfied", dependency.name),
            Err(e) => format!("Dependency \"{}\" could not be checked: {}", dependency.name, e),
        };
        out.marker(Marker::Skip, long_id, &[reason])?;
        return Ok(RuleSetReport::new(long_id, RuleSetStatus::Skipped));
    }

    let stream = match rule_set.issues(cx) {
        Ok(stream) => stream,
        Err(e) => {
            out.marker(Marker::Error, long_id, &[e.to_string()])?;
            return Ok(RuleSetReport::new(long_id, RuleSetStatus::Errored));
        }
    };

    let mut report = RuleSetReport::new(long_id, RuleSetStatus::Pass);
    for item in stream {
        let issue = match item {
            Ok(issue) => issue,
            Err(e) => {
                out.marker(Marker::Error, long_id, &[e.to_string()])?;
                report.status = RuleSetStatus::Errored;
                return Ok(report);
            }
        };

        let key = issue_key(long_id, &issue);
        let outcome = handle_issue(long_id, &key, issue, options, out)?;
        let stop = matches!(
            outcome,
            IssueOutcome::FixAbsent | IssueOutcome::FixDeclined | IssueOutcome::FixFailed(_)
        );
        report.issues.push((key, outcome));
        if stop {
            report.status = RuleSetStatus::Fail;
            return Ok(report);
        }
    }

    out.status(Marker::Pass, long_id)?;
    Ok(report)
}

/// `<longId>/<issueId>`, or just the long id for issues without one.
fn issue_key(long_id: &str, issue: &Issue<'_>) -> String {
    match &issue.id {
        Some(id) => format!("{}/{}", long_id, id),
        None => long_id.to_string(),
    }
}

fn handle_issue<W: Write>(
    long_id: &str,
    key: &str,
    issue: Issue<'_>,
    options: &PipelineOptions<'_>,
    out: &mut Reporter<W>,
) -> Result<IssueOutcome> {
    if issue.strict && !options.strict {
        debug!("{}: strict-only issue not reported", key);
        return Ok(IssueOutcome::SkippedStrict);
    }

    if issue.id.is_some() && options.config.is_off(key) {
        out.status(Marker::Skip, key)?;
        return Ok(IssueOutcome::SkippedSuppressed);
    }

    out.found_issue(long_id)?;
    match &issue.message {
        Message::Lines(lines) => out.tips(lines)?,
        Message::Text(text) => out.line(text)?,
    }

    let Some(fix) = issue.fix else {
        out.marker(Marker::Fail, long_id, &["No fix function exists"])?;
        return Ok(IssueOutcome::FixAbsent);
    };

    let approved = options.confirm.confirm(FIX_QUESTION).unwrap_or_else(|e| {
        warn!("{}: could not read an answer, not fixing: {}", key, e);
        false
    });
    if !approved {
        out.marker(
            Marker::Fail,
            long_id,
            &["Failed because the fix function was not executed"],
        )?;
        return Ok(IssueOutcome::FixDeclined);
    }

    match fix() {
        Ok(()) => {
            debug!("{}: fix applied", key);
            Ok(IssueOutcome::FixApplied)
        }
        Err(e) => {
            let message = e.to_string();
            out.marker(Marker::Error, long_id, &[format!("Fix failed: {}", message)])?;
            Ok(IssueOutcome::FixFailed(message))
        }
    }
}
