//! # Rule Sets and Issues
//!
//! A rule set is a named group of checks against one project. Checking it
//! yields an [`IssueStream`]: a lazy sequence of [`Issue`]s, each carrying an
//! optional [`Fix`]. The pipeline consumes the stream one issue at a time and
//! may run the fix before asking for the next issue, so a check that comes
//! later in the stream sees the project as earlier fixes left it.
//!
//! ## Writing a rule set
//!
//! ```
//! use devlint::rules::{Issue, IssueStream, RuleContext, RuleSet};
//! use devlint::error::Result;
//!
//! struct NoTodoFile;
//!
//! impl RuleSet for NoTodoFile {
//!     fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
//!         Ok(IssueStream::new().check(move || {
//!             if !cx.fs.exists("TODO") {
//!                 return Ok(vec![]);
//!             }
//!             Ok(vec![Issue::new("Expected no TODO file")
//!                 .with_id("todo")
//!                 .with_fix(move || cx.fs.remove("TODO"))])
//!         }))
//!     }
//! }
//! ```
//!
//! Rule sets are registered by path in a [`catalog::RuleCatalog`]; the path
//! decides which layer they belong to.

pub mod builtin;
pub mod catalog;
pub mod helpers;

use std::collections::VecDeque;
use std::fmt;

use crate::context::ProjectContext;
use crate::error::Result;
use crate::filesystem::ProjectFs;
use crate::git::Vcs;
use crate::remote::RemoteRepository;

/// What an issue prints below its `[EVAL]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Printed as is.
    Text(String),
    /// Printed one ` -> line` per entry.
    Lines(Vec<String>),
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Lines(vec![text.to_string()])
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Lines(vec![text])
    }
}

impl From<Vec<String>> for Message {
    fn from(lines: Vec<String>) -> Self {
        Message::Lines(lines)
    }
}

impl<const N: usize> From<[&str; N]> for Message {
    fn from(lines: [&str; N]) -> Self {
        Message::Lines(lines.iter().map(|l| l.to_string()).collect())
    }
}

/// A one-shot action that resolves an issue.
pub type Fix<'a> = Box<dyn FnOnce() -> Result<()> + 'a>;

/// A single finding.
pub struct Issue<'a> {
    /// Stable identifier; `<longId>/<id>` is the configuration key that turns
    /// the issue off.
    pub id: Option<String>,
    pub message: Message,
    pub fix: Option<Fix<'a>>,
    /// Only reported when the run is strict.
    pub strict: bool,
}

impl<'a> Issue<'a> {
    pub fn new(message: impl Into<Message>) -> Self {
        Self {
            id: None,
            message: message.into(),
            fix: None,
            strict: false,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_fix(mut self, fix: impl FnOnce() -> Result<()> + 'a) -> Self {
        self.fix = Some(Box::new(fix));
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

impl fmt::Debug for Issue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Issue")
            .field("id", &self.id)
            .field("message", &self.message)
            .field("fix", &self.fix.is_some())
            .field("strict", &self.strict)
            .finish()
    }
}

type Check<'a> = Box<dyn FnOnce() -> Result<Vec<Issue<'a>>> + 'a>;

/// Lazy, single-pass sequence of issues.
///
/// Built from an ordered list of checks. A check runs only once every issue
/// of the checks before it has been taken from the stream. The first check
/// that fails is yielded as an `Err` and ends the stream.
#[derive(Default)]
pub struct IssueStream<'a> {
    checks: VecDeque<Check<'a>>,
    pending: VecDeque<Issue<'a>>,
    finished: bool,
}

impl<'a> IssueStream<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stream of already computed issues.
    pub fn from_issues(issues: Vec<Issue<'a>>) -> Self {
        Self {
            pending: issues.into(),
            ..Self::default()
        }
    }

    /// Append a check.
    pub fn check(mut self, check: impl FnOnce() -> Result<Vec<Issue<'a>>> + 'a) -> Self {
        self.checks.push_back(Box::new(check));
        self
    }
}

impl<'a> Iterator for IssueStream<'a> {
    type Item = Result<Issue<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }
            if let Some(issue) = self.pending.pop_front() {
                return Some(Ok(issue));
            }
            let check = self.checks.pop_front()?;
            match check() {
                Ok(issues) => self.pending.extend(issues),
                Err(e) => {
                    self.finished = true;
                    self.checks.clear();
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Everything a rule set may look at or change.
pub struct RuleContext<'a> {
    pub project: &'a ProjectContext,
    pub fs: ProjectFs,
    pub vcs: &'a dyn Vcs,
    pub remote: &'a dyn RemoteRepository,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        project: &'a ProjectContext,
        vcs: &'a dyn Vcs,
        remote: &'a dyn RemoteRepository,
    ) -> Self {
        Self {
            project,
            fs: ProjectFs::new(project.root_dir()),
            vcs,
            remote,
        }
    }
}

/// A named precondition evaluated before a rule set's issues are requested.
#[derive(Clone, Copy)]
pub struct Dependency {
    pub name: &'static str,
    pub check: fn(&RuleContext<'_>) -> Result<bool>,
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency").field("name", &self.name).finish()
    }
}

/// A group of related checks.
pub trait RuleSet {
    /// Skip this rule set unconditionally.
    fn skip(&self) -> bool {
        false
    }

    /// Preconditions that must all hold before [`RuleSet::issues`] is called.
    fn dependencies(&self) -> Vec<Dependency> {
        Vec::new()
    }

    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>>;
}
