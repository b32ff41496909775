//! Phase 1: Discovery
//!
//! Walks the rule layers that apply to the project, in order, and lists the
//! rule sets registered in each:
//!
//! 1. `100-directory` - always
//! 2. `200-version-control` - git repositories
//! 3. `300-remote-url` - repositories whose remote names an owner
//! 4. `400-ecosystem/<tag>` per detected ecosystem, then `400-ecosystem/_`
//! 5. `500-name/<name>/_`, `500-name/_/<name>`, `500-name/<owner>/<name>`
//!
//! Later layers are more specific, which is what override resolution relies
//! on. Nothing is constructed here; discovery only produces descriptors.

use std::str::FromStr;

use log::debug;

use super::RuleSetDescriptor;
use crate::context::ProjectContext;
use crate::ecosystem::Ecosystem;
use crate::error::{Error, Result};
use crate::rules::catalog::RuleCatalog;

/// A group of layers selectable with `--match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// `100-directory`, `200-version-control`, `300-remote-url`
    Project,
    /// `400-ecosystem/*`
    Ecosystem,
    /// `500-name/<name>/_` and `500-name/_/<name>`
    Name,
    /// `500-name/<owner>/<name>`
    Organization,
}

impl MatchKind {
    pub const ALL: [MatchKind; 4] = [
        MatchKind::Project,
        MatchKind::Ecosystem,
        MatchKind::Name,
        MatchKind::Organization,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::Project => "project",
            MatchKind::Ecosystem => "ecosystem",
            MatchKind::Name => "name",
            MatchKind::Organization => "organization",
        }
    }
}

impl FromStr for MatchKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MatchKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| Error::Usage {
                message: format!(
                    "invalid --match value \"{}\" (expected one of: project, ecosystem, name, organization)",
                    s
                ),
            })
    }
}

/// Parse `--match` values; each value may itself be comma-separated.
///
/// An empty result selects every layer.
pub fn parse_match_kinds<S: AsRef<str>>(values: &[S]) -> Result<Vec<MatchKind>> {
    let mut kinds = Vec::new();
    for value in values {
        for part in value.as_ref().split(',').filter(|p| !p.trim().is_empty()) {
            let kind: MatchKind = part.parse()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }
    Ok(kinds)
}

/// The layer directories to list for `context`, in discovery order.
pub fn layer_dirs(
    context: &ProjectContext,
    ecosystems: &[Ecosystem],
    selection: &[MatchKind],
) -> Vec<String> {
    let selected = |kind: MatchKind| selection.is_empty() || selection.contains(&kind);
    let mut dirs = Vec::new();

    if selected(MatchKind::Project) {
        dirs.push("100-directory".to_string());
        if context.is_version_controlled() && context.root_dir().join(".git").exists() {
            dirs.push("200-version-control".to_string());
        }
        if context.has_remote() {
            dirs.push("300-remote-url".to_string());
        }
    }

    if selected(MatchKind::Ecosystem) {
        for ecosystem in ecosystems {
            dirs.push(format!("400-ecosystem/{}", ecosystem.tag()));
        }
        dirs.push("400-ecosystem/_".to_string());
    }

    if let Some(owner) = context.owner() {
        let name = context.name();
        if selected(MatchKind::Name) {
            dirs.push(format!("500-name/{}/_", name));
            dirs.push(format!("500-name/_/{}", name));
        }
        if selected(MatchKind::Organization) {
            dirs.push(format!("500-name/{}/{}", owner, name));
        }
    }

    dirs
}

/// Execute Phase 1: list the rule sets of every applicable layer.
pub fn discover(
    context: &ProjectContext,
    ecosystems: &[Ecosystem],
    catalog: &RuleCatalog,
    selection: &[MatchKind],
) -> Vec<RuleSetDescriptor> {
    layer_dirs(context, ecosystems, selection)
        .iter()
        .flat_map(|dir| {
            let found = catalog.list(dir);
            debug!("layer {}: {} rule set(s)", dir, found.len());
            found
        })
        .map(RuleSetDescriptor::from_path)
        .collect()
}
