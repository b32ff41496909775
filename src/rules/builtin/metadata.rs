//! Hosted repository metadata.
//!
//! Both rule sets read the repository through
//! [`RemoteRepository`](crate::remote::RemoteRepository) and are skipped when
//! the API is unavailable.

use crate::error::Result;
use crate::remote::{RepoMetadata, RepoPatch};
use crate::rules::builtin::{owner_and_name, REMOTE_API};
use crate::rules::{Dependency, Issue, IssueStream, RuleContext, RuleSet};

/// Descriptions must stay below this many UTF-16 code units.
const MAX_DESCRIPTION_UNITS: usize = 65;

/// `300-remote-url/10-local-metadata`: the hosted repository is the one the
/// remote URL names.
pub struct LocalMetadata;

impl RuleSet for LocalMetadata {
    fn dependencies(&self) -> Vec<Dependency> {
        vec![REMOTE_API]
    }

    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            let (owner, name) = owner_and_name(cx)?;
            let data = cx.remote.fetch(owner, name)?;
            let local = format!("{}/{}", owner, name);
            if data.full_name == local {
                return Ok(vec![]);
            }
            Ok(vec![Issue::new(vec![
                "Expected GitHub repository to be in sync with local remote URL".to_string(),
                "But, they are out of sync".to_string(),
                format!("Found GitHub repository with full_name of \"{}\"", data.full_name),
                format!("Found remote to name the repository \"{}\"", local),
            ])
            .with_id("full-name")])
        }))
    }
}

/// `300-remote-url/20-remote-metadata`: description, homepage, tabs and the
/// default branch.
pub struct RemoteMetadata;

impl RuleSet for RemoteMetadata {
    fn dependencies(&self) -> Vec<Dependency> {
        vec![REMOTE_API]
    }

    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new()
            .check(move || {
                let (owner, name) = owner_and_name(cx)?;
                let data = cx.remote.fetch(owner, name)?;
                Ok(description_issues(&data))
            })
            .check(move || {
                let (owner, name) = owner_and_name(cx)?;
                let data = cx.remote.fetch(owner, name)?;
                let mut issues = Vec::new();

                let expected = expected_homepage(owner, name);
                match data.homepage.as_deref() {
                    Some(homepage) if !homepage.is_empty() && homepage != expected => {
                        issues.push(
                            Issue::new(vec![
                                format!(
                                    "Expected GitHub repository to have a homepage URL of \"{}\"",
                                    expected
                                ),
                                format!("But, homepage URL of \"{}\" was found", homepage),
                            ])
                            .with_id("homepage")
                            .with_fix(move || {
                                let patch = RepoPatch {
                                    homepage: Some(expected),
                                    ..RepoPatch::default()
                                };
                                cx.remote.update(owner, name, &patch)
                            }),
                        );
                    }
                    _ => {}
                }

                if data.has_projects {
                    issues.push(
                        Issue::new([
                            "Expected GitHub repository to have the \"projects\" tab disabled",
                            "But, the \"projects\" tab is enabled",
                        ])
                        .with_id("disable-projects-tab")
                        .with_fix(move || {
                            let patch = RepoPatch {
                                has_projects: Some(false),
                                ..RepoPatch::default()
                            };
                            cx.remote.update(owner, name, &patch)
                        }),
                    );
                }

                if data.has_wiki {
                    if cx.remote.wiki_exists(owner, name)? {
                        issues.push(
                            Issue::new([
                                "Expected GitHub repository to have the \"wiki\" tab disabled",
                                "But, the \"wiki\" tab is enabled and the wiki repository does exist (and may have content)",
                            ])
                            .with_id("disable-wiki-tab"),
                        );
                    } else {
                        issues.push(
                            Issue::new([
                                "Expected GitHub repository to have the \"wiki\" tab disabled",
                                "But, the \"wiki\" tab is enabled and the wiki repository does not exist",
                            ])
                            .with_id("disable-wiki-tab")
                            .with_fix(move || {
                                let patch = RepoPatch {
                                    has_wiki: Some(false),
                                    ..RepoPatch::default()
                                };
                                cx.remote.update(owner, name, &patch)
                            }),
                        );
                    }
                }

                if data.has_discussions {
                    issues.push(
                        Issue::new([
                            "Expected GitHub repository to have the \"discussions\" tab disabled",
                            "But, the \"discussions\" tab is enabled",
                        ])
                        .with_id("disable-discussions-tab"),
                    );
                }

                if data.default_branch != "main" {
                    issues.push(
                        Issue::new(vec![
                            "Expected GitHub repository to have a default branch of \"main\"".to_string(),
                            format!("But, default branch of \"{}\" was found", data.default_branch),
                        ])
                        .with_id("default-branch-main"),
                    );
                }

                Ok(issues)
            }))
    }
}

fn description_issues<'a>(data: &RepoMetadata) -> Vec<Issue<'a>> {
    let description = data.description.as_deref().map(str::trim).unwrap_or_default();
    if description.is_empty() {
        return vec![Issue::new([
            "Expected GitHub repository to have a description",
            "But, no description was found",
        ])
        .with_id("description")];
    }

    let mut issues = Vec::new();
    if !description.ends_with('.') && !description.ends_with('!') {
        issues.push(
            Issue::new([
                "Expected GitHub repository description to end with a period",
                "But, no period was found at the end of the description",
            ])
            .with_id("description-period"),
        );
    }

    let units = description.encode_utf16().count();
    if units >= MAX_DESCRIPTION_UNITS {
        issues.push(
            Issue::new(vec![
                format!(
                    "Expected GitHub repository description to have less than {} UTF-16 code units",
                    MAX_DESCRIPTION_UNITS
                ),
                format!("But, GitHub repository description has {} UTF-16 code units", units),
            ])
            .with_id("description-length"),
        );
    }
    issues
}

/// GitHub Pages URL for the repository. Names containing a dot are taken to
/// be domains of their own.
fn expected_homepage(owner: &str, name: &str) -> String {
    if name.contains('.') {
        format!("https://{}", name)
    } else {
        format!("https://{}.github.io/{}/", owner, name)
    }
}
