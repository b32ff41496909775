//! Remote URL conventions.
//!
//! Every remote URL drops the `.git` suffix. With a known GitHub owner and
//! name, the tracked remote also uses the SSH form
//! `git@github.com:<owner>/<name>`.

use log::warn;

use crate::context::ProjectContext;
use crate::error::Result;
use crate::git::Remote;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const GITHUB_SSH_PREFIX: &str = "git@github.com:";

/// `200-version-control/12-git-remote-url`: one issue per remote ending in `.git`.
pub struct GitSuffix;

impl RuleSet for GitSuffix {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            Ok(cx
                .vcs
                .remotes()?
                .into_iter()
                .filter_map(|remote| suffix_issue(cx, remote))
                .collect())
        }))
    }
}

fn suffix_issue<'a>(cx: &'a RuleContext<'a>, remote: Remote) -> Option<Issue<'a>> {
    let stripped = remote.url.strip_suffix(".git")?.to_string();
    Some(
        Issue::new(format!("Remote URL \"{}\" should not end in \".git\"", remote.url))
            .with_id("git-suffix")
            .with_fix(move || cx.vcs.set_remote_url(&remote.name, &stripped)),
    )
}

/// `300-remote-url/11-git-remote-url`: replaces the layer-two check once the
/// owner is known, adding the SSH form check for the tracked remote.
pub struct GithubRemoteUrl;

impl RuleSet for GithubRemoteUrl {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new()
            .check(move || {
                let bad: Vec<Remote> = cx
                    .vcs
                    .remotes()?
                    .into_iter()
                    .filter(|r| r.url.ends_with(".git"))
                    .collect();
                if bad.is_empty() {
                    return Ok(vec![]);
                }
                let mut message: Vec<String> = bad
                    .iter()
                    .map(|r| format!("Remote URL \"{}\" should not end in \".git\"", r.url))
                    .collect();
                message.dedup();
                Ok(vec![Issue::new(message).with_id("git-suffix").with_fix(move || {
                    for remote in &bad {
                        let stripped = remote.url.strip_suffix(".git").unwrap_or(&remote.url);
                        cx.vcs.set_remote_url(&remote.name, stripped)?;
                    }
                    Ok(())
                })])
            })
            .check(move || {
                let ProjectContext::WithRemote {
                    remote_name,
                    owner,
                    name,
                    ..
                } = cx.project
                else {
                    return Ok(vec![]);
                };
                let url = cx.vcs.remote_url(remote_name)?;
                if !url.contains("github.com") {
                    warn!(
                        "skipping remote URL check for {:?} since it is not a GitHub URL",
                        url
                    );
                    return Ok(vec![]);
                }

                let expected = format!("{}{}/{}", GITHUB_SSH_PREFIX, owner, name);
                if url == expected {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new(format!(
                    "Remote name \"{}\" has URL \"{}\" but it should be \"{}\"",
                    remote_name, url, expected
                ))
                .with_id("ssh-url")
                .with_fix(move || cx.vcs.set_remote_url(remote_name, &expected))])
            }))
    }
}
