//! The local directory is named after the remote repository.

use crate::error::Result;
use crate::git::repo_name_from_url;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

pub struct ProjectName;

impl RuleSet for ProjectName {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            let local = cx
                .fs
                .root()
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            Ok(cx
                .vcs
                .remotes()?
                .into_iter()
                .filter_map(|remote| {
                    let remote_name = repo_name_from_url(&remote.url).to_string();
                    (remote_name != local).then(|| {
                        Issue::new(vec![
                            "Local and remote project names do not match".to_string(),
                            format!("Local project has name of \"{}\"", local),
                            format!(
                                "Remote \"{}\" has project name of \"{}\"",
                                remote.name, remote_name
                            ),
                        ])
                        .with_id("local-remote-name-mismatch")
                    })
                })
                .collect())
        }))
    }
}
