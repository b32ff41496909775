//! GitHub workflow files use the `.yaml` extension.

use crate::error::Result;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const WORKFLOWS_DIR: &str = ".github/workflows";

pub struct GithubWorkflows;

impl RuleSet for GithubWorkflows {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            let files: Vec<String> = cx
                .fs
                .glob_files(&format!("{}/*.yml", WORKFLOWS_DIR))?
                .into_iter()
                .filter(|f| f.ends_with(".yml"))
                .collect();
            if files.is_empty() {
                return Ok(vec![]);
            }

            let mut message = vec![
                "Expected GitHub workflow files to use \".yaml\" extension".to_string(),
            ];
            message.extend(
                files
                    .iter()
                    .map(|f| format!("But, found \"{}\" with \".yml\" extension", f)),
            );
            Ok(vec![Issue::new(message)
                .with_id("workflow-extension")
                .with_fix(move || {
                    for file in &files {
                        let renamed = format!("{}.yaml", file.trim_end_matches(".yml"));
                        cx.fs.rename(file, &renamed)?;
                    }
                    Ok(())
                })])
        }))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::git::testing::FakeVcs;
    use crate::remote::testing::FakeRemote;
    use crate::rules::builtin::testing::{drain, plain};

    #[test]
    fn test_yml_workflows_are_renamed() {
        let temp = TempDir::new().unwrap();
        let project = plain(temp.path());
        let (vcs, remote) = (FakeVcs::default(), FakeRemote::default());
        let cx = RuleContext::new(&project, &vcs, &remote);
        cx.fs.write(".github/workflows/ci.yml", "on: push\n").unwrap();
        cx.fs.write(".github/workflows/release.yaml", "on: push\n").unwrap();

        assert_eq!(drain(&GithubWorkflows, &cx, true).unwrap(), vec!["workflow-extension"]);
        assert!(cx.fs.is_file(".github/workflows/ci.yaml"));
        assert!(!cx.fs.exists(".github/workflows/ci.yml"));
    }

    #[test]
    fn test_no_workflows_dir() {
        let temp = TempDir::new().unwrap();
        let project = plain(temp.path());
        let (vcs, remote) = (FakeVcs::default(), FakeRemote::default());
        let cx = RuleContext::new(&project, &vcs, &remote);
        assert!(drain(&GithubWorkflows, &cx, false).unwrap().is_empty());
    }
}
