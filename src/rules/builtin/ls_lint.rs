//! `.ls-lint.yml` exists and is not empty.

use crate::defaults::LS_LINT_TEMPLATE;
use crate::error::Result;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const LS_LINT: &str = ".ls-lint.yml";

pub struct LsLint;

impl RuleSet for LsLint {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        let write_template = move || cx.fs.write(LS_LINT, LS_LINT_TEMPLATE);

        Ok(IssueStream::new().check(move || {
            let issue = match cx.fs.read_optional(LS_LINT)? {
                None => Issue::new(format!("Expected ls-lint file \"{}\" to exist", LS_LINT))
                    .with_id("missing"),
                Some(content) if content.is_empty() => {
                    Issue::new(format!("Expected ls-lint file \"{}\" to not be empty", LS_LINT))
                        .with_id("empty")
                }
                Some(_) => return Ok(vec![]),
            };
            Ok(vec![issue.with_fix(write_template)])
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

    fn check(content: Option<&str>, fix: bool) -> (Vec<String>, Option<String>) {
        let temp = TempDir::new().unwrap();
        let project = plain(temp.path());
        let (vcs, remote) = (FakeVcs::default(), FakeRemote::default());
        let cx = RuleContext::new(&project, &vcs, &remote);
        if let Some(content) = content {
            cx.fs.write(LS_LINT, content).unwrap();
        }
        let ids = drain(&LsLint, &cx, fix).unwrap();
        (ids, cx.fs.read_optional(LS_LINT).unwrap())
    }

    #[test]
    fn test_missing_and_empty_get_template() {
        let (ids, content) = check(None, true);
        assert_eq!(ids, vec!["missing"]);
        assert_eq!(content.as_deref(), Some(LS_LINT_TEMPLATE));

        let (ids, content) = check(Some(""), true);
        assert_eq!(ids, vec!["empty"]);
        assert_eq!(content.as_deref(), Some(LS_LINT_TEMPLATE));
    }

    #[test]
    fn test_own_configuration_is_kept() {
        let (ids, content) = check(Some("ls:\n  .rs: snake_case\n"), false);
        assert!(ids.is_empty());
        assert_eq!(content.as_deref(), Some("ls:\n  .rs: snake_case\n"));
    }
}
