//! Code of conduct files of an owner's `.github` repository.
//!
//! The organization-wide code of conduct lives in the `.github` repository,
//! at the root or under `.github/` or `docs/`.

use crate::error::Result;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const CODE_OF_CONDUCT_GLOBS: &[&str] = &[
    "*code_of_conduct*",
    ".github/*code_of_conduct*",
    "docs/*code_of_conduct*",
];

pub struct CodeOfConduct;

impl RuleSet for CodeOfConduct {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            let mut issues = Vec::new();
            for pattern in CODE_OF_CONDUCT_GLOBS {
                for file in cx.fs.glob_files(pattern)? {
                    let content = cx.fs.read_to_string(&file)?;
                    if !content.starts_with('\n') {
                        continue;
                    }
                    let trimmed = content.trim_start_matches('\n').to_string();
                    issues.push(
                        Issue::new(vec![
                            "Expected code of conduct to not start with a newline".to_string(),
                            format!("But, \"{}\" starts with a newline", file),
                        ])
                        .with_id("leading-newline")
                        .with_fix(move || cx.fs.write(&file, &trimmed)),
                    );
                }
            }
            Ok(issues)
        }))
    }
}
