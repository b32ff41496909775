//! Leftover files of retired tooling must not exist.

use crate::error::Result;
use crate::rules::helpers::files_must_have_content;
use crate::rules::{IssueStream, RuleContext, RuleSet};

const RETIRED_FILES: &[&str] = &["foxxo.toml", "project.toml"];

pub struct NoFiles;

impl RuleSet for NoFiles {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            let mapping: Vec<(&str, Option<&str>)> =
                RETIRED_FILES.iter().map(|file| (*file, None)).collect();
            let issues = files_must_have_content(&cx.fs, &mapping)?;
            Ok(issues
                .into_iter()
                .map(|issue| issue.with_id("retired-file"))
                .collect())
        }))
    }
}
