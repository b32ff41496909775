//! Funding file of an owner's `.github` repository.

use crate::defaults::{funding_content, FUNDING_EXEMPT_OWNERS};
use crate::error::Result;
use crate::rules::helpers::files_must_have_content;
use crate::rules::{IssueStream, RuleContext, RuleSet};

const FUNDING: &str = "FUNDING.yml";

pub struct Funding;

impl RuleSet for Funding {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            let Some(owner) = cx.project.owner() else {
                return Ok(vec![]);
            };
            if FUNDING_EXEMPT_OWNERS.contains(&owner) {
                return Ok(vec![]);
            }
            let expected = funding_content(owner);
            Ok(files_must_have_content(&cx.fs, &[(FUNDING, Some(expected.as_str()))])?
                .into_iter()
                .map(|issue| issue.with_id("content"))
                .collect())
        }))
    }
}
