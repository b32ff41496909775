//! Eclipse formatter profile for Java projects.
//!
//! Only reported in strict runs, and only while the project has no
//! `formatter.xml` of its own.

use crate::defaults::JAVA_FORMATTER_TEMPLATE;
use crate::error::Result;
use crate::rules::helpers::files_must_have_content;
use crate::rules::{IssueStream, RuleContext, RuleSet};

const FORMATTER: &str = "formatter.xml";

pub struct JavaFormatting;

impl RuleSet for JavaFormatting {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            if cx.fs.exists(FORMATTER) {
                return Ok(vec![]);
            }
            Ok(files_must_have_content(&cx.fs, &[(FORMATTER, Some(JAVA_FORMATTER_TEMPLATE))])?
                .into_iter()
                .map(|issue| issue.with_id("formatter").strict())
                .collect())
        }))
    }
}
