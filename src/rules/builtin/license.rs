//! License files.
//!
//! A directory that is not published has no license files at all
//! ([`NoLicense`]). Once a project has a remote, [`License`] takes over: a
//! single license lives at `LICENSE`, several licenses are all named
//! `LICENSE-*`. A missing license is never fixed automatically since the
//! choice of license is the author's.

use crate::error::Result;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const LICENSE: &str = "LICENSE";
const LICENSE_GLOB: &str = "*license*";

/// No license files in an unpublished directory.
pub struct NoLicense;

impl RuleSet for NoLicense {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            let files = cx.fs.glob_files(LICENSE_GLOB)?;
            if files.is_empty() {
                return Ok(vec![]);
            }
            let message = vec![
                "Expected to find no license files".to_string(),
                format!("But, {} license files were found", files.len()),
            ];
            Ok(vec![Issue::new(message).with_id("present").with_fix(move || {
                for file in &files {
                    cx.fs.remove(file)?;
                }
                Ok(())
            })])
        }))
    }
}

pub struct License;

impl RuleSet for License {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new()
            .check(move || {
                let files = cx.fs.glob_files(LICENSE_GLOB)?;
                let issue = match files.as_slice() {
                    [] => Issue::new([
                        "Expected to find a license file",
                        "But, no license file was found",
                    ])
                    .with_id("missing"),
                    [only] if only == LICENSE => return Ok(vec![]),
                    [only] => {
                        let only = only.clone();
                        Issue::new(vec![
                            format!(
                                "For a single license file, expected the file to have a name of \"{}\"",
                                LICENSE
                            ),
                            format!("But, found license file with name of \"{}\"", only),
                        ])
                        .with_id("name")
                        .with_fix(move || cx.fs.rename(&only, LICENSE))
                    }
                    many if many.iter().all(|f| f.starts_with("LICENSE-")) => return Ok(vec![]),
                    _ => Issue::new([
                        "For multiple license files, expected to find all of their names prefixed with \"LICENSE-\"",
                        "But, found at least one without that prefix",
                    ])
                    .with_id("prefix"),
                };
                Ok(vec![issue])
            })
            .check(move || {
                let mut issues = Vec::new();
                for file in cx.fs.glob_files(LICENSE_GLOB)? {
                    if cx.fs.read_to_string(&file)?.trim().is_empty() {
                        issues.push(
                            Issue::new(vec![
                                "Expected to find all license files with content".to_string(),
                                format!("But, found license file \"{}\" with no content", file),
                            ])
                            .with_id("empty"),
                        );
                    }
                }
                Ok(issues)
            }))
    }
}
