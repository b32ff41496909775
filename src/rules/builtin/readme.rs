//! README conventions.
//!
//! A project has exactly one readme, at `README.md` in the root, whose first
//! block is a title naming the project. Readmes under `docs/` are not
//! checked; a readme in `.github/` would shadow the root one on GitHub.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::error::Result;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const README: &str = "README.md";

pub struct Readme;

impl RuleSet for Readme {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new()
            .check(move || {
                if cx.fs.glob(".github/*readme*")?.is_empty() {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new([
                    "Expected to find a single readme file at the root project directory",
                    "But, found readme files in the \".github\" directory",
                ])
                .with_id("github-dir")])
            })
            .check(move || {
                let files = cx.fs.glob_files("*readme*")?;
                let issue = match files.as_slice() {
                    [] => Issue::new(["Expected to find a single readme file", "But, found no readme files"])
                        .with_id("missing")
                        .with_fix(move || cx.fs.write(README, &format!("# {}\n", cx.project.name()))),
                    [only] if only == README => return Ok(vec![]),
                    [only] => {
                        let only = only.clone();
                        Issue::new(vec![
                            format!("Expected readme file with name of \"{}\"", README),
                            format!("But, found readme file with name of \"{}\"", only),
                        ])
                        .with_id("name")
                        .with_fix(move || cx.fs.rename(&only, README))
                    }
                    _ => Issue::new([
                        "Expected to find a single readme file",
                        "But, found more than one readme file",
                    ])
                    .with_id("multiple"),
                };
                Ok(vec![issue])
            })
            .check(move || {
                let Some(content) = cx.fs.read_optional(README)? else {
                    return Ok(vec![]);
                };
                let Some(title) = leading_title(&content) else {
                    return Ok(vec![Issue::new([
                        "Expected readme file to have a title matching the project name",
                        "But, no title was found",
                    ])
                    .with_id("title")]);
                };
                if title_matches(&title, cx.project.name()) {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new(vec![
                    "Expected readme file to have a title matching the project name".to_string(),
                    format!("But, found title \"{}\"", title),
                ])
                .with_id("title-name")])
            }))
    }
}

/// Text of the heading that opens the document, if it opens with one.
fn leading_title(content: &str) -> Option<String> {
    let mut events = Parser::new(content);
    if !matches!(events.next()?, Event::Start(Tag::Heading { .. })) {
        return None;
    }
    let mut title = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(text) | Event::Code(text) => title.push_str(&text),
            _ => {}
        }
    }
    Some(title)
}

/// Titles match case-insensitively, with spaces standing in for dashes.
fn title_matches(title: &str, name: &str) -> bool {
    let normalize = |s: &str| s.trim().to_lowercase().replace(' ', "-");
    normalize(title).starts_with(&normalize(name))
}
