//! `.gitattributes` hygiene.

use crate::error::Result;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const GITATTRIBUTES: &str = ".gitattributes";
const RETIRED_MARKERS: &[&str] = &["# foxxo", "#section:fox-tools"];
const BAKE_LINE: &str = "bake linguist-generated";

pub struct GitAttributes;

impl RuleSet for GitAttributes {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new()
            .check(move || {
                let content = cx.fs.read_optional(GITATTRIBUTES)?.unwrap_or_default();
                Ok(RETIRED_MARKERS
                    .iter()
                    .filter(|marker| content.contains(**marker))
                    .map(|marker| {
                        Issue::new(format!(
                            "Expected to find no line that contains \"{}\"",
                            marker
                        ))
                        .with_id("bad-line")
                        .with_fix(move || remove_lines_containing(cx, marker))
                    })
                    .collect())
            })
            .check(move || {
                let content = cx.fs.read_optional(GITATTRIBUTES)?.unwrap_or_default();
                if !cx.fs.exists("bake") || content.contains(BAKE_LINE) {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new(vec![
                    format!("Expected to find a line that contains \"{}\"", BAKE_LINE),
                    "The file \"bake\" exists.".to_string(),
                ])
                .with_id("bake-generated")
                .with_fix(move || {
                    let mut updated = content;
                    if !updated.is_empty() && !updated.ends_with('\n') {
                        updated.push('\n');
                    }
                    updated.push_str(BAKE_LINE);
                    updated.push('\n');
                    cx.fs.write(GITATTRIBUTES, &updated)
                })])
            }))
    }
}

fn remove_lines_containing(cx: &RuleContext<'_>, marker: &str) -> Result<()> {
    let content = cx.fs.read_optional(GITATTRIBUTES)?.unwrap_or_default();
    let kept: String = content
        .lines()
        .filter(|line| !line.contains(marker))
        .map(|line| format!("{}\n", line))
        .collect();
    cx.fs.write(GITATTRIBUTES, &kept)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::git::testing::FakeVcs;
    use crate::remote::testing::FakeRemote;
    use crate::rules::builtin::testing::{drain, plain};

    #[test]
    fn test_retired_markers_are_removed() {
        let temp = TempDir::new().unwrap();
        let project = plain(temp.path());
        let (vcs, remote) = (FakeVcs::default(), FakeRemote::default());
        let cx = RuleContext::new(&project, &vcs, &remote);
        cx.fs
            .write(GITATTRIBUTES, "* text=auto\n# foxxo start\n*.png binary\n")
            .unwrap();

        assert_eq!(drain(&GitAttributes, &cx, true).unwrap(), vec!["bad-line"]);
        assert_eq!(
            cx.fs.read_to_string(GITATTRIBUTES).unwrap(),
            "* text=auto\n*.png binary\n"
        );
    }

    #[test]
    fn test_bake_line_is_appended() {
        let temp = TempDir::new().unwrap();
        let project = plain(temp.path());
        let (vcs, remote) = (FakeVcs::default(), FakeRemote::default());
        let cx = RuleContext::new(&project, &vcs, &remote);
        cx.fs.write("bake", "#!/usr/bin/env bash\n").unwrap();
        cx.fs.write(GITATTRIBUTES, "* text=auto").unwrap();

        assert_eq!(drain(&GitAttributes, &cx, true).unwrap(), vec!["bake-generated"]);
        assert_eq!(
            cx.fs.read_to_string(GITATTRIBUTES).unwrap(),
            "* text=auto\nbake linguist-generated\n"
        );
        assert!(drain(&GitAttributes, &cx, false).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_without_bake_is_clean() {
        let temp = TempDir::new().unwrap();
        let project = plain(temp.path());
        let (vcs, remote) = (FakeVcs::default(), FakeRemote::default());
        let cx = RuleContext::new(&project, &vcs, &remote);
        assert!(drain(&GitAttributes, &cx, false).unwrap().is_empty());
    }
}
