//! `.editorconfig` exists, parses and is the root configuration.

use ini::Ini;

use crate::defaults::EDITORCONFIG_TEMPLATE;
use crate::error::Result;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const EDITORCONFIG: &str = ".editorconfig";

pub struct EditorConfig;

impl RuleSet for EditorConfig {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        let write_template = move || cx.fs.write(EDITORCONFIG, EDITORCONFIG_TEMPLATE);

        Ok(IssueStream::new()
            .check(move || {
                if cx.fs.exists(EDITORCONFIG) {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new(format!(
                    "Expected EditorConfig file \"{}\" to exist",
                    EDITORCONFIG
                ))
                .with_id("missing")
                .with_fix(write_template)])
            })
            .check(move || {
                let Some(content) = cx.fs.read_optional(EDITORCONFIG)? else {
                    return Ok(vec![]);
                };
                if !content.trim().is_empty() {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new(format!(
                    "Expected EditorConfig file \"{}\" to not be empty",
                    EDITORCONFIG
                ))
                .with_id("empty")
                .with_fix(write_template)])
            })
            .check(move || {
                let Some(content) = cx.fs.read_optional(EDITORCONFIG)? else {
                    return Ok(vec![]);
                };
                if content.trim().is_empty() {
                    return Ok(vec![]);
                }
                let parsed = match Ini::load_from_str(&content) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        return Ok(vec![Issue::new(vec![
                            format!("Expected EditorConfig file \"{}\" to parse", EDITORCONFIG),
                            format!("But, found error: {}", e),
                        ])
                        .with_id("parse")])
                    }
                };
                if declares_root(&parsed) {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new(vec![
                    format!(
                        "Expected EditorConfig file \"{}\" to declare \"root = true\"",
                        EDITORCONFIG
                    ),
                    "But, found no \"root\" property before the first section".to_string(),
                ])
                .with_id("root")
                .with_fix(move || cx.fs.write(EDITORCONFIG, &format!("root = true\n\n{}", content)))])
            }))
    }
}

fn declares_root(parsed: &Ini) -> bool {
    parsed
        .general_section()
        .get("root")
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}
