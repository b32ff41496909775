//! Lefthook git hooks.
//!
//! One configuration file, `.lefthook.yaml`, that insists on the hooks being
//! installed. Whether they actually are installed in this clone is a strict
//! check.

use std::process::Command;

use crate::error::{Error, Result};
use crate::rules::helpers::{files_must_have_content, files_must_have_name};
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const CONFIG: &str = ".lefthook.yaml";
const ALTERNATE_NAMES: &[&str] = &[".lefthook.yml", "lefthook.yaml", "lefthook.yml"];
const OTHER_FORMATS: &[&str] = &[".lefthook.toml", ".lefthook.json", "lefthook.toml", "lefthook.json"];
const INSTALLED_CHECKSUM: &str = ".git/info/lefthook.checksum";
const ASSERT_INSTALLED_KEY: &str = "assert_lefthook_installed";

pub struct Lefthook;

impl RuleSet for Lefthook {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new()
            .check(move || {
                Ok(files_must_have_name(&cx.fs, CONFIG, ALTERNATE_NAMES)
                    .into_iter()
                    .map(|issue| issue.with_id("name"))
                    .collect())
            })
            .check(move || {
                let mapping: Vec<(&str, Option<&str>)> =
                    OTHER_FORMATS.iter().map(|file| (*file, None)).collect();
                Ok(files_must_have_content(&cx.fs, &mapping)?
                    .into_iter()
                    .map(|issue| issue.with_id("alternate"))
                    .collect())
            })
            .check(move || {
                if cx.fs.exists(CONFIG) {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new(format!("Expected to find a \"{}\" file", CONFIG))
                    .with_id("missing")
                    .with_fix(move || {
                        cx.fs.write(CONFIG, &format!("{}: true\n", ASSERT_INSTALLED_KEY))
                    })])
            })
            .check(move || {
                if !cx.fs.exists(".git") || cx.fs.exists(INSTALLED_CHECKSUM) {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new("Expected lefthook to be activated for current project")
                    .with_id("installed")
                    .strict()
                    .with_fix(move || lefthook_install(cx))])
            })
            .check(move || {
                let Some(content) = cx.fs.read_optional(CONFIG)? else {
                    return Ok(vec![]);
                };
                let config: serde_yaml::Value = serde_yaml::from_str(&content)?;
                let Some(mapping) = config.as_mapping() else {
                    return Ok(vec![Issue::new(format!(
                        "Expected \"{}\" to contain an object",
                        CONFIG
                    ))
                    .with_id("not-object")]);
                };
                let asserted = mapping
                    .get(ASSERT_INSTALLED_KEY)
                    .and_then(serde_yaml::Value::as_bool)
                    .unwrap_or(false);
                if asserted {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new(format!(
                    "Expected to find property \"{}\" set to \"true\"",
                    ASSERT_INSTALLED_KEY
                ))
                .with_id("assert-installed")])
            }))
    }
}

fn lefthook_install(cx: &RuleContext<'_>) -> Result<()> {
    let output = Command::new("lefthook")
        .arg("install")
        .current_dir(cx.fs.root())
        .output()
        .map_err(|e| Error::Command {
            command: "lefthook install".to_string(),
            message: e.to_string(),
        })?;
    if !output.status.success() {
        return Err(Error::Command {
            command: "lefthook install".to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
