//! Building blocks shared by the built-in rule sets.
//!
//! Each helper inspects the project once and returns the issues it found,
//! ready to be wrapped in an [`IssueStream`](super::IssueStream) check.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::filesystem::ProjectFs;
use crate::merge::json::{changed_paths, detect_indent, strip_jsonc, to_string_indented};
use crate::merge::merged;
use crate::rules::Issue;

const RULE: &str = "================================================================================";

/// Files that must have exact content, or (with `None`) must not exist.
pub fn files_must_have_content<'a>(
    fs: &ProjectFs,
    mapping: &[(&str, Option<&str>)],
) -> Result<Vec<Issue<'a>>> {
    let mut issues = Vec::new();
    for &(file, expected) in mapping {
        let file = file.strip_prefix("./").unwrap_or(file).to_string();
        match expected {
            None => {
                if fs.exists(&file) {
                    let fs = fs.clone();
                    issues.push(
                        Issue::new(vec![
                            format!("Expected file \"{}\" to not exist", file),
                            "But, found the file".to_string(),
                        ])
                        .with_fix(move || fs.remove(&file)),
                    );
                }
            }
            Some(expected) => {
                let expected = expected.to_string();
                let message = match fs.read_optional(&file)? {
                    Some(actual) if actual == expected => continue,
                    Some(actual) => vec![
                        format!("Expected file \"{}\" to have content:", file),
                        RULE.to_string(),
                        expected.clone(),
                        RULE.to_string(),
                        "But, the file has content:".to_string(),
                        RULE.to_string(),
                        actual,
                        RULE.to_string(),
                    ],
                    None => vec![
                        format!("Expected file \"{}\" to exist and have content:", file),
                        RULE.to_string(),
                        expected.clone(),
                        RULE.to_string(),
                        "But, the file does not exist".to_string(),
                    ],
                };
                let fs = fs.clone();
                issues.push(Issue::new(message).with_fix(move || fs.write(&file, &expected)));
            }
        }
    }
    Ok(issues)
}

/// `good` is the only accepted name; each of `bad` must not exist.
///
/// A bad name is renamed to the good one when the good one is free.
pub fn files_must_have_name<'a>(fs: &ProjectFs, good: &str, bad: &[&str]) -> Vec<Issue<'a>> {
    let good = good.strip_prefix("./").unwrap_or(good).to_string();
    let mut issues = Vec::new();
    for &bad_file in bad {
        let bad_file = bad_file.strip_prefix("./").unwrap_or(bad_file).to_string();
        if !fs.exists(&bad_file) {
            continue;
        }
        if fs.exists(&good) {
            issues.push(Issue::new(vec![
                format!(
                    "Expected file \"{}\" to not exist because \"{}\" already exists",
                    bad_file, good
                ),
                "But, found both files exist".to_string(),
            ]));
        } else {
            let fs = fs.clone();
            let good = good.clone();
            issues.push(
                Issue::new(vec![
                    format!("Expected file to be named \"{}\"", good),
                    format!("But, found file named \"{}\"", bad_file),
                ])
                .with_fix(move || fs.rename(&bad_file, &good)),
            );
        }
    }
    issues
}

/// A JSON file must look like itself with `shape` deep-merged into it.
///
/// `.jsonc` files may carry comments and trailing commas. The fix rewrites
/// the file with the merged document, keeping its indentation and key order
/// (comments are not kept).
pub fn files_must_have_shape<'a>(fs: &ProjectFs, file: &str, shape: &Value) -> Result<Vec<Issue<'a>>> {
    let file = file.strip_prefix("./").unwrap_or(file).to_string();
    let content = fs.read_to_string(&file)?;
    let json = if file.ends_with(".jsonc") {
        Cow::Owned(strip_jsonc(&content))
    } else {
        Cow::Borrowed(content.as_str())
    };
    let actual: Value = serde_json::from_str(&json).map_err(|e| Error::Content {
        file: file.clone(),
        message: e.to_string(),
    })?;
    let expected = merged(&actual, shape);
    if expected == actual {
        return Ok(Vec::new());
    }

    let mut message = vec![format!("Expected file \"{}\" to have the correct shape", file)];
    message.extend(
        changed_paths(&expected, &actual)
            .into_iter()
            .map(|path| format!("Field \"{}\" differs", path)),
    );

    let indent = detect_indent(&content);
    let rewritten = to_string_indented(&expected, &indent)?;
    let fs = fs.clone();
    Ok(vec![Issue::new(message).with_fix(move || fs.write(&file, &rewritten))])
}
