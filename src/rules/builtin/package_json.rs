//! `package.json` conventions.
//!
//! `private` is always explicit. Private packages carry no publishing
//! metadata; public packages with a known GitHub remote point their `bugs`
//! and `repository` fields at it and have keywords.

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::merge::json::{detect_indent, to_string_indented};
use crate::rules::helpers::files_must_have_shape;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const PACKAGE_JSON: &str = "package.json";

pub struct PackageJson;

impl RuleSet for PackageJson {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new()
            .check(move || {
                let (manifest, _) = read_manifest(cx)?;
                if manifest.get("private").is_some_and(Value::is_boolean) {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new(format!(
                    "\"private\" field must be specified in {}",
                    PACKAGE_JSON
                ))
                .with_id("private")
                .with_fix(move || set_private(cx))])
            })
            .check(move || {
                let (manifest, _) = read_manifest(cx)?;
                let shape = if is_private(&manifest) {
                    json!({
                        "author": {"__delete": null},
                        "bugs": {"__delete": null},
                        "repository": {"__delete": null},
                    })
                } else if let (Some(owner), name) = (cx.project.owner(), cx.project.name()) {
                    json!({
                        "bugs": {"url": format!("https://github.com/{}/{}/issues", owner, name)},
                        "repository": {
                            "__replace": true,
                            "type": "git",
                            "url": format!("https://github.com/{}/{}", owner, name),
                        },
                    })
                } else {
                    return Ok(vec![]);
                };
                Ok(files_must_have_shape(&cx.fs, PACKAGE_JSON, &shape)?
                    .into_iter()
                    .map(|issue| issue.with_id("shape"))
                    .collect())
            })
            .check(move || {
                let (manifest, _) = read_manifest(cx)?;
                let empty_keywords = manifest
                    .get("keywords")
                    .and_then(Value::as_array)
                    .is_some_and(|keywords| keywords.is_empty());
                if is_private(&manifest) || !empty_keywords {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new("Must not have empty keywords if public").with_id("keywords")])
            }))
    }
}

fn read_manifest(cx: &RuleContext<'_>) -> Result<(Value, String)> {
    let content = cx.fs.read_to_string(PACKAGE_JSON)?;
    let manifest = serde_json::from_str(&content).map_err(|e| Error::Content {
        file: PACKAGE_JSON.to_string(),
        message: e.to_string(),
    })?;
    Ok((manifest, content))
}

fn is_private(manifest: &Value) -> bool {
    manifest.get("private").and_then(Value::as_bool).unwrap_or(false)
}

fn set_private(cx: &RuleContext<'_>) -> Result<()> {
    let (mut manifest, content) = read_manifest(cx)?;
    let Value::Object(map) = &mut manifest else {
        return Err(Error::Content {
            file: PACKAGE_JSON.to_string(),
            message: "expected a JSON object".to_string(),
        });
    };
    map.insert("private".to_string(), Value::Bool(true));
    cx.fs
        .write(PACKAGE_JSON, &to_string_indented(&manifest, &detect_indent(&content))?)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::context::ProjectContext;
    use crate::git::testing::FakeVcs;
    use crate::remote::testing::FakeRemote;
    use crate::rules::builtin::testing::{drain, plain, with_remote};

    fn run(project: &ProjectContext, manifest: &str, fix: bool) -> (Vec<String>, Value) {
        let (vcs, remote) = (FakeVcs::default(), FakeRemote::default());
        let cx = RuleContext::new(project, &vcs, &remote);
        cx.fs.write(PACKAGE_JSON, manifest).unwrap();
        let ids = drain(&PackageJson, &cx, fix).unwrap();
        let after = serde_json::from_str(&cx.fs.read_to_string(PACKAGE_JSON).unwrap()).unwrap();
        (ids, after)
    }

    #[test]
    fn test_missing_private_is_set_then_metadata_removed() {
        let temp = TempDir::new().unwrap();
        let project = plain(temp.path());
        let (ids, after) = run(&project, "{\n\t\"name\": \"w\",\n\t\"author\": \"me\"\n}\n", true);
        assert_eq!(ids, vec!["private", "shape"]);
        assert_eq!(after, json!({"name": "w", "private": true}));
    }

    #[test]
    fn test_public_package_points_at_remote() {
        let temp = TempDir::new().unwrap();
        let project = with_remote(temp.path(), "acme", "widget", "git@github.com:acme/widget");
        let (ids, after) = run(
            &project,
            r#"{"name": "widget", "private": false, "keywords": ["x"], "repository": "acme/widget"}"#,
            true,
        );
        assert_eq!(ids, vec!["shape"]);
        assert_eq!(after["bugs"]["url"], json!("https://github.com/acme/widget/issues"));
        assert_eq!(
            after["repository"],
            json!({"type": "git", "url": "https://github.com/acme/widget"})
        );
    }

    #[test]
    fn test_public_package_needs_keywords() {
        let temp = TempDir::new().unwrap();
        let project = plain(temp.path());
        let (ids, _) = run(&project, r#"{"name": "w", "private": false, "keywords": []}"#, false);
        assert_eq!(ids, vec!["keywords"]);
    }

    #[test]
    fn test_invalid_manifest_is_an_error() {
        let temp = TempDir::new().unwrap();
        let project = plain(temp.path());
        let (vcs, remote) = (FakeVcs::default(), FakeRemote::default());
        let cx = RuleContext::new(&project, &vcs, &remote);
        cx.fs.write(PACKAGE_JSON, "{").unwrap();
        assert!(matches!(drain(&PackageJson, &cx, false), Err(Error::Content { .. })));
    }
}
