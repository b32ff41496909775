//! Deno configuration lives in `deno.jsonc` with the house formatter settings.

use serde_json::json;

use crate::error::Result;
use crate::rules::helpers::files_must_have_shape;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const DENO_JSON: &str = "deno.json";
const DENO_JSONC: &str = "deno.jsonc";

pub struct DenoJson;

impl RuleSet for DenoJson {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new()
            .check(move || {
                if !cx.fs.exists(DENO_JSON) {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new(vec![
                    format!("Expected file \"{}\" to not exist", DENO_JSON),
                    "But, found the file".to_string(),
                ])
                .with_id("name")
                .with_fix(move || {
                    if cx.fs.exists(DENO_JSONC) {
                        cx.fs.remove(DENO_JSON)
                    } else {
                        cx.fs.rename(DENO_JSON, DENO_JSONC)
                    }
                })])
            })
            .check(move || {
                if !cx.fs.exists(DENO_JSONC) {
                    return Ok(vec![]);
                }
                let shape = json!({
                    "fmt": {
                        "useTabs": true,
                        "lineWidth": 100,
                        "indentWidth": 3,
                        "semiColons": false,
                        "singleQuote": true,
                    }
                });
                Ok(files_must_have_shape(&cx.fs, DENO_JSONC, &shape)?
                    .into_iter()
                    .map(|issue| issue.with_id("fmt"))
                    .collect())
            }))
    }
}
