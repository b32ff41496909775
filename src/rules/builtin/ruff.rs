//! Ruff is configured from `ruff.toml` only.
//!
//! Ruff stops at the first configuration file it finds, so a `[tool.ruff]`
//! table in `pyproject.toml` would shadow `ruff.toml`. Removing that table is
//! left to the author since rewriting `pyproject.toml` would drop its comments.

use crate::error::{Error, Result};
use crate::rules::helpers::files_must_have_content;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const RUFF_TOML: &str = "ruff.toml";
const PYPROJECT: &str = "pyproject.toml";
const RUFF_CONTENT: &str = "[lint]
# https://docs.astral.sh/ruff/formatter/#format-suppression
ignore = [
\t'W191',   # tab-indentation
\t'E111',   # indentation-with-invalid-multiple
\t'E114',   # indentation-with-invalid-multiple-comment
\t'E117',   # over-indented
\t'D206',   # docstring-tab-indentation
\t'D300',   # triple-single-quotes
\t'Q000',   # bad-quotes-inline-string
\t'Q001',   # bad-quotes-multiline-string
\t'Q002',   # bad-quotes-docstring
\t'Q003',   # avoidable-escaped-quote
\t'COM812', # missing-trailing-comma
\t'COM819', # prohibited-trailing-comma
]

[format]
docstring-code-format = true
docstring-code-line-length = 20
indent-style = 'tab'
";

pub struct Ruff;

impl RuleSet for Ruff {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new()
            .check(move || {
                Ok(files_must_have_content(&cx.fs, &[(RUFF_TOML, Some(RUFF_CONTENT))])?
                    .into_iter()
                    .map(|issue| issue.with_id("content"))
                    .collect())
            })
            .check(move || {
                let Some(content) = cx.fs.read_optional(PYPROJECT)? else {
                    return Ok(vec![]);
                };
                let pyproject: toml::Table = toml::from_str(&content).map_err(|e| Error::Content {
                    file: PYPROJECT.to_string(),
                    message: e.to_string(),
                })?;
                let has_ruff = pyproject
                    .get("tool")
                    .and_then(|tool| tool.get("ruff"))
                    .is_some();
                if !has_ruff {
                    return Ok(vec![]);
                }
                Ok(vec![Issue::new(vec![
                    format!("Expected file \"{}\" to have no [tool.ruff] table", PYPROJECT),
                    format!("But, found one; move its settings to \"{}\"", RUFF_TOML),
                ])
                .with_id("pyproject")])
            }))
    }
}
