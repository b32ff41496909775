//! clang-format and clangd configuration for C projects.

use crate::error::Result;
use crate::rules::helpers::files_must_have_content;
use crate::rules::{IssueStream, RuleContext, RuleSet};

const CLANG_FORMAT: &str = ".clang-format";
const CLANG_FORMAT_CONTENT: &str = "{
\tBasedOnStyle: LLVM,
\tUseTab: ForIndentation,
\tIndentWidth: 3,
\tTabWidth: 3,
\tAlignEscapedNewlines: Left,
\tAllowShortFunctionsOnASingleLine: Empty,
\tAlwaysBreakTemplateDeclarations: Yes,
\tColumnLimit: 120,
}
";

const CLANGD: &str = ".clangd";
const CLANGD_CONTENT: &str = "CompileFlags:\n  Add: [-xc]\n";

pub struct ClangFormat;

impl RuleSet for ClangFormat {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            Ok(files_must_have_content(&cx.fs, &[(CLANG_FORMAT, Some(CLANG_FORMAT_CONTENT))])?
                .into_iter()
                .map(|issue| issue.with_id("content"))
                .collect())
        }))
    }
}

pub struct Clangd;

impl RuleSet for Clangd {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            Ok(files_must_have_content(&cx.fs, &[(CLANGD, Some(CLANGD_CONTENT))])?
                .into_iter()
                .map(|issue| issue.with_id("content"))
                .collect())
        }))
    }
}
