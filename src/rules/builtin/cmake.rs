//! `CMakeLists.txt` declares the basics every C++ project here relies on.
//!
//! None of these are fixed automatically: where the calls belong depends on
//! the rest of the file.

use regex::Regex;

use crate::error::Result;
use crate::rules::{Issue, IssueStream, RuleContext, RuleSet};

const CMAKE_LISTS: &str = "CMakeLists.txt";

/// `(issue id, pattern, expected call, what was missing)`.
const REQUIRED_CALLS: &[(&str, &str, &str, &str)] = &[
    (
        "minimum-required",
        r"(?i)\A[ \t]*cmake_minimum_required[ \t]*\([ \t]*VERSION[ \t]+",
        "cmake_minimum_required(VERSION ...)",
        "it could not be found",
    ),
    (
        "project",
        r"(?im)^[ \t]*project[ \t]*\(",
        "project(...)",
        "it could not be found",
    ),
    (
        "export-compile-commands",
        r"(?im)^[ \t]*set[ \t]*\([ \t]*CMAKE_EXPORT_COMPILE_COMMANDS[ \t]+ON[ \t]*\)",
        "set(CMAKE_EXPORT_COMPILE_COMMANDS ON)",
        "found no CMAKE_EXPORT_COMPILE_COMMANDS setting",
    ),
    (
        "color-diagnostics",
        r"(?im)^[ \t]*set[ \t]*\([ \t]*CMAKE_COLOR_DIAGNOSTICS[ \t]+ON[ \t]*\)",
        "set(CMAKE_COLOR_DIAGNOSTICS ON)",
        "found no CMAKE_COLOR_DIAGNOSTICS setting",
    ),
];

pub struct Cmake;

impl RuleSet for Cmake {
    fn issues<'a>(&'a self, cx: &'a RuleContext<'a>) -> Result<IssueStream<'a>> {
        Ok(IssueStream::new().check(move || {
            let Some(content) = cx.fs.read_optional(CMAKE_LISTS)? else {
                return Ok(vec![]);
            };
            let mut issues = Vec::new();
            for &(id, pattern, call, missing) in REQUIRED_CALLS {
                if Regex::new(pattern)?.is_match(&content) {
                    continue;
                }
                issues.push(
                    Issue::new(vec![
                        format!("Expected file \"{}\" to include {}", CMAKE_LISTS, call),
                        format!("But, {}", missing),
                    ])
                    .with_id(id),
                );
            }
            Ok(issues)
        }))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::git::testing::FakeVcs;
    use crate::remote::testing::FakeRemote;
    use crate::rules::builtin::testing::{drain, plain};

    fn check(content: Option<&str>) -> Vec<String> {
        let temp = TempDir::new().unwrap();
        let project = plain(temp.path());
        let (vcs, remote) = (FakeVcs::default(), FakeRemote::default());
        let cx = RuleContext::new(&project, &vcs, &remote);
        if let Some(content) = content {
            cx.fs.write(CMAKE_LISTS, content).unwrap();
        }
        drain(&Cmake, &cx, false).unwrap()
    }

    #[test]
    fn test_complete_cmake_lists() {
        let content = "cmake_minimum_required(VERSION 3.20)\n\
                       project(tool LANGUAGES CXX)\n\
                       set(CMAKE_EXPORT_COMPILE_COMMANDS ON)\n\
                       set( CMAKE_COLOR_DIAGNOSTICS ON )\n";
        assert!(check(Some(content)).is_empty());
    }

    #[test]
    fn test_missing_calls_are_reported_in_order() {
        assert_eq!(
            check(Some("project(tool CXX)\n")),
            vec!["minimum-required", "export-compile-commands", "color-diagnostics"]
        );
    }

    #[test]
    fn test_minimum_required_must_come_first() {
        let content = "project(tool CXX)\ncmake_minimum_required(VERSION 3.20)\n";
        assert!(check(Some(content)).contains(&"minimum-required".to_string()));
    }

    #[test]
    fn test_no_cmake_lists() {
        assert!(check(None).is_empty());
    }
}
