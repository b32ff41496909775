//! Ecosystem detection.
//!
//! Marker files at the project root decide which `400-ecosystem/<tag>` rule
//! layers apply. Detection order is fixed and duplicates are collected once,
//! so a C project with both `*.c` files and a `CMakeLists.txt` reports `c`
//! a single time.

use std::fmt;

use log::{debug, warn};
use regex::Regex;
use serde_json::Value;

use crate::error::Result;
use crate::filesystem::ProjectFs;

/// `project(<name> ... <LANG>)` or `project(<name> ... LANGUAGES <LANG>)`.
const CMAKE_PROJECT_PATTERN: &str =
    r"project\((?:.*? (?P<last>[a-zA-Z]+)\)|.*?LANGUAGES[ \t]+(?P<listed>[a-zA-Z]+))";

/// Maven and Gradle build files.
const JAVA_BUILD_FILES: &[&str] = &["pom.xml", "build.gradle", "build.gradle.kts"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    NodeJs,
    VscodeExtension,
    Deno,
    C,
    Cpp,
    Bash,
    Python,
    Java,
    ZedExtension,
}

impl Ecosystem {
    /// The directory name under `400-ecosystem/`.
    pub fn tag(self) -> &'static str {
        match self {
            Ecosystem::NodeJs => "nodejs",
            Ecosystem::VscodeExtension => "vscode-extension",
            Ecosystem::Deno => "deno",
            Ecosystem::C => "c",
            Ecosystem::Cpp => "cpp",
            Ecosystem::Bash => "bash",
            Ecosystem::Python => "python",
            Ecosystem::Java => "java",
            Ecosystem::ZedExtension => "zed-extension",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Detect the ecosystems of the project rooted at `fs`.
pub fn detect(fs: &ProjectFs) -> Result<Vec<Ecosystem>> {
    let mut found = Vec::new();
    let mut push = |ecosystem: Ecosystem| {
        if !found.contains(&ecosystem) {
            found.push(ecosystem);
        }
    };

    if let Some(content) = fs.read_optional("package.json")? {
        push(Ecosystem::NodeJs);
        match serde_json::from_str::<Value>(&content) {
            Ok(manifest) if manifest.get("displayName").is_some() => {
                push(Ecosystem::VscodeExtension)
            }
            Ok(_) => {}
            Err(e) => warn!("package.json is not valid JSON: {}", e),
        }
    }

    if fs.exists("deno.json") || fs.exists("deno.jsonc") {
        push(Ecosystem::Deno);
    }

    if !fs.glob_files("*.c")?.is_empty() {
        push(Ecosystem::C);
    }

    if let Some(content) = fs.read_optional("CMakeLists.txt")? {
        match cmake_language(&content)?.as_deref() {
            Some("C") => push(Ecosystem::C),
            Some("CXX") => push(Ecosystem::Cpp),
            other => debug!("CMakeLists.txt declares no C or CXX language ({:?})", other),
        }
    }

    if fs.exists("basalt.toml") {
        push(Ecosystem::Bash);
    }

    if fs.exists("pyproject.toml") {
        push(Ecosystem::Python);
    }

    if JAVA_BUILD_FILES.iter().any(|file| fs.exists(file)) {
        push(Ecosystem::Java);
    }

    if fs.exists("extension.toml") {
        push(Ecosystem::ZedExtension);
    }

    Ok(found)
}

/// The language named in the first `project(...)` call of a CMake file.
pub fn cmake_language(content: &str) -> Result<Option<String>> {
    let pattern = Regex::new(CMAKE_PROJECT_PATTERN)?;
    Ok(pattern.captures(content).and_then(|caps| {
        caps.name("last")
            .or_else(|| caps.name("listed"))
            .map(|m| m.as_str().to_string())
    }))
}

/// Render tags as an English list: `a`, `a and b`, `a, b, and c`.
pub fn format_list(ecosystems: &[Ecosystem]) -> String {
    let tags: Vec<&str> = ecosystems.iter().map(|e| e.tag()).collect();
    match tags.as_slice() {
        [] => String::new(),
        [one] => one.to_string(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn project(files: &[(&str, &str)]) -> (TempDir, ProjectFs) {
        let temp = TempDir::new().unwrap();
        let fs = ProjectFs::new(temp.path());
        for (path, content) in files {
            fs.write(path, content).unwrap();
        }
        (temp, fs)
    }

    #[test]
    fn test_detect_nothing() {
        let (_temp, fs) = project(&[("README.md", "# x\n")]);
        assert!(detect(&fs).unwrap().is_empty());
    }

    #[test]
    fn test_detect_nodejs_and_vscode_extension() {
        let (_temp, fs) = project(&[("package.json", r#"{"name": "x", "displayName": "X"}"#)]);
        assert_eq!(
            detect(&fs).unwrap(),
            vec![Ecosystem::NodeJs, Ecosystem::VscodeExtension]
        );
    }

    #[test]
    fn test_invalid_package_json_still_counts_as_nodejs() {
        let (_temp, fs) = project(&[("package.json", "{not json")]);
        assert_eq!(detect(&fs).unwrap(), vec![Ecosystem::NodeJs]);
    }

    #[test]
    fn test_detect_order_is_fixed() {
        let (_temp, fs) = project(&[
            ("extension.toml", ""),
            ("basalt.toml", ""),
            ("deno.jsonc", "{}"),
            ("package.json", "{}"),
        ]);
        assert_eq!(
            detect(&fs).unwrap(),
            vec![
                Ecosystem::NodeJs,
                Ecosystem::Deno,
                Ecosystem::Bash,
                Ecosystem::ZedExtension
            ]
        );
    }

    #[test]
    fn test_detect_java_build_files() {
        for file in JAVA_BUILD_FILES {
            let (_temp, fs) = project(&[(*file, "")]);
            assert_eq!(detect(&fs).unwrap(), vec![Ecosystem::Java], "{}", file);
        }
        let (_temp, fs) = project(&[("pyproject.toml", ""), ("pom.xml", "")]);
        assert_eq!(detect(&fs).unwrap(), vec![Ecosystem::Python, Ecosystem::Java]);
    }

    #[test]
    fn test_c_sources_and_cmake_c_are_deduplicated() {
        let (_temp, fs) = project(&[
            ("main.c", "int main(void) { return 0; }\n"),
            ("CMakeLists.txt", "project(tool C)\n"),
        ]);
        assert_eq!(detect(&fs).unwrap(), vec![Ecosystem::C]);
    }

    #[test]
    fn test_cmake_cxx_is_cpp() {
        let (_temp, fs) = project(&[(
            "CMakeLists.txt",
            "cmake_minimum_required(VERSION 3.20)\nproject(tool VERSION 1.0 LANGUAGES CXX)\n",
        )]);
        assert_eq!(detect(&fs).unwrap(), vec![Ecosystem::Cpp]);
    }

    #[test]
    fn test_cmake_language() {
        assert_eq!(cmake_language("project(x C)").unwrap().as_deref(), Some("C"));
        assert_eq!(
            cmake_language("project(x LANGUAGES CXX )").unwrap().as_deref(),
            Some("CXX")
        );
        assert_eq!(cmake_language("add_executable(x main.c)").unwrap(), None);
    }

    #[test]
    fn test_format_list() {
        assert_eq!(format_list(&[]), "");
        assert_eq!(format_list(&[Ecosystem::NodeJs]), "nodejs");
        assert_eq!(
            format_list(&[Ecosystem::NodeJs, Ecosystem::Deno]),
            "nodejs and deno"
        );
        assert_eq!(
            format_list(&[Ecosystem::NodeJs, Ecosystem::Deno, Ecosystem::C]),
            "nodejs, deno, and c"
        );
    }
}
