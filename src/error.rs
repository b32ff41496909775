//! # Error Handling
//!
//! This module defines the centralized error type for `devlint`. It uses
//! `thiserror` to describe every failure the library can report, with enough
//! context (command, remote, path, rule set) to print a useful diagnostic.
//!
//! Errors fall into two groups:
//!
//! - **Fatal** errors stop the whole run: usage errors, an unparseable remote
//!   URL, a `git` invocation that cannot be spawned, a malformed
//!   configuration file.
//! - **Isolated** errors are raised inside a single rule set (a failed check,
//!   a failed fix). The pipeline catches them, prints an `ERROR` marker and
//!   moves on to the next rule set.
//!
//! File access failures carry a [`FileError`] so callers can match on the
//! [`FileErrorKind`] instead of inspecting `io::ErrorKind` by hand.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for devlint operations
#[derive(Error, Debug)]
pub enum Error {
    /// An invalid command-line value that clap could not reject on its own.
    #[error("Usage error: {message}")]
    Usage { message: String },

    /// The remote URL of the tracked remote does not name an owner and a
    /// repository.
    #[error("Failed to extract repository name and owner for remote name \"{remote}\"\n  -> Remote name has URL of \"{url}\"")]
    RemoteUrl { remote: String, url: String },

    /// A `git` command could not be run or exited unexpectedly.
    #[error("Git command failed: git {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// A call to the hosted repository API failed.
    #[error("Remote repository error: {command} - {message}")]
    RemoteApi { command: String, message: String },

    /// An external tool invoked by a fix failed.
    #[error("Command failed: {command} - {message}")]
    Command { command: String, message: String },

    /// A file in the project could not be read or written.
    #[error(transparent)]
    File(#[from] FileError),

    /// A configuration file exists but is not valid.
    #[error("Configuration parsing error in {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// A rule set could not be loaded or produced an inconsistent result.
    #[error("Rule set error: {long_id} - {message}")]
    RuleSet { long_id: String, message: String },

    /// A project file holds content a check cannot interpret.
    #[error("Invalid content in {file}: {message}")]
    Content { file: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML parsing error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// An interactive prompt failed.
    #[error("Prompt error: {0}")]
    Dialog(#[from] dialoguer::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of a failed file access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileErrorKind {
    NotFound,
    PermissionDenied,
    Other,
}

impl From<io::ErrorKind> for FileErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => FileErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => FileErrorKind::PermissionDenied,
            _ => FileErrorKind::Other,
        }
    }
}

impl fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FileErrorKind::NotFound => "not found",
            FileErrorKind::PermissionDenied => "permission denied",
            FileErrorKind::Other => "failed",
        };
        f.write_str(text)
    }
}

/// A failed file access, tagged with its kind and the path involved.
#[derive(Error, Debug)]
#[error("File {kind}: {}: {source}", path.display())]
pub struct FileError {
    pub kind: FileErrorKind,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FileError {
    pub fn new(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self {
            kind: source.kind().into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == FileErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_usage() {
        let error = Error::Usage {
            message: "Invalid --match value \"bogus\"".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Usage error"));
        assert!(display.contains("bogus"));
    }

    #[test]
    fn test_error_display_remote_url() {
        let error = Error::RemoteUrl {
            remote: "origin".to_string(),
            url: "not-a-url".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to extract repository name and owner"));
        assert!(display.contains("\"origin\""));
        assert!(display.contains("not-a-url"));
    }

    #[test]
    fn test_error_display_git_command() {
        let error = Error::GitCommand {
            command: "remote get-url origin".to_string(),
            stderr: "error: No such remote 'origin'".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Git command failed"));
        assert!(display.contains("remote get-url origin"));
        assert!(display.contains("No such remote"));
    }

    #[test]
    fn test_error_display_rule_set() {
        let error = Error::RuleSet {
            long_id: "100-directory/30-readme".to_string(),
            message: "no rule set registered".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("100-directory/30-readme"));
        assert!(display.contains("no rule set registered"));
    }

    #[test]
    fn test_file_error_kind_from_io() {
        let err = FileError::new(
            "README.md",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert_eq!(err.kind, FileErrorKind::NotFound);

        let err = FileError::new(
            "README.md",
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert_eq!(err.kind, FileErrorKind::PermissionDenied);

        let err = FileError::new("README.md", io::Error::other("weird"));
        assert_eq!(err.kind, FileErrorKind::Other);
    }

    #[test]
    fn test_file_error_display() {
        let err = FileError::new(
            "package.json",
            io::Error::new(io::ErrorKind::NotFound, "No such file"),
        );
        let display = format!("{}", err);
        assert!(display.contains("not found"));
        assert!(display.contains("package.json"));
    }

    #[test]
    fn test_error_from_file_error_is_transparent() {
        let err: Error = FileError::new(
            "dev.toml",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        )
        .into();
        let display = format!("{}", err);
        assert!(display.contains("permission denied"));
        assert!(display.contains("dev.toml"));
    }

    #[test]
    fn test_error_from_regex_error() {
        let regex_error = regex::Error::Syntax("Invalid regex".to_string());
        let error: Error = regex_error.into();
        assert!(format!("{}", error).contains("Regex error"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: [unclosed").unwrap_err();
        let error: Error = yaml_error.into();
        assert!(format!("{}", error).contains("YAML error"));
    }
}
