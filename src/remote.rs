//! Hosted repository metadata provider.
//!
//! Rules in the `300-remote-url` layer inspect settings that only exist on
//! the hosting service (description, homepage, enabled tabs). They reach it
//! through [`RemoteRepository`]; [`GhCli`] implements that with the GitHub
//! CLI, reusing whatever authentication `gh auth login` set up.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The subset of repository metadata the rules look at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepoMetadata {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub default_branch: String,
    #[serde(default)]
    pub has_projects: bool,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default)]
    pub has_discussions: bool,
}

/// Fields to change on the hosted repository. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,
}

/// Access to the hosting service's view of a repository.
pub trait RemoteRepository {
    /// Whether the provider can be used at all (tool installed, ...).
    fn available(&self) -> bool;

    fn fetch(&self, owner: &str, name: &str) -> Result<RepoMetadata>;

    fn update(&self, owner: &str, name: &str, patch: &RepoPatch) -> Result<()>;

    /// Whether the repository's wiki has been created.
    fn wiki_exists(&self, owner: &str, name: &str) -> Result<bool>;
}

/// [`RemoteRepository`] backed by the `gh` command line.
#[derive(Debug, Clone, Default)]
pub struct GhCli;

impl GhCli {
    pub fn new() -> Self {
        Self
    }

    fn api(&self, args: &[&str], input: Option<&[u8]>) -> Result<Vec<u8>> {
        let command = format!("gh api {}", args.join(" "));
        let mut child = Command::new("gh")
            .arg("api")
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::RemoteApi {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if let (Some(bytes), Some(mut stdin)) = (input, child.stdin.take()) {
            stdin.write_all(bytes)?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(Error::RemoteApi {
                command,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

impl RemoteRepository for GhCli {
    fn available(&self) -> bool {
        Command::new("gh")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }

    fn fetch(&self, owner: &str, name: &str) -> Result<RepoMetadata> {
        let endpoint = format!("repos/{}/{}", owner, name);
        let body = self.api(&[&endpoint], None)?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn update(&self, owner: &str, name: &str, patch: &RepoPatch) -> Result<()> {
        let endpoint = format!("repos/{}/{}", owner, name);
        let body = serde_json::to_vec(patch)?;
        self.api(&["-X", "PATCH", &endpoint, "--input", "-"], Some(&body))?;
        Ok(())
    }

    fn wiki_exists(&self, owner: &str, name: &str) -> Result<bool> {
        // An anonymous ls-remote of a missing (or private) wiki asks for
        // credentials; with prompting disabled that is a plain failure.
        let url = format!("https://github.com/{}/{}.wiki.git", owner, name);
        let output = Command::new("git")
            .args(["ls-remote", &url])
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::GitCommand {
                command: format!("ls-remote {}", url),
                stderr: e.to_string(),
            })?;
        Ok(output.status.success())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_deserializes_from_api_shape() {
        let body = r#"{
            "full_name": "acme/widget",
            "description": "A widget.",
            "homepage": null,
            "default_branch": "main",
            "has_projects": true,
            "has_wiki": false,
            "has_discussions": false,
            "stargazers_count": 3
        }"#;
        let metadata: RepoMetadata = serde_json::from_str(body).unwrap();
        assert_eq!(metadata.full_name, "acme/widget");
        assert_eq!(metadata.description.as_deref(), Some("A widget."));
        assert_eq!(metadata.homepage, None);
        assert!(metadata.has_projects);
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = RepoPatch {
            has_projects: Some(false),
            ..RepoPatch::default()
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"has_projects":false}"#);
    }
}
