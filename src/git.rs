//! Version-control metadata provider.
//!
//! The engine only ever talks to git through the [`Vcs`] trait. [`GitCli`]
//! implements it with the system `git` binary, which picks up the user's
//! configuration (`~/.gitconfig`, `clone.defaultRemoteName`, ...) for free.
//!
//! Every method is a read except [`Vcs::set_remote_url`], which only fix
//! actions call.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{Error, Result};

/// The remote used when `clone.defaultRemoteName` is not configured.
pub const DEFAULT_REMOTE_NAME: &str = "origin";

/// A configured remote as listed by `git remote --verbose`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

/// Read (and minimal write) access to a repository's git metadata.
pub trait Vcs {
    /// Name of the checked-out branch; empty when HEAD is detached.
    fn current_branch(&self) -> Result<String>;

    /// The remote configured for `branch`, if any.
    fn branch_remote(&self, branch: &str) -> Result<Option<String>>;

    /// `clone.defaultRemoteName`, falling back to `origin`.
    fn default_remote(&self) -> Result<String>;

    fn remote_url(&self, remote: &str) -> Result<String>;

    /// All remotes, in the order git lists them.
    fn remotes(&self) -> Result<Vec<Remote>>;

    fn set_remote_url(&self, remote: &str, url: &str) -> Result<()>;
}

/// [`Vcs`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    dir: PathBuf,
}

impl GitCli {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .arg("-C")
            .arg(&self.dir)
            .args(args)
            .output()
            .map_err(|e| Error::GitCommand {
                command: args.join(" "),
                stderr: e.to_string(),
            })
    }

    /// Run a command that must succeed and return its trimmed stdout.
    fn stdout(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(Error::GitCommand {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Read a config key. `git config --get` exits with status 1 when the key
    /// is unset, which is not an error here.
    fn config_get(&self, args: &[&str]) -> Result<Option<String>> {
        let output = self.run(args)?;
        match output.status.code() {
            Some(0) => {
                let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Ok(Some(value).filter(|v| !v.is_empty()))
            }
            Some(1) => Ok(None),
            _ => Err(Error::GitCommand {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }
}

impl Vcs for GitCli {
    fn current_branch(&self) -> Result<String> {
        self.stdout(&["branch", "--show-current"])
    }

    fn branch_remote(&self, branch: &str) -> Result<Option<String>> {
        let key = format!("branch.{}.remote", branch);
        self.config_get(&["config", "--get", &key])
    }

    fn default_remote(&self) -> Result<String> {
        let configured = self.config_get(&["config", "--get", "clone.defaultRemoteName"])?;
        Ok(configured.unwrap_or_else(|| DEFAULT_REMOTE_NAME.to_string()))
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        self.stdout(&["remote", "get-url", remote])
    }

    fn remotes(&self) -> Result<Vec<Remote>> {
        let stdout = self.stdout(&["remote", "--verbose"])?;
        Ok(parse_remote_verbose(&stdout))
    }

    fn set_remote_url(&self, remote: &str, url: &str) -> Result<()> {
        self.stdout(&["remote", "set-url", remote, url]).map(|_| ())
    }
}

/// Parse `git remote --verbose` output into one entry per remote.
///
/// Each remote is listed twice (fetch and push); the fetch URL wins.
pub fn parse_remote_verbose(stdout: &str) -> Vec<Remote> {
    let mut remotes: Vec<Remote> = Vec::new();
    for line in stdout.lines() {
        let mut parts = line.split_whitespace();
        let (Some(name), Some(url)) = (parts.next(), parts.next()) else {
            continue;
        };
        if remotes.iter().any(|r| r.name == name) {
            continue;
        }
        remotes.push(Remote {
            name: name.to_string(),
            url: url.to_string(),
        });
    }
    remotes
}

/// The repository name at the end of a remote URL, without `.git`.
pub fn repo_name_from_url(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last)
}
