//! Project classification.
//!
//! A run starts by deciding what kind of project the working directory is:
//! a plain directory, a git repository without a usable remote, or a git
//! repository whose remote names an owner and a repository. The result is a
//! [`ProjectContext`] that stays fixed for the rest of the run.

use std::path::{Path, PathBuf};

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};
use crate::git::Vcs;

/// Matches `<host>[:/]<owner>/<name>[.git]` at the end of a remote URL.
const REMOTE_URL_PATTERN: &str = r"[:/](?P<owner>[^/:]+)/(?P<name>[^/:]+?)(?:\.git)?/?$";

/// What the project being checked is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectContext {
    OnlyDirectory {
        root_dir: PathBuf,
        name: String,
    },
    UnderVersionControl {
        root_dir: PathBuf,
        name: String,
        branch_name: String,
    },
    WithRemote {
        root_dir: PathBuf,
        name: String,
        branch_name: String,
        remote_name: String,
        remote_url: String,
        owner: String,
    },
}

impl ProjectContext {
    pub fn root_dir(&self) -> &Path {
        match self {
            ProjectContext::OnlyDirectory { root_dir, .. }
            | ProjectContext::UnderVersionControl { root_dir, .. }
            | ProjectContext::WithRemote { root_dir, .. } => root_dir,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ProjectContext::OnlyDirectory { name, .. }
            | ProjectContext::UnderVersionControl { name, .. }
            | ProjectContext::WithRemote { name, .. } => name,
        }
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            ProjectContext::WithRemote { owner, .. } => Some(owner),
            _ => None,
        }
    }

    /// `owner/name` for projects with a remote.
    pub fn full_name(&self) -> Option<String> {
        self.owner().map(|owner| format!("{}/{}", owner, self.name()))
    }

    pub fn is_version_controlled(&self) -> bool {
        !matches!(self, ProjectContext::OnlyDirectory { .. })
    }

    pub fn has_remote(&self) -> bool {
        matches!(self, ProjectContext::WithRemote { .. })
    }
}

/// Resolve the context of the project rooted at `root`.
///
/// "No remote configured" yields [`ProjectContext::UnderVersionControl`];
/// a remote whose URL does not parse is an error.
pub fn resolve(root: &Path, vcs: &dyn Vcs) -> Result<ProjectContext> {
    let root_dir = root.to_path_buf();
    let dir_name = base_name(root);

    if !root.join(".git").exists() {
        debug!("{} has no .git, treating it as a plain directory", root.display());
        return Ok(ProjectContext::OnlyDirectory {
            root_dir,
            name: dir_name,
        });
    }

    let branch_name = vcs.current_branch()?;
    let remote_name = if branch_name.is_empty() {
        // Detached HEAD (common in CI checkouts): use the default remote, but
        // only if it actually exists.
        let fallback = vcs.default_remote()?;
        let exists = vcs.remotes()?.iter().any(|r| r.name == fallback);
        exists.then_some(fallback)
    } else {
        vcs.branch_remote(&branch_name)?
    };

    let Some(remote_name) = remote_name else {
        debug!("no remote configured for branch {:?}", branch_name);
        return Ok(ProjectContext::UnderVersionControl {
            root_dir,
            name: dir_name,
            branch_name,
        });
    };

    let remote_url = vcs.remote_url(&remote_name)?;
    let Some((owner, name)) = parse_remote_url(&remote_url)? else {
        return Err(Error::RemoteUrl {
            remote: remote_name,
            url: remote_url,
        });
    };

    Ok(ProjectContext::WithRemote {
        root_dir,
        name,
        branch_name,
        remote_name,
        remote_url,
        owner,
    })
}

/// Extract `(owner, name)` from a remote URL.
pub fn parse_remote_url(url: &str) -> Result<Option<(String, String)>> {
    let pattern = Regex::new(REMOTE_URL_PATTERN)?;
    Ok(pattern
        .captures(url.trim())
        .map(|caps| (caps["owner"].to_string(), caps["name"].to_string())))
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
