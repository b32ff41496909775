//! Filesystem access rooted at the project directory.
//!
//! Rules and their fixes address files by project-relative paths
//! (`"README.md"`, `".github/FUNDING.yml"`). [`ProjectFs`] resolves them
//! against the project root and tags failures with a [`FileError`] kind, so
//! a missing file is a value to match on rather than an error string.

use std::fs;
use std::path::{Path, PathBuf};

use glob::MatchOptions;

use crate::error::{FileError, Result};

/// Handle to the project tree. Cheap to clone; fixes keep their own copy.
#[derive(Debug, Clone)]
pub struct ProjectFs {
    root: PathBuf,
}

impl ProjectFs {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a project-relative path. A leading `./` is ignored.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(normalize(rel))
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    pub fn is_file(&self, rel: &str) -> bool {
        self.path(rel).is_file()
    }

    pub fn read_to_string(&self, rel: &str) -> std::result::Result<String, FileError> {
        let path = self.path(rel);
        fs::read_to_string(&path).map_err(|e| FileError::new(&path, e))
    }

    /// Read a file, mapping "not found" to `None`.
    pub fn read_optional(&self, rel: &str) -> Result<Option<String>> {
        match self.read_to_string(rel) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a file, creating parent directories as needed.
    pub fn write(&self, rel: &str, content: &str) -> Result<()> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| FileError::new(parent, e))?;
        }
        fs::write(&path, content).map_err(|e| FileError::new(&path, e))?;
        Ok(())
    }

    pub fn rename(&self, from: &str, to: &str) -> Result<()> {
        let from_path = self.path(from);
        fs::rename(&from_path, self.path(to)).map_err(|e| FileError::new(&from_path, e))?;
        Ok(())
    }

    pub fn remove(&self, rel: &str) -> Result<()> {
        let path = self.path(rel);
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        removed.map_err(|e| FileError::new(&path, e))?;
        Ok(())
    }

    /// List entries matching a case-insensitive glob relative to the root.
    ///
    /// Results are project-relative, `/`-separated and sorted.
    pub fn glob(&self, pattern: &str) -> Result<Vec<String>> {
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let full = format!("{}/{}", root, normalize(pattern));
        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        let mut matches: Vec<String> = glob::glob_with(&full, options)?
            .filter_map(|entry| entry.ok())
            .filter_map(|path| {
                path.strip_prefix(&self.root)
                    .ok()
                    .map(|rel| rel.to_string_lossy().replace('\\', "/"))
            })
            .collect();
        matches.sort();
        Ok(matches)
    }

    /// Like [`ProjectFs::glob`], keeping regular files only.
    pub fn glob_files(&self, pattern: &str) -> Result<Vec<String>> {
        Ok(self
            .glob(pattern)?
            .into_iter()
            .filter(|rel| self.is_file(rel))
            .collect())
    }
}

fn normalize(rel: &str) -> &str {
    rel.strip_prefix("./").unwrap_or(rel)
}
