//! Rule catalog
//!
//! Every rule set is registered under a directory-style path such as
//! `200-version-control/20-gitattributes` or `500-name/_/.github/10-funding`.
//! Everything before the last `/` is the layer directory the rule set lives
//! in; the last component is its file stem. Discovery lists the direct
//! children of a layer directory and builds only the rule sets that survive
//! overriding and filtering.

use std::fmt;

use crate::error::{Error, Result};
use crate::rules::builtin;
use crate::rules::RuleSet;

type Constructor = Box<dyn Fn() -> Box<dyn RuleSet>>;

struct CatalogEntry {
    path: String,
    build: Constructor,
}

/// Registry of rule sets by path.
#[derive(Default)]
pub struct RuleCatalog {
    entries: Vec<CatalogEntry>,
}

impl RuleCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of rule sets shipped with devlint.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        builtin::register_all(&mut catalog);
        catalog
    }

    /// Register a rule set under `path`. A later registration of the same
    /// path replaces the earlier one.
    pub fn register<F>(&mut self, path: &str, build: F)
    where
        F: Fn() -> Box<dyn RuleSet> + 'static,
    {
        let path = path.trim_matches('/').to_string();
        self.entries.retain(|entry| entry.path != path);
        self.entries.push(CatalogEntry {
            path,
            build: Box::new(build),
        });
    }

    /// Paths of the rule sets directly inside `dir`, sorted by file stem.
    pub fn list(&self, dir: &str) -> Vec<&str> {
        let dir = dir.trim_matches('/');
        let mut children: Vec<&str> = self
            .entries
            .iter()
            .map(|entry| entry.path.as_str())
            .filter(|path| {
                path.strip_prefix(dir)
                    .and_then(|rest| rest.strip_prefix('/'))
                    .is_some_and(|stem| !stem.is_empty() && !stem.contains('/'))
            })
            .collect();
        children.sort_unstable();
        children
    }

    /// Construct the rule set registered under `path`.
    pub fn load(&self, path: &str) -> Result<Box<dyn RuleSet>> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| (entry.build)())
            .ok_or_else(|| Error::RuleSet {
                long_id: path.to_string(),
                message: "no rule set is registered under this path".to_string(),
            })
    }

    /// Every registered path, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.iter().map(|e| e.path.as_str()).collect();
        paths.sort_unstable();
        paths
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.paths()).finish()
    }
}
