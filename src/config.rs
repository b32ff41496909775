//! # Configuration Loading
//!
//! Configuration is a JSON-shaped document assembled from three layers, each
//! merged onto the previous one with [`deep_merge`]:
//!
//! 1. Built-in defaults ([`crate::defaults::builtin_config`]).
//! 2. The user file (`<config dir>/devlint/config.toml`, `--config` or
//!    `DEVLINT_CONFIG`), if it exists.
//! 3. The project file (`<root>/dev.toml`), if it exists.
//!
//! Files are TOML; they are converted to `serde_json::Value` before merging
//! so the `__delete` and `__replace` markers work the same in every layer.
//!
//! ## Example `dev.toml`
//!
//! ```toml
//! [rules]
//! "100-directory/30-readme/title-name" = "off"
//!
//! # Lint projects of an organization the built-in defaults skip
//! skipped-organizations = { __delete = true }
//! ```
//!
//! The typed view ([`Settings`]) only reads the keys devlint understands;
//! every other key stays in [`Config::document`] untouched.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::context::ProjectContext;
use crate::defaults::{builtin_config, PROJECT_CONFIG_FILENAME};
use crate::error::{Error, FileError, Result};
use crate::merge::deep_merge;

/// The value that turns a rule off in `rules`.
pub const RULE_OFF: &str = "off";

/// The keys of the merged configuration devlint acts on.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// `<longId>/<issueId>` → `"off"`.
    #[serde(default)]
    pub rules: BTreeMap<String, Value>,
    /// Owners whose projects are skipped entirely.
    #[serde(default)]
    pub skipped_organizations: Vec<String>,
    /// `owner/name` of projects that are skipped entirely.
    #[serde(default)]
    pub skipped_repositories: Vec<String>,
}

/// The merged configuration of one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// The full merged document, including keys devlint doesn't interpret.
    pub document: Value,
    pub settings: Settings,
}

impl Config {
    /// Build a configuration from an already merged document.
    pub fn from_document(document: Value) -> Result<Self> {
        let settings = Settings::deserialize(&document)?;
        Ok(Self { document, settings })
    }

    /// Load and merge every configuration layer for `context`.
    pub fn load(root: &Path, user_config: Option<&Path>, context: &ProjectContext) -> Result<Self> {
        let mut document = builtin_config(context);

        if let Some(path) = user_config {
            if let Some(layer) = read_layer(path)? {
                debug!("merging user configuration {}", path.display());
                deep_merge(&mut document, &layer);
            }
        }

        let project_file = root.join(PROJECT_CONFIG_FILENAME);
        if let Some(layer) = read_layer(&project_file)? {
            debug!("merging project configuration {}", project_file.display());
            deep_merge(&mut document, &layer);
        }

        Self::from_document(document)
    }

    /// Whether the issue with key `<longId>/<issueId>` is turned off.
    pub fn is_off(&self, key: &str) -> bool {
        self.settings
            .rules
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|value| value == RULE_OFF)
    }

    /// Whether the whole project is excluded from linting.
    pub fn skips(&self, context: &ProjectContext) -> bool {
        let (Some(owner), Some(full_name)) = (context.owner(), context.full_name()) else {
            return false;
        };
        self.settings.skipped_organizations.iter().any(|o| o == owner)
            || self.settings.skipped_repositories.iter().any(|r| *r == full_name)
    }
}

/// Read one TOML layer as JSON. A missing file is `None`.
fn read_layer(path: &Path) -> Result<Option<Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(FileError::new(path, e).into()),
    };
    let table: toml::Table = toml::from_str(&content).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;
    Ok(Some(serde_json::to_value(table)?))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn with_remote(root: &Path, owner: &str, name: &str) -> ProjectContext {
        ProjectContext::WithRemote {
            root_dir: root.to_path_buf(),
            name: name.to_string(),
            branch_name: "main".to_string(),
            remote_name: "origin".to_string(),
            remote_url: format!("https://github.com/{}/{}", owner, name),
            owner: owner.to_string(),
        }
    }

    fn plain(root: &Path) -> ProjectContext {
        ProjectContext::OnlyDirectory {
            root_dir: root.to_path_buf(),
            name: "notes".to_string(),
        }
    }

    #[test]
    fn test_load_without_files_uses_builtin() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(temp.path(), None, &plain(temp.path())).unwrap();
        assert!(config.settings.rules.is_empty());
        assert_eq!(config.settings.skipped_organizations, vec!["bash-bastion"]);
    }

    #[test]
    fn test_project_file_turns_rule_off() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("dev.toml"),
            "[rules]\n\"200-version-control/20-gitattributes/bad-line\" = \"off\"\n",
        )
        .unwrap();

        let config = Config::load(temp.path(), None, &plain(temp.path())).unwrap();
        assert!(config.is_off("200-version-control/20-gitattributes/bad-line"));
        assert!(!config.is_off("200-version-control/20-gitattributes/bake-generated"));
    }

    #[test]
    fn test_only_off_string_turns_rule_off() {
        let config = Config::from_document(json!({
            "rules": {"a/b/c": "on", "a/b/d": false, "a/b/e": "off"}
        }))
        .unwrap();
        assert!(!config.is_off("a/b/c"));
        assert!(!config.is_off("a/b/d"));
        assert!(config.is_off("a/b/e"));
    }

    #[test]
    fn test_project_layer_wins_over_user_layer() {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("user.toml");
        fs::write(&user, "[rules]\n\"g/r/x\" = \"off\"\nextra = 1\n").unwrap();
        fs::write(temp.path().join("dev.toml"), "[rules]\n\"g/r/x\" = \"on\"\n").unwrap();

        let config = Config::load(temp.path(), Some(&user), &plain(temp.path())).unwrap();
        assert!(!config.is_off("g/r/x"));
        assert_eq!(config.document["rules"]["extra"], json!(1));
    }

    #[test]
    fn test_delete_marker_clears_builtin_skip_list() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("dev.toml"),
            "skipped-organizations = { __delete = true }\n",
        )
        .unwrap();

        let context = with_remote(temp.path(), "bash-bastion", "tool");
        let config = Config::load(temp.path(), None, &context).unwrap();
        assert!(config.settings.skipped_organizations.is_empty());
        assert!(!config.skips(&context));
    }

    #[test]
    fn test_missing_user_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        let missing = PathBuf::from(temp.path()).join("nope.toml");
        assert!(Config::load(temp.path(), Some(&missing), &plain(temp.path())).is_ok());
    }

    #[test]
    fn test_malformed_project_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("dev.toml"), "[rules\n").unwrap();

        match Config::load(temp.path(), None, &plain(temp.path())) {
            Err(Error::ConfigParse { path, .. }) => assert!(path.ends_with("dev.toml")),
            other => panic!("expected ConfigParse, got {:?}", other),
        }
    }

    #[test]
    fn test_skips_by_organization_and_repository() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(temp.path(), None, &plain(temp.path())).unwrap();

        assert!(config.skips(&with_remote(temp.path(), "bash-bastion", "anything")));
        assert!(config.skips(&with_remote(temp.path(), "SchemaStore", "schemastore")));
        assert!(!config.skips(&with_remote(temp.path(), "SchemaStore", "other")));
        assert!(!config.skips(&plain(temp.path())));
    }
}
