//! Default values for devlint configuration.
//!
//! Built-in configuration is the bottom layer of the merged configuration:
//! the user file and the project's `dev.toml` are merged on top of it.

use std::path::PathBuf;

use serde_json::{json, Value};

use crate::context::ProjectContext;

/// Per-project configuration file, read from the project root.
pub const PROJECT_CONFIG_FILENAME: &str = "dev.toml";

/// Environment variable pointing at an alternative user configuration file.
pub const USER_CONFIG_ENV: &str = "DEVLINT_CONFIG";

/// Owners whose `.github` repository does not get the bundled funding file.
pub const FUNDING_EXEMPT_OWNERS: &[&str] = &["ecc-computing-club"];

/// Bundled `.editorconfig` written by the editorconfig fixes.
pub const EDITORCONFIG_TEMPLATE: &str = include_str!("templates/editorconfig");

/// Bundled `FUNDING.yml`; `{owner}` is replaced with the repository owner.
pub const FUNDING_TEMPLATE: &str = include_str!("templates/FUNDING.yml");

/// Bundled `.ls-lint.yml`.
pub const LS_LINT_TEMPLATE: &str = include_str!("templates/ls-lint.yml");

/// Bundled Eclipse formatter profile for Java projects.
pub const JAVA_FORMATTER_TEMPLATE: &str = include_str!("templates/formatter.xml");

/// Returns the default user configuration file.
///
/// Uses the platform-appropriate configuration directory:
/// - Linux: `~/.config/devlint/config.toml` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/devlint/config.toml`
/// - Windows: `{FOLDERID_RoamingAppData}\devlint\config.toml`
///
/// Returns `None` when the platform has no configuration directory.
pub fn default_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("devlint").join("config.toml"))
}

/// The built-in configuration layer for `context`.
pub fn builtin_config(context: &ProjectContext) -> Value {
    let mut rules = serde_json::Map::new();
    if context.full_name().as_deref() == Some("awesome-lists/awesome-bash") {
        for issue in ["disable-projects-tab", "default-branch-main"] {
            rules.insert(
                format!("300-remote-url/20-remote-metadata/{}", issue),
                json!("off"),
            );
        }
    }

    json!({
        "rules": rules,
        "skipped-organizations": ["bash-bastion"],
        "skipped-repositories": ["SchemaStore/schemastore"],
    })
}

/// Funding file content for `owner`.
pub fn funding_content(owner: &str) -> String {
    FUNDING_TEMPLATE.replace("{owner}", owner)
}
