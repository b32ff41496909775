//! The phases of a lint run.
//!
//! ## Overview
//!
//! A run goes through these phases:
//! 1. Discovery - Collect rule set paths from every layer that applies to the project
//! 2. Override Resolution - Drop rule sets replaced by a later, more specific one
//! 3. Pipeline - Evaluate each remaining rule set's issues and apply fixes
//!
//! The [`orchestrator`] strings them together with context resolution,
//! configuration loading and filtering (`--only`, `--exclude`).

use std::fmt;

pub mod discovery;
pub mod orchestrator;
pub mod overrides;
pub mod pipeline;

pub use discovery as phase1;
pub use overrides as phase2;
pub use pipeline as phase3;

/// Identity of a rule set, derived from its catalog path.
///
/// For `200-version-control/20-gitattributes`:
/// - `group` is `200-version-control` (the directory it lives in)
/// - `rule_set_id` is `20-gitattributes`
/// - `long_id` is `200-version-control/20-gitattributes`
/// - `base_id` is `gitattributes`, shared by every rule set it overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSetDescriptor {
    pub path: String,
    pub group: String,
    pub rule_set_id: String,
    pub long_id: String,
    pub base_id: String,
}

impl RuleSetDescriptor {
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_matches('/');
        let (dir, rule_set_id) = path.rsplit_once('/').unwrap_or(("", path));
        let group = dir.rsplit('/').next().unwrap_or(dir);
        let long_id = if group.is_empty() {
            rule_set_id.to_string()
        } else {
            format!("{}/{}", group, rule_set_id)
        };

        Self {
            path: path.to_string(),
            group: group.to_string(),
            rule_set_id: rule_set_id.to_string(),
            long_id,
            base_id: strip_order_prefix(rule_set_id).to_string(),
        }
    }
}

impl fmt::Display for RuleSetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.long_id)
    }
}

/// `20-gitattributes` → `gitattributes`. Ids without a numeric prefix are
/// returned unchanged.
pub fn strip_order_prefix(id: &str) -> &str {
    let digits = id.bytes().take_while(u8::is_ascii_digit).count();
    match id[digits..].strip_prefix('-') {
        Some(rest) if digits > 0 => rest,
        _ => id,
    }
}
