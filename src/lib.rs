//! # devlint
//!
//! This library checks a project's metadata files against layered rule sets
//! and fixes what it can. It is used by the `devlint` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use devlint::merge::merged;
//! use serde_json::json;
//!
//! let package = json!({"name": "widget", "author": "someone"});
//! let shape = json!({"private": true, "author": {"__delete": null}});
//!
//! assert_eq!(merged(&package, &shape), json!({"name": "widget", "private": true}));
//! ```
//!
//! ## Core Concepts
//!
//! - **Project context (`context`)**: Whether the directory is a plain
//!   directory, a git repository, or a git repository whose remote names an
//!   owner and repository.
//! - **Rule sets (`rules`)**: Named groups of checks. Each produces a lazy
//!   stream of issues, and an issue may carry a fix.
//! - **Layers**: Rule sets live in layer directories (`100-directory`,
//!   `200-version-control`, `300-remote-url`, `400-ecosystem/<tag>`,
//!   `500-name/...`). A rule set in a later layer overrides an earlier one
//!   with the same base id.
//! - **Configuration (`config`)**: Built-in defaults, the user file and the
//!   project's `dev.toml`, deep-merged with `__delete`/`__replace` support.
//!
//! ## Execution Flow
//!
//! The main entry point is [`phases::orchestrator`]:
//!
//! 1.  **Context**: Resolve the project context and detect ecosystems.
//! 2.  **Configuration**: Merge configuration layers; stop if the project is
//!     on a skip list.
//! 3.  **Discovery**: List the rule sets of every applicable layer.
//! 4.  **Override Resolution**: Keep the most specific rule set per base id.
//! 5.  **Pipeline**: Evaluate each rule set and apply the fixes the user
//!     accepts.

pub mod config;
pub mod context;
pub mod defaults;
pub mod ecosystem;
pub mod error;
pub mod filesystem;
pub mod git;
pub mod merge;
pub mod output;
pub mod phases;
pub mod prompt;
pub mod remote;
pub mod rules;
