//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `devlint`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `devlint` library.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod completions;
pub mod lint;
pub mod ls;

/// Change into `dir` and return its absolute path.
///
/// Fixes shell out to `git` and `lefthook`, which act on the process working
/// directory.
pub fn enter_project_dir(dir: &Path) -> Result<PathBuf> {
    env::set_current_dir(dir)
        .with_context(|| format!("Failed to change into directory {}", dir.display()))?;
    env::current_dir().context("Failed to get current directory")
}
