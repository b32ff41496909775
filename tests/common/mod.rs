//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new("widget").with_file("README.md", "# widget\n");
//!     fixture.command().arg("lint").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::git_available;
    #[allow(unused_imports)]
    pub use super::TestFixture;
}

/// Whether a usable `git` binary is on `PATH`.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// A project directory with a chosen name inside a temporary directory.
///
/// The project name is the directory name, so tests create a named child
/// instead of using the randomly named temporary directory itself.
#[allow(dead_code)]
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    name: String,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create an empty project directory called `name`.
    pub fn new(name: &str) -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child(name)
            .create_dir_all()
            .expect("Failed to create project directory");
        Self {
            temp_dir,
            name: name.to_string(),
        }
    }

    /// Add a file with the given project-relative path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Run `git init -b main` in the project.
    pub fn with_git(self) -> Self {
        self.git(&["init", "--quiet", "-b", "main"]);
        self
    }

    /// Add `origin` with `url` and make it the remote of `main`.
    pub fn with_remote(self, url: &str) -> Self {
        self.git(&["remote", "add", "origin", url]);
        self.git(&["config", "branch.main.remote", "origin"]);
        self
    }

    /// Run git in the project, panicking on failure.
    pub fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }

    /// The project directory.
    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().join(&self.name)
    }

    /// Create a child path in the project directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(Path::new(&self.name).join(path))
    }

    /// A `devlint` command run from the project directory, isolated from the
    /// user's own configuration file.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("devlint");
        cmd.current_dir(self.path())
            .env("DEVLINT_CONFIG", self.temp_dir.path().join("user-config.toml"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}
