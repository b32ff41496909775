//! End-to-end tests for the `devlint lint` command.
//!
//! These tests invoke the binary against scratch projects and check both
//! the report it prints and the files its fixes leave behind.

mod common;
use common::prelude::*;

#[test]
fn test_lint_help() {
    let mut cmd = cargo_bin_cmd!("devlint");
    cmd.arg("lint")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"))
        .stdout(predicate::str::contains("--strict"))
        .stdout(predicate::str::contains("--match"))
        .stdout(predicate::str::contains("--only"))
        .stdout(predicate::str::contains("--exclude"));
}

/// A plain directory gets a README titled after the directory.
#[test]
fn test_lint_creates_missing_readme() {
    let fixture = TestFixture::new("widget");

    fixture
        .command()
        .args(["lint", "--yes", "--match", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory:"))
        .stdout(predicate::str::contains(
            "[EVAL] 100-directory/30-readme: Found issue",
        ))
        .stdout(predicate::str::contains("[PASS] 100-directory/30-readme"))
        .stdout(predicate::str::contains("[PASS] 100-directory/20-nofiles"))
        .stdout(predicate::str::ends_with("Done.\n"));

    fixture.child("README.md").assert("# widget\n");
}

#[test]
fn test_lint_dir_argument() {
    let fixture = TestFixture::new("widget");
    let mut cmd = cargo_bin_cmd!("devlint");

    cmd.env("NO_COLOR", "1")
        .env("DEVLINT_CONFIG", fixture.path().join("missing.toml"))
        .arg("lint")
        .arg(fixture.path())
        .args(["--yes", "--only", "100-directory/30-readme"])
        .assert()
        .success();

    fixture.child("README.md").assert("# widget\n");
}

#[test]
fn test_lint_clean_project_passes() {
    let fixture = TestFixture::new("widget").with_file("README.md", "# widget\n");

    fixture
        .command()
        .args(["lint", "--match", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found issue").not())
        .stdout(predicate::str::contains("Would you like").not());
}

/// A suppressed issue is reported as skipped and never prompts.
#[test]
fn test_lint_suppressed_issue_is_skipped() {
    if !git_available() {
        eprintln!("Skipping test: git is not available");
        return;
    }
    let fixture = TestFixture::new("widget")
        .with_git()
        .with_file(
            "dev.toml",
            "[rules]\n\"200-version-control/20-gitattributes/bad-line\" = \"off\"\n",
        )
        .with_file(".gitattributes", "* text=auto\n# foxxo\n");

    fixture
        .command()
        .args(["lint", "--only", "200-version-control/20-gitattributes"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[SKIP] 200-version-control/20-gitattributes/bad-line\n",
        ))
        .stdout(predicate::str::contains(
            "[PASS] 200-version-control/20-gitattributes",
        ))
        .stdout(predicate::str::contains("Would you like").not());

    fixture.child(".gitattributes").assert("* text=auto\n# foxxo\n");
}

/// `--only` runs exactly the listed rule sets.
#[test]
fn test_lint_only_runs_listed_rule_sets() {
    let fixture = TestFixture::new("widget").with_file("README.md", "# widget\n");

    fixture
        .command()
        .args(["lint", "--yes", "--only", "100-directory/20-nofiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[PASS] 100-directory/20-nofiles"))
        .stdout(predicate::str::contains("30-readme").not())
        .stdout(predicate::str::contains("_/10-editorconfig").not());

    fixture.child(".editorconfig").assert(predicate::path::missing());
}

#[test]
fn test_lint_exclude_skips_listed_rule_sets() {
    let fixture = TestFixture::new("widget");

    fixture
        .command()
        .args([
            "lint",
            "--yes",
            "--match",
            "project",
            "--exclude",
            "100-directory/30-readme",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("30-readme").not());

    fixture.child("README.md").assert(predicate::path::missing());
}

#[test]
fn test_lint_removes_retired_files() {
    let fixture = TestFixture::new("widget")
        .with_file("README.md", "# widget\n")
        .with_file("foxxo.toml", "");

    fixture
        .command()
        .args(["lint", "--yes", "--only", "100-directory/20-nofiles"])
        .assert()
        .success();

    fixture.child("foxxo.toml").assert(predicate::path::missing());
}

#[test]
fn test_lint_ecosystem_layer_writes_editorconfig() {
    let fixture = TestFixture::new("widget").with_file("package.json", "{\"name\": \"widget\"}\n");

    fixture
        .command()
        .args(["lint", "--yes", "--only", "_/10-editorconfig"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ecosystems: nodejs"))
        .stdout(predicate::str::contains("[PASS] _/10-editorconfig"));

    fixture
        .child(".editorconfig")
        .assert(predicate::str::starts_with("root = true"));
}

#[test]
fn test_lint_declined_fix_fails() {
    let fixture = TestFixture::new("widget");

    fixture
        .command()
        .args(["lint", "--only", "100-directory/30-readme"])
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Would you like to fix this issue? (y/n): "))
        .stdout(predicate::str::contains(
            "Failed because the fix function was not executed",
        ));

    fixture.child("README.md").assert(predicate::path::missing());
}

#[test]
fn test_lint_accepted_fix_from_stdin() {
    let fixture = TestFixture::new("widget");

    fixture
        .command()
        .args(["lint", "--only", "100-directory/30-readme"])
        .write_stdin("yes\n")
        .assert()
        .success();

    fixture.child("README.md").assert("# widget\n");
}

#[test]
fn test_lint_invalid_project_config_is_fatal() {
    let fixture = TestFixture::new("widget").with_file("dev.toml", "rules = [\n");

    fixture
        .command()
        .args(["lint", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dev.toml"));
}
