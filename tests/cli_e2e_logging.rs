//! End-to-end tests for `--log-level` and `RUST_LOG`.

mod common;
use common::prelude::*;

#[test]
fn test_default_level_is_quiet() {
    let fixture = TestFixture::new("widget");

    fixture
        .command()
        .arg("ls")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_log_level_debug_reports_discovery() {
    let fixture = TestFixture::new("widget");

    fixture
        .command()
        .args(["--log-level", "debug", "ls"])
        .assert()
        .success()
        .stderr(predicate::str::contains("discovered"))
        .stderr(predicate::str::contains("rule set(s)"));
}

#[test]
fn test_rust_log_overrides_log_level() {
    let fixture = TestFixture::new("widget");

    fixture
        .command()
        .env("RUST_LOG", "off")
        .args(["--log-level", "debug", "ls"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
