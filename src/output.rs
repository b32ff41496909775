//! # Output Configuration and Reporting
//!
//! This module controls how `devlint` prints its report: whether colours are
//! used, and how each outcome is rendered as a greppable marker line.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Report Format
//!
//! Every outcome is one line of the form `[MARKER] layer/ruleset[/issue]`,
//! optionally followed by ` -> tip` lines:
//!
//! ```text
//! [EVAL] 100-directory/30-readme: Found issue
//!  -> Expected to find a single readme file
//! [FAIL] 100-directory/30-readme
//!  -> Failed because the fix function was not executed
//! ```

use std::env;
use std::io::{self, Write};

use console::style;

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// The category of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Eval,
    Pass,
    Fail,
    Skip,
    Error,
    Warn,
}

impl Marker {
    pub fn label(self) -> &'static str {
        match self {
            Marker::Eval => "EVAL",
            Marker::Pass => "PASS",
            Marker::Fail => "FAIL",
            Marker::Skip => "SKIP",
            Marker::Error => "ERROR",
            Marker::Warn => "WARN",
        }
    }

    fn styled(self, config: &OutputConfig) -> String {
        if !config.use_color {
            return self.label().to_string();
        }
        let label = style(self.label()).force_styling(true);
        match self {
            Marker::Eval => label.cyan(),
            Marker::Pass => label.green(),
            Marker::Fail | Marker::Error => label.red(),
            Marker::Skip | Marker::Warn => label.yellow(),
        }
        .to_string()
    }
}

/// Writes the run report to a sink.
///
/// The binary reports to stdout; tests use a `Vec<u8>` and inspect it with
/// [`Reporter::into_inner`].
pub struct Reporter<W: Write> {
    out: W,
    config: OutputConfig,
}

impl Reporter<io::Stdout> {
    pub fn stdout(config: OutputConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, config: OutputConfig) -> Self {
        Self { out, config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Print `[MARKER] subject` followed by one ` -> tip` line per tip.
    pub fn marker<S: AsRef<str>>(&mut self, marker: Marker, subject: &str, tips: &[S]) -> io::Result<()> {
        writeln!(self.out, "[{}] {}", marker.styled(&self.config), subject)?;
        self.tips(tips)
    }

    /// Print a bare `[MARKER] subject` line.
    pub fn status(&mut self, marker: Marker, subject: &str) -> io::Result<()> {
        self.marker::<&str>(marker, subject, &[])
    }

    /// Print `[EVAL] subject: Found issue`.
    pub fn found_issue(&mut self, subject: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "[{}] {}: Found issue",
            Marker::Eval.styled(&self.config),
            subject
        )
    }

    pub fn tips<S: AsRef<str>>(&mut self, tips: &[S]) -> io::Result<()> {
        for tip in tips {
            writeln!(self.out, " -> {}", tip.as_ref())?;
        }
        Ok(())
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// Print an aligned `Heading: value` pair used by the run header.
    pub fn field(&mut self, heading: &str, value: &str) -> io::Result<()> {
        let padded = format!("{:<11}", format!("{}:", heading));
        if self.config.use_color {
            writeln!(
                self.out,
                "{} {}",
                style(padded).force_styling(true).blue().bold(),
                value
            )
        } else {
            writeln!(self.out, "{} {}", padded, value)
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn plain() -> Reporter<Vec<u8>> {
        Reporter::new(Vec::new(), OutputConfig::without_color())
    }

    fn text(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("never");
        assert!(!config.use_color);
    }

    #[test]
    #[serial]
    fn test_no_color_disables_auto() {
        env::set_var("NO_COLOR", "1");
        let auto = OutputConfig::from_env_and_flag("auto");
        let always = OutputConfig::from_env_and_flag("always");
        env::remove_var("NO_COLOR");
        assert!(!auto.use_color);
        assert!(always.use_color);
    }

    #[test]
    #[serial]
    fn test_clicolor_zero_disables_auto() {
        env::set_var("CLICOLOR", "0");
        let config = OutputConfig::from_env_and_flag("auto");
        env::remove_var("CLICOLOR");
        assert!(!config.use_color);
    }

    #[test]
    fn test_marker_line_with_tips() {
        let mut reporter = plain();
        reporter
            .marker(Marker::Fail, "100-directory/30-readme", &["No fix function exists"])
            .unwrap();
        assert_eq!(
            text(reporter),
            "[FAIL] 100-directory/30-readme\n -> No fix function exists\n"
        );
    }

    #[test]
    fn test_found_issue_line() {
        let mut reporter = plain();
        reporter.found_issue("400-ecosystem/10-editorconfig").unwrap();
        assert_eq!(text(reporter), "[EVAL] 400-ecosystem/10-editorconfig: Found issue\n");
    }

    #[test]
    fn test_colored_marker_keeps_label() {
        let mut reporter = Reporter::new(Vec::new(), OutputConfig::with_color());
        reporter.status(Marker::Pass, "g/r").unwrap();
        let out = text(reporter);
        assert!(out.contains("PASS"));
        assert!(out.contains("\u{1b}["));
    }

    #[test]
    fn test_field_alignment() {
        let mut reporter = plain();
        reporter.field("Directory", "/tmp/x").unwrap();
        reporter.field("Project", "acme/widget").unwrap();
        assert_eq!(
            text(reporter),
            "Directory:  /tmp/x\nProject:    acme/widget\n"
        );
    }
}
