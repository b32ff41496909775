//! Confirmation of fixes.
//!
//! The pipeline asks a [`Confirm`] implementation whether a fix should run.
//! `--yes` uses [`AutoYes`]; otherwise [`Interactive`] asks on the terminal
//! and parses the free-text answer with [`parse_yes_no`].

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{theme::ColorfulTheme, Input};

use crate::error::Result;

/// The question asked before running a fix.
pub const FIX_QUESTION: &str = "Would you like to fix this issue? (y/n)";

/// Decides whether a fix is applied.
pub trait Confirm {
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Approves every fix without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoYes;

impl Confirm for AutoYes {
    fn confirm(&self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Asks on the terminal for each fix.
///
/// When stdin is not a terminal the question is printed to stdout and one
/// line is read from stdin, so answers can be piped in.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interactive;

impl Confirm for Interactive {
    fn confirm(&self, question: &str) -> Result<bool> {
        let answer = if io::stdin().is_terminal() {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()?
        } else {
            let mut stdout = io::stdout();
            write!(stdout, "{}: ", question)?;
            stdout.flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line
        };
        Ok(parse_yes_no(&answer).unwrap_or(false))
    }
}

/// Parse a free-text yes/no answer.
///
/// Returns `None` when the answer is neither; callers treat that as a
/// decline.
pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" => Some(true),
        "n" | "no" | "false" | "0" | "off" => Some(false),
        _ => None,
    }
}
