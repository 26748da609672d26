//! Terminal output for the CLI
//!
//! Human-readable messages go through [`OutputFormatter::info`] and friends;
//! in `--json` mode those are suppressed and only the structured payload
//! printed with [`OutputFormatter::print_json`] reaches stdout.

use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Output formatter for CLI commands
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    /// Create a formatter; `no_color` also disables colours globally
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Print a value as pretty JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{}", message.green());
        }
    }

    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    /// Errors always go to stderr, even in JSON mode
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    /// Section heading
    pub fn heading(&self, title: &str) {
        if !self.json {
            println!("{}", title.bold());
        }
    }
}
