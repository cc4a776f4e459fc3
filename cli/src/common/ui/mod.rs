//! # advisorctl UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! User-facing console output. Diagnostic logging goes through `tracing`
//! (stderr, filtered by `-v`/`RUST_LOG`); what the user is *meant* to read goes
//! through `Console`, which prints colored, tagged lines:
//!
//! ```text
//! [INFO] Checking Docker installation...
//! [SUCCESS] Docker is installed: Docker version 27.3.1
//! [WARNING] pytest not available in the container
//! [ERROR] POLYGON_API_KEY is missing or still set to a placeholder
//!     Get a key at https://polygon.io/dashboard/api-keys
//! ```
//!
//! `Console` is a small `Copy` value carrying the verbosity and is passed
//! explicitly to the code that prints. Colors are handled by the `colored`
//! crate, which honours `NO_COLOR`; `--no-color` switches them off globally.
//!
//! - **`prompts`**: the `[y/N]` confirmation used by destructive commands.
//!
pub mod prompts;

use colored::{ColoredString, Colorize};

/// How much the console prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Errors, warnings and final results only.
    Quiet,
    #[default]
    Normal,
    /// Also prints captured command output.
    Verbose,
}

/// Message severity, mapped to a colored tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn tag(self) -> ColoredString {
        match self {
            Level::Info => "[INFO]".blue(),
            Level::Success => "[SUCCESS]".green(),
            Level::Warning => "[WARNING]".yellow(),
            Level::Error => "[ERROR]".red().bold(),
        }
    }
}

/// Formats one tagged console line.
pub fn format_line(level: Level, message: &str) -> String {
    format!("{} {}", level.tag(), message)
}

/// Tagged console output with a verbosity threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    verbosity: Verbosity,
}

impl Console {
    pub fn new(verbosity: Verbosity) -> Self {
        Console { verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Section banner.
    pub fn header(&self, title: &str) {
        if self.verbosity >= Verbosity::Normal {
            println!("\n{}", format!("=== {} ===", title).bold());
        }
    }

    pub fn info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            println!("{}", format_line(Level::Info, message));
        }
    }

    pub fn success(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            println!("{}", format_line(Level::Success, message));
        }
    }

    /// Printed at every verbosity.
    pub fn warning(&self, message: &str) {
        println!("{}", format_line(Level::Warning, message));
    }

    /// Printed at every verbosity, on stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{}", format_line(Level::Error, message));
    }

    /// Remediation hint following an error or warning. Printed at every verbosity.
    pub fn hint(&self, message: &str) {
        eprintln!("    {}", message.cyan());
    }

    /// Untagged text (next-steps blocks, listings).
    pub fn plain(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            println!("{}", message);
        }
    }

    /// Extra detail shown only with `--verbose`.
    pub fn detail(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            for line in message.lines() {
                println!("    {}", line.dimmed());
            }
        }
    }
}
