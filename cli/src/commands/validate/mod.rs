//! # advisorctl Validate Command
//!
//! File: cli/src/commands/validate/mod.rs
//!
//! ## Overview
//!
//! `advisorctl validate` answers one question: can this machine build and run
//! the advisor stack right now? It runs the ordered checks in `pipeline` and
//! exits with the code of the first failing check (see `ValidationCode`), so
//! it can gate CI jobs and onboarding scripts.
//!
//! ## Architecture
//!
//! - `keys`: required key rules and the connectivity probe endpoints.
//! - `pipeline`: the check sequence and its `ValidationReport`.
//! - this module: argument parsing, wiring the real process runner and HTTP
//!   client into the pipeline, and the final summary.
//!
//! ## Usage
//!
//! ```bash
//! advisorctl validate        # normal output
//! advisorctl validate -q     # errors, warnings and the verdict only
//! advisorctl validate -v     # also show output of failing commands
//! echo $?                    # 0 on success, 1-8 identify the failing check
//! ```
//!
pub mod keys;
pub mod pipeline;

use crate::common::{
    network::http::ReqwestProbe,
    process::SystemRunner,
    ui::{format_line, Console, Level, Verbosity},
};
use crate::core::{config::Config, error::Result};
use clap::Parser;
use pipeline::{Pipeline, ValidationReport};
use std::io::{self, Write};
use tracing::info;

/// Arguments for `advisorctl validate`.
#[derive(Parser, Debug, Default)]
#[command(about = "Validate the Docker environment and API configuration")]
pub struct ValidateArgs {
    /// Only print errors, warnings and the final result.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Print the output of failing commands.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ValidateArgs {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Runs the validation pipeline and returns its exit code.
pub async fn handle_validate(args: ValidateArgs, cfg: &Config) -> Result<i32> {
    info!("Handling validate command ({:?})", args);
    let console = Console::new(args.verbosity());
    let runner = SystemRunner;
    let probe = ReqwestProbe::new(cfg.validation.probe_timeout)?;

    console.header("Advisor Environment Validation");
    let report = Pipeline::new(cfg, &runner, &probe, console).run().await;
    print_summary(&console, &report)?;
    Ok(report.code.code())
}

fn print_summary(console: &Console, report: &ValidationReport) -> Result<()> {
    console.header("Summary");
    if report.passed() {
        write_summary(&mut io::stdout().lock(), console.verbosity(), report)
    } else {
        write_summary(&mut io::stderr().lock(), console.verbosity(), report)
    }
}

/// Writes the verdict line and, after a successful run, the next-steps block.
fn write_summary<W: Write>(out: &mut W, verbosity: Verbosity, report: &ValidationReport) -> Result<()> {
    match report.failed_at() {
        None => {
            let warnings = report.warnings().len();
            let message = if warnings == 0 {
                "All checks passed".to_string()
            } else {
                format!("All checks passed with {} warning(s)", warnings)
            };
            writeln!(out, "{}", format_line(Level::Success, &message))?;
            if verbosity >= Verbosity::Normal {
                for line in next_steps() {
                    writeln!(out, "{}", line)?;
                }
            }
        }
        Some(check) => writeln!(
            out,
            "{}",
            format_line(
                Level::Error,
                &format!(
                    "Validation failed at step {} ({}): exit code {} ({})",
                    check.order(),
                    check.name(),
                    report.code.code(),
                    report.code.label()
                )
            )
        )?,
    }
    Ok(())
}

fn next_steps() -> [&'static str; 6] {
    [
        "",
        "Next steps:",
        "  advisorctl up            Start the development environment",
        "  advisorctl interactive   Run the advisor interactively",
        "  advisorctl test          Run the test suite",
        "  advisorctl prod -d       Start the production service in the background",
    ]
}
