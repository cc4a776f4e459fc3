//! # advisorctl Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Every interaction advisorctl has with the outside world (other than the
//! HTTP probes and the Docker API listing in `status`) is an external command:
//! `docker`, `docker compose` / `docker-compose`, and the test runner inside
//! a container. This module wraps them behind the `CommandRunner` trait so the
//! validation pipeline and the command handlers can be driven by a scripted
//! runner in tests.
//!
//! ## Architecture
//!
//! - `CommandSpec`: program plus arguments, with a shell-like display form for messages.
//! - `CommandOutput`: exit code and captured stdout/stderr.
//! - `CommandRunner`: two operations,
//!   - `capture`: run to completion with output captured (used by checks),
//!   - `stream`: run with the terminal's stdin/stdout/stderr attached and
//!     return the exit code (used by `up`, `logs`, `shell`, ...).
//! - `SystemRunner`: the real implementation on top of `tokio::process::Command`.
//!
//! Commands are always awaited to completion before the caller moves on; the
//! tool never runs two external commands at once.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{CommandRunner, CommandSpec, SystemRunner};
//!
//! # async fn run_example() -> Result<()> {
//! let runner = SystemRunner;
//! let output = runner.capture(&CommandSpec::new("docker", ["--version"])).await?;
//! if output.success() {
//!     println!("{}", output.stdout.trim());
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{AdvisorError, Result};
use anyhow::anyhow;
use async_trait::async_trait;
use std::{fmt, process::Stdio};
use tokio::process::Command;
use tracing::{debug, instrument};

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    /// Space-joined form, quoting arguments that contain whitespace.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of a captured command run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes external commands.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `command` to completion with stdout and stderr captured.
    ///
    /// A non-zero exit is *not* an error; it is reported through
    /// `CommandOutput::code`. An `Err` means the program could not be launched.
    async fn capture(&self, command: &CommandSpec) -> Result<CommandOutput>;

    /// Runs `command` attached to the terminal and returns its exit code.
    async fn stream(&self, command: &CommandSpec) -> Result<i32>;
}

/// True when `command` can be launched and exits with status 0.
pub async fn succeeds(runner: &dyn CommandRunner, command: &CommandSpec) -> bool {
    match runner.capture(command).await {
        Ok(output) => output.success(),
        Err(e) => {
            debug!("'{}' could not be run: {:#}", command, e);
            false
        }
    }
}

/// `CommandRunner` backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    #[instrument(skip(self), fields(command = %command))]
    async fn capture(&self, command: &CommandSpec) -> Result<CommandOutput> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                anyhow!(AdvisorError::Spawn {
                    program: command.program.clone(),
                    reason: e.to_string(),
                })
            })?;
        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!("'{}' exited with {:?}", command, result.code);
        Ok(result)
    }

    #[instrument(skip(self), fields(command = %command))]
    async fn stream(&self, command: &CommandSpec) -> Result<i32> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .await
            .map_err(|e| {
                anyhow!(AdvisorError::Spawn {
                    program: command.program.clone(),
                    reason: e.to_string(),
                })
            })?;
        debug!("'{}' exited with {:?}", command, status.code());
        // Signal termination has no code; report it as a generic failure.
        Ok(status.code().unwrap_or(1))
    }
}
