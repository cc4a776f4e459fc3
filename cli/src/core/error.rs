//! # advisorctl Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types and the exit code registry used
//! throughout advisorctl.
//!
//! ## Architecture
//!
//! The error system consists of three pieces:
//! - `AdvisorError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//! - `ValidationCode`: The canonical process exit codes of `advisorctl validate`
//!
//! Internal failures (bad configuration, a command that cannot be spawned)
//! travel as `anyhow::Error` up to `main.rs`, which prints them and exits with
//! status 1. Validation failures are not errors in that sense: each check
//! reports its own problem and the pipeline exits with the matching
//! `ValidationCode`.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !path.exists() {
//!     return Err(AdvisorError::FileSystem(format!("Path not found: {}", path.display())))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for advisorctl.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Docker API interaction failed: {source}")]
    DockerApi {
        #[from]
        source: bollard::errors::Error,
    },

    #[error("Neither 'docker compose' nor 'docker-compose' is available.")]
    ComposeUnavailable,

    #[error("Failed to launch '{program}': {reason}")]
    Spawn { program: String, reason: String },

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },

    #[error("HTTP client error: {0}")]
    Http(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

/// Exit code registry of the validation pipeline.
///
/// The numbering is part of the CLI contract: scripts and CI jobs branch on
/// these values, so variants must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCode {
    /// All checks passed (warnings permitted).
    Success,
    DockerNotInstalled,
    DaemonNotRunning,
    ComposeNotAvailable,
    EnvMissing,
    RequiredKeysMissing,
    ApiConnectivityFailed,
    DockerBuildFailed,
    ContainerRunFailed,
    /// Reserved. The dev-tool probe only ever warns.
    DevToolMissing,
}

impl ValidationCode {
    /// Numeric process exit status for this code.
    pub fn code(self) -> i32 {
        match self {
            ValidationCode::Success => 0,
            ValidationCode::DockerNotInstalled => 1,
            ValidationCode::DaemonNotRunning => 2,
            ValidationCode::ComposeNotAvailable => 3,
            ValidationCode::EnvMissing => 4,
            ValidationCode::RequiredKeysMissing => 5,
            ValidationCode::ApiConnectivityFailed => 6,
            ValidationCode::DockerBuildFailed => 7,
            ValidationCode::ContainerRunFailed => 8,
            ValidationCode::DevToolMissing => 9,
        }
    }

    /// Short upper-case label, as printed in the final summary line.
    pub fn label(self) -> &'static str {
        match self {
            ValidationCode::Success => "SUCCESS",
            ValidationCode::DockerNotInstalled => "DOCKER_NOT_INSTALLED",
            ValidationCode::DaemonNotRunning => "DAEMON_NOT_RUNNING",
            ValidationCode::ComposeNotAvailable => "COMPOSE_NOT_AVAILABLE",
            ValidationCode::EnvMissing => "ENV_MISSING",
            ValidationCode::RequiredKeysMissing => "REQUIRED_KEYS_MISSING",
            ValidationCode::ApiConnectivityFailed => "API_CONNECTIVITY_FAILED",
            ValidationCode::DockerBuildFailed => "DOCKER_BUILD_FAILED",
            ValidationCode::ContainerRunFailed => "CONTAINER_RUN_FAILED",
            ValidationCode::DevToolMissing => "DEV_TOOL_MISSING",
        }
    }
}
