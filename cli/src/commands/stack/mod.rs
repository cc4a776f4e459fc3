//! # advisorctl Stack Command Group
//!
//! File: cli/src/commands/stack/mod.rs
//!
//! ## Overview
//!
//! Lifecycle commands for the advisor compose stack: `up`, `down`, `logs`,
//! `shell`, `test`, `interactive`, `prod`, `build`, `clean`, `status`, and
//! verbatim pass-through of any other subcommand to the compose tool.
//!
//! ## Architecture
//!
//! All handlers receive a `Stack`: the resolved configuration, the detected
//! compose flavour wrapped in a `Compose` builder, the process runner and the
//! console. The compose flavour is detected exactly once, in `Stack::detect`,
//! before any handler runs.
//!
//! - `forward`: commands that translate to a single compose invocation.
//! - `shell`: exec into the development or interactive service.
//! - `clean`: confirmation-guarded teardown of containers, images and volumes.
//! - `status`: container and image listing through the Docker Engine API.
//!
//! Every handler returns the exit code to propagate. Compose's own exit code
//! is passed through unchanged.
//!
pub mod clean;
pub mod forward;
pub mod shell;
pub mod status;

use crate::common::{
    docker::{compose, Compose},
    process::CommandRunner,
    ui::Console,
};
use crate::core::{
    config::Config,
    env_file::{self, EnvFileStatus},
    error::{AdvisorError, Result, ValidationCode},
};
use clap::Args;
use tracing::{debug, warn};

/// Arguments forwarded verbatim to compose, flags included.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct ForwardArgs {
    /// Extra arguments passed through to the compose tool.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Everything a stack handler needs.
pub struct Stack<'a> {
    pub cfg: &'a Config,
    pub compose: Compose,
    pub runner: &'a dyn CommandRunner,
    pub console: Console,
}

impl<'a> Stack<'a> {
    /// Detects the compose flavour. On failure the problem is reported and the
    /// `COMPOSE_NOT_AVAILABLE` exit code is returned as `Err`.
    pub async fn detect(
        cfg: &'a Config,
        runner: &'a dyn CommandRunner,
        console: Console,
    ) -> std::result::Result<Stack<'a>, i32> {
        match compose::detect_compose(runner).await {
            Some(tool) => Ok(Stack {
                cfg,
                compose: Compose::new(tool, &cfg.compose),
                runner,
                console,
            }),
            None => {
                console.error(&AdvisorError::ComposeUnavailable.to_string());
                console.hint("Install Docker Compose: https://docs.docker.com/compose/install/");
                console.hint("Run 'advisorctl validate' for a full environment check");
                Err(ValidationCode::ComposeNotAvailable.code())
            }
        }
    }
}

/// Creates the env file from its template when it is missing, with a
/// reminder to fill in the keys. A missing template is only a warning here;
/// compose reports what the services actually need.
pub fn prepare_env_file(cfg: &Config, console: &Console) -> Result<()> {
    match env_file::ensure_env_file(&cfg.env.file, &cfg.env.template)? {
        EnvFileStatus::Present => debug!("Env file {} present", cfg.env.file.display()),
        EnvFileStatus::CreatedFromTemplate => {
            console.warning(&format!(
                "Created {} from {}",
                cfg.env.file.display(),
                cfg.env.template.display()
            ));
            console.hint(&format!(
                "Edit {} and add your API keys, then run 'advisorctl validate'",
                cfg.env.file.display()
            ));
        }
        EnvFileStatus::Missing => {
            warn!("No env file and no template at {}", cfg.env.template.display());
            console.warning(&format!(
                "{} not found and no {} to create it from",
                cfg.env.file.display(),
                cfg.env.template.display()
            ));
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::process::testing::ScriptedRunner;
    use crate::common::ui::Verbosity;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_detect_without_compose_returns_code_three() {
        let cfg = Config::default();
        let runner = ScriptedRunner::new()
            .exit_code("docker compose", 1)
            .missing("docker-compose");
        let result = Stack::detect(&cfg, &runner, Console::new(Verbosity::Quiet)).await;
        assert_eq!(result.err(), Some(3));
    }

    #[test]
    fn test_prepare_env_file_copies_template() {
        let dir = tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.env.file = dir.path().join(".env");
        cfg.env.template = dir.path().join(".env.example");
        fs::write(&cfg.env.template, "POLYGON_API_KEY=your-polygon-api-key\n").unwrap();

        prepare_env_file(&cfg, &Console::new(Verbosity::Quiet)).unwrap();

        assert_eq!(
            fs::read_to_string(&cfg.env.file).unwrap(),
            "POLYGON_API_KEY=your-polygon-api-key\n"
        );
    }

    #[test]
    fn test_prepare_env_file_tolerates_missing_template() {
        let dir = tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.env.file = dir.path().join(".env");
        cfg.env.template = dir.path().join(".env.example");
        assert!(prepare_env_file(&cfg, &Console::new(Verbosity::Quiet)).is_ok());
        assert!(!cfg.env.file.exists());
    }
}
