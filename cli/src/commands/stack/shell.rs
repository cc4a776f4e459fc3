//! # advisorctl Shell Handler
//!
//! File: cli/src/commands/stack/shell.rs
//!
//! ## Overview
//!
//! `advisorctl shell` opens bash inside the stack. If the development service
//! is already running the shell is exec'd there; otherwise the interactive
//! profile is started detached and the shell is exec'd into the interactive
//! service.
//!
use super::Stack;
use crate::common::{docker::Profile, process::CommandSpec};
use crate::core::error::{AdvisorError, Result};
use anyhow::anyhow;
use tracing::{debug, info};

const SHELL: &str = "bash";

/// `ps` query listing the running services of `profile`.
fn running_services_command(stack: &Stack<'_>, profile: Profile) -> CommandSpec {
    stack
        .compose
        .command(&[profile], ["ps", "--services", "--filter", "status=running"])
}

/// True when `service` appears in the running services of `profile`.
async fn is_running(stack: &Stack<'_>, profile: Profile, service: &str) -> Result<bool> {
    let output = stack
        .runner
        .capture(&running_services_command(stack, profile))
        .await?;
    if !output.success() {
        debug!("compose ps exited with {:?}", output.code);
        return Ok(false);
    }
    Ok(output.stdout.lines().any(|line| line.trim() == service))
}

fn exec_command(stack: &Stack<'_>, profile: Profile, service: &str) -> CommandSpec {
    stack.compose.command(&[profile], ["exec", service, SHELL])
}

/// Opens an interactive shell and returns its exit code.
pub async fn handle_shell(stack: &Stack<'_>) -> Result<i32> {
    let services = &stack.cfg.compose;

    if is_running(stack, Profile::Development, &services.dev_service).await? {
        info!("Development service '{}' is running", services.dev_service);
        stack
            .console
            .info(&format!("Opening a shell in {}...", services.dev_service));
        return stack
            .runner
            .stream(&exec_command(stack, Profile::Development, &services.dev_service))
            .await;
    }

    stack.console.info(&format!(
        "{} is not running; starting {}...",
        services.dev_service, services.interactive_service
    ));
    let start = stack.compose.command(&[Profile::Interactive], ["up", "-d"]);
    let output = stack.runner.capture(&start).await?;
    if !output.success() {
        return Err(anyhow!(AdvisorError::ExternalCommand {
            cmd: start.to_string(),
            status: output
                .code
                .map_or_else(|| "terminated by signal".to_string(), |c| c.to_string()),
            output: format!("{}{}", output.stdout, output.stderr).trim().to_string(),
        }));
    }

    stack.console.info(&format!(
        "Opening a shell in {}...",
        services.interactive_service
    ));
    stack
        .runner
        .stream(&exec_command(
            stack,
            Profile::Interactive,
            &services.interactive_service,
        ))
        .await
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::docker::{compose::ComposeTool, Compose};
    use crate::common::process::testing::ScriptedRunner;
    use crate::common::ui::{Console, Verbosity};
    use crate::core::config::Config;

    fn stack<'a>(cfg: &'a Config, runner: &'a ScriptedRunner) -> Stack<'a> {
        Stack {
            cfg,
            compose: Compose::new(ComposeTool::Plugin, &cfg.compose),
            runner,
            console: Console::new(Verbosity::Quiet),
        }
    }

    #[tokio::test]
    async fn test_execs_into_running_dev_service() {
        let cfg = Config::default();
        let runner = ScriptedRunner::new().stdout(
            "docker compose --profile development ps",
            "advisor-dev\n",
        );
        let code = handle_shell(&stack(&cfg, &runner)).await.unwrap();
        assert_eq!(code, 0);
        assert_eq!(
            runner.calls().last().map(String::as_str),
            Some("docker compose --profile development exec advisor-dev bash")
        );
    }

    #[tokio::test]
    async fn test_starts_interactive_profile_when_dev_not_running() {
        let cfg = Config::default();
        let runner = ScriptedRunner::new();
        handle_shell(&stack(&cfg, &runner)).await.unwrap();
        assert_eq!(
            runner.calls(),
            vec![
                "docker compose --profile development ps --services --filter status=running",
                "docker compose --profile interactive up -d",
                "docker compose --profile interactive exec advisor-interactive bash",
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_start_is_an_error() {
        let cfg = Config::default();
        let runner = ScriptedRunner::new().exit_code("docker compose --profile interactive up", 1);
        let err = handle_shell(&stack(&cfg, &runner)).await.unwrap_err();
        assert!(err.to_string().contains("up -d"));
        assert!(!runner.calls().iter().any(|c| c.contains(" exec ")));
    }
}
