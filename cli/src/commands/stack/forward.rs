//! # advisorctl Forwarding Handlers
//!
//! File: cli/src/commands/stack/forward.rs
//!
//! ## Overview
//!
//! Commands that map onto exactly one compose invocation, run attached to the
//! terminal. User arguments are appended unchanged.
//!
//! | Command              | Compose invocation                                           |
//! |----------------------|--------------------------------------------------------------|
//! | `up` / `start`       | `--profile development up ARGS`                              |
//! | `down` / `stop`      | `<all profiles> down ARGS`                                   |
//! | `logs`               | `<all profiles> logs ARGS`                                   |
//! | `build`              | `<all profiles> build ARGS`                                  |
//! | `prod`               | `--profile production up ARGS`                               |
//! | `interactive` / `dev`| `--profile interactive run --rm <interactive service> ARGS`  |
//! | `test`               | `--profile development run --rm <dev service> <test cmd> ARGS`|
//! | anything else        | `<name> ARGS`                                                |
//!
use super::Stack;
use crate::common::{docker::Profile, process::CommandSpec};
use crate::core::error::Result;
use tracing::info;

/// A single-invocation stack command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Logs,
    Build,
    Prod,
    Interactive,
    Test,
    /// Unrecognised subcommand handed to compose as-is.
    PassThrough(String),
}

/// Builds the compose invocation for `action`.
pub fn command_for(stack: &Stack<'_>, action: &Action, args: &[String]) -> CommandSpec {
    let compose = &stack.compose;
    let services = &stack.cfg.compose;
    let mut argv: Vec<String> = Vec::new();
    let profiles: &[Profile] = match action {
        Action::Up => {
            argv.push("up".into());
            &[Profile::Development]
        }
        Action::Down => {
            argv.push("down".into());
            &Profile::ALL
        }
        Action::Logs => {
            argv.push("logs".into());
            &Profile::ALL
        }
        Action::Build => {
            argv.push("build".into());
            &Profile::ALL
        }
        Action::Prod => {
            argv.push("up".into());
            &[Profile::Production]
        }
        Action::Interactive => {
            argv.extend(["run".into(), "--rm".into(), services.interactive_service.clone()]);
            &[Profile::Interactive]
        }
        Action::Test => {
            argv.extend(["run".into(), "--rm".into(), services.dev_service.clone()]);
            argv.extend(stack.cfg.test.command.iter().cloned());
            &[Profile::Development]
        }
        Action::PassThrough(name) => {
            argv.push(name.clone());
            &[]
        }
    };
    argv.extend(args.iter().cloned());
    compose.command(profiles, argv)
}

/// Runs `action` attached to the terminal and returns compose's exit code.
pub async fn handle_forward(stack: &Stack<'_>, action: Action, args: &[String]) -> Result<i32> {
    let command = command_for(stack, &action, args);
    info!("Running {:?}: {}", action, command);
    match &action {
        Action::Up => stack.console.info("Starting the development environment..."),
        Action::Prod => stack.console.info("Starting the production service..."),
        Action::Interactive => stack.console.info("Starting an interactive advisor session..."),
        Action::Test => stack.console.info("Running the test suite in the development container..."),
        Action::Build => stack.console.info("Building images for all profiles..."),
        Action::Down => stack.console.info("Stopping all services..."),
        Action::Logs | Action::PassThrough(_) => {}
    }
    let code = stack.runner.stream(&command).await?;
    if code != 0 {
        stack
            .console
            .error(&format!("'{}' exited with code {}", command, code));
    }
    Ok(code)
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

    fn rendered(action: Action, args: &[&str]) -> String {
        let cfg = Config::default();
        let runner = ScriptedRunner::new();
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        command_for(&stack(&cfg, &runner), &action, &args).to_string()
    }

    #[test]
    fn test_up_uses_development_profile() {
        assert_eq!(
            rendered(Action::Up, &["-d"]),
            "docker compose --profile development up -d"
        );
    }

    #[test]
    fn test_down_and_logs_span_all_profiles() {
        assert_eq!(
            rendered(Action::Down, &[]),
            "docker compose --profile development --profile production --profile interactive down"
        );
        assert_eq!(
            rendered(Action::Logs, &["-f", "advisor-dev"]),
            "docker compose --profile development --profile production --profile interactive logs -f advisor-dev"
        );
    }

    #[test]
    fn test_prod_and_interactive() {
        assert_eq!(
            rendered(Action::Prod, &["-d"]),
            "docker compose --profile production up -d"
        );
        assert_eq!(
            rendered(Action::Interactive, &[]),
            "docker compose --profile interactive run --rm advisor-interactive"
        );
    }

    #[test]
    fn test_test_appends_runner_arguments() {
        assert_eq!(
            rendered(Action::Test, &["-k", "metrics", "-x"]),
            "docker compose --profile development run --rm advisor-dev python -m pytest -k metrics -x"
        );
    }

    #[test]
    fn test_pass_through_is_verbatim() {
        assert_eq!(
            rendered(Action::PassThrough("ps".to_string()), &["-a"]),
            "docker compose ps -a"
        );
    }

    #[tokio::test]
    async fn test_exit_code_is_propagated() {
        let cfg = Config::default();
        let runner = ScriptedRunner::new().exit_code("docker compose --profile production up", 17);
        let code = handle_forward(&stack(&cfg, &runner), Action::Prod, &[])
            .await
            .unwrap();
        assert_eq!(code, 17);
        assert_eq!(runner.calls(), vec!["docker compose --profile production up"]);
    }
}
