//! # advisorctl Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! advisorctl validates and drives the Docker environment of the financial
//! advisor application. This file is the entry point. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the configuration once and routing to the command handlers
//! - Turning the handler's result into the process exit code
//!
//! ## Architecture
//!
//! - Each subcommand is a variant of the `Commands` enum. Unknown subcommands
//!   are captured by `Commands::External` and forwarded to compose verbatim.
//! - `validate` runs the validation pipeline and exits with its code.
//! - All other commands first detect the compose flavour once (`Stack::detect`)
//!   and then run one or more compose invocations, exiting with compose's code.
//! - Errors propagate to this level, are printed as `Error: ...` and exit 1.
//!
//! ## Examples
//!
//! ```bash
//! advisorctl validate            # check everything, exit 0-8
//! advisorctl up -d               # development profile, detached
//! advisorctl test -k metrics     # pytest in the dev container
//! advisorctl -vv ps -a           # forwarded to `docker compose ps -a`, debug logs
//! ```
//!
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;

use crate::commands::{
    stack::{self, forward::Action, ForwardArgs, Stack},
    validate::{self, ValidateArgs},
};
use crate::common::{process::SystemRunner, ui::Console};
use crate::core::{config, error::Result};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "advisorctl",
    about = "Docker environment validation and orchestration for the financial advisor",
    long_about = "Validates the host (Docker, Compose, .env, API keys, images) and wraps the\n\
                  compose profiles of the advisor stack. Unknown subcommands are passed\n\
                  to compose unchanged.",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
    /// Env file to validate and create (overrides the configuration).
    #[arg(long, env = "ADVISORCTL_ENV_FILE", value_name = "PATH")]
    env_file: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the development environment.
    #[command(visible_alias = "start", disable_help_flag = true)]
    Up(ForwardArgs),
    /// Stop all services.
    #[command(visible_alias = "stop", disable_help_flag = true)]
    Down(ForwardArgs),
    /// Show service logs.
    #[command(disable_help_flag = true)]
    Logs(ForwardArgs),
    /// Open a bash shell in the development container.
    #[command(visible_alias = "bash")]
    Shell,
    /// Run the test suite in the development container.
    #[command(disable_help_flag = true)]
    Test(ForwardArgs),
    /// Run the advisor interactively.
    #[command(visible_alias = "dev")]
    Interactive,
    /// Start the production service.
    #[command(visible_alias = "production", disable_help_flag = true)]
    Prod(ForwardArgs),
    /// Build the images of every profile.
    #[command(disable_help_flag = true)]
    Build(ForwardArgs),
    /// Remove containers, images and volumes (asks first).
    Clean,
    /// Show the project's containers and images.
    Status,
    /// Validate the Docker environment and API configuration.
    Validate(ValidateArgs),
    /// Any other subcommand is passed to compose.
    #[command(external_subcommand)]
    External(Vec<String>),
}

impl Commands {
    /// Commands that start containers reading the env file.
    fn needs_env_file(&self) -> bool {
        matches!(
            self,
            Commands::Up(_)
                | Commands::Shell
                | Commands::Test(_)
                | Commands::Interactive
                | Commands::Prod(_)
                | Commands::Build(_)
        )
    }
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(0);
    };

    let mut cfg = config::load_config()?;
    if let Some(path) = cli.env_file {
        tracing::info!("Using env file from command line: {}", path.display());
        cfg.env.file = path;
    }

    if let Commands::Validate(args) = command {
        return validate::handle_validate(args, &cfg).await;
    }

    let console = Console::default();
    if command.needs_env_file() {
        stack::prepare_env_file(&cfg, &console)?;
    }

    let runner = SystemRunner;
    let stack = match Stack::detect(&cfg, &runner, console).await {
        Ok(stack) => stack,
        Err(code) => return Ok(code),
    };

    match command {
        Commands::Up(fwd) => stack::forward::handle_forward(&stack, Action::Up, &fwd.args).await,
        Commands::Down(fwd) => stack::forward::handle_forward(&stack, Action::Down, &fwd.args).await,
        Commands::Logs(fwd) => stack::forward::handle_forward(&stack, Action::Logs, &fwd.args).await,
        Commands::Test(fwd) => stack::forward::handle_forward(&stack, Action::Test, &fwd.args).await,
        Commands::Prod(fwd) => stack::forward::handle_forward(&stack, Action::Prod, &fwd.args).await,
        Commands::Build(fwd) => stack::forward::handle_forward(&stack, Action::Build, &fwd.args).await,
        Commands::Interactive => {
            stack::forward::handle_forward(&stack, Action::Interactive, &[]).await
        }
        Commands::Shell => stack::shell::handle_shell(&stack).await,
        Commands::Clean => stack::clean::handle_clean(&stack).await,
        Commands::Status => stack::status::handle_status(&stack).await,
        Commands::External(mut argv) => {
            if argv.is_empty() {
                return Ok(0);
            }
            let name = argv.remove(0);
            stack::forward::handle_forward(&stack, Action::PassThrough(name), &argv).await
        }
        Commands::Validate(args) => validate::handle_validate(args, &cfg).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Command execution failed: {:?}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    };
    std::process::exit(code);
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_is_accepted() {
        let cli = Cli::try_parse_from(["advisorctl"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_forward_args_keep_flags() {
        let cli = Cli::try_parse_from(["advisorctl", "up", "-d", "--build"]).unwrap();
        match cli.command {
            Some(Commands::Up(fwd)) => assert_eq!(fwd.args, vec!["-d", "--build"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_aliases() {
        for (alias, expect_shell) in [("bash", true), ("shell", true), ("dev", false)] {
            let cli = Cli::try_parse_from(["advisorctl", alias]).unwrap();
            assert_eq!(matches!(cli.command, Some(Commands::Shell)), expect_shell);
        }
        let cli = Cli::try_parse_from(["advisorctl", "production", "-d"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Prod(_))));
        let cli = Cli::try_parse_from(["advisorctl", "stop"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Down(_))));
    }

    #[test]
    fn test_unknown_subcommand_is_external() {
        let cli = Cli::try_parse_from(["advisorctl", "ps", "-a"]).unwrap();
        match cli.command {
            Some(Commands::External(argv)) => assert_eq!(argv, vec!["ps", "-a"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_validate_flags_do_not_clash_with_top_level_verbose() {
        let cli = Cli::try_parse_from(["advisorctl", "-v", "validate", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Some(Commands::Validate(args)) => assert!(args.verbose),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_env_file_override() {
        let cli = Cli::try_parse_from(["advisorctl", "--env-file", "/tmp/x.env", "status"]).unwrap();
        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/x.env")));
    }

    #[test]
    fn test_needs_env_file() {
        assert!(Commands::Up(ForwardArgs::default()).needs_env_file());
        assert!(!Commands::Clean.needs_env_file());
        assert!(!Commands::Status.needs_env_file());
    }
}
