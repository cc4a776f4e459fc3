//! # advisorctl Compose Invocation Builder
//!
//! File: cli/src/common/docker/compose.rs
//!
//! ## Overview
//!
//! Two flavours of the compose tool exist in the wild: the v2 plugin invoked
//! as `docker compose ...` and the legacy v1 binary `docker-compose ...`.
//! Which one is available is detected once (`detect_compose`) and captured in
//! a `ComposeTool` value. Every later compose invocation is produced by
//! `Compose::command`, so the rest of the crate never concatenates command
//! strings itself.
//!
//! ## Architecture
//!
//! - `ComposeTool`: the detected flavour (`Plugin` or `LegacyBinary`).
//! - `Profile`: the compose profiles of the advisor stack
//!   (`development`, `production`, `interactive`).
//! - `Compose`: tool + manifest file + project name, producing `CommandSpec`s
//!   in the form `<tool> [-f FILE] [-p NAME] [--profile P]... <args>`.
//!
//! ## Usage
//!
//! ```rust
//! let tool = compose::detect_compose(&runner).await.ok_or(AdvisorError::ComposeUnavailable)?;
//! let compose = Compose::new(tool, &cfg.compose);
//! let up = compose.command(&[Profile::Development], ["up", "--build"]);
//! runner.stream(&up).await?;
//! ```
//!
use crate::common::process::{self, CommandRunner, CommandSpec};
use crate::core::config::ComposeConfig;
use std::path::PathBuf;
use tracing::{debug, info};

/// The compose flavour available on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeTool {
    /// `docker compose` (v2 plugin).
    Plugin,
    /// `docker-compose` (v1 standalone binary).
    LegacyBinary,
}

impl ComposeTool {
    /// Detection order: the plugin is preferred when both are installed.
    pub const DETECTION_ORDER: [ComposeTool; 2] = [ComposeTool::Plugin, ComposeTool::LegacyBinary];

    /// Command that succeeds only if this flavour is usable.
    pub fn version_command(self) -> CommandSpec {
        match self {
            ComposeTool::Plugin => CommandSpec::new("docker", ["compose", "version"]),
            ComposeTool::LegacyBinary => CommandSpec::new("docker-compose", ["--version"]),
        }
    }

    /// How the tool is spelled on the command line.
    pub fn label(self) -> &'static str {
        match self {
            ComposeTool::Plugin => "docker compose",
            ComposeTool::LegacyBinary => "docker-compose",
        }
    }

    fn base(self) -> CommandSpec {
        match self {
            ComposeTool::Plugin => CommandSpec::new("docker", ["compose"]),
            ComposeTool::LegacyBinary => CommandSpec::new("docker-compose", Vec::<String>::new()),
        }
    }
}

/// Resolves the compose flavour, or `None` if neither is available.
pub async fn detect_compose(runner: &dyn CommandRunner) -> Option<ComposeTool> {
    for tool in ComposeTool::DETECTION_ORDER {
        if process::succeeds(runner, &tool.version_command()).await {
            info!("Using compose tool: {}", tool.label());
            return Some(tool);
        }
        debug!("Compose flavour '{}' not available", tool.label());
    }
    None
}

/// Compose profiles declared by the advisor stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Development,
    Production,
    Interactive,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Development, Profile::Production, Profile::Interactive];

    pub fn name(self) -> &'static str {
        match self {
            Profile::Development => "development",
            Profile::Production => "production",
            Profile::Interactive => "interactive",
        }
    }
}

/// Builds compose invocations for the configured stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compose {
    tool: ComposeTool,
    file: Option<PathBuf>,
    project_name: Option<String>,
}

impl Compose {
    pub fn new(tool: ComposeTool, cfg: &ComposeConfig) -> Self {
        Compose {
            tool,
            file: cfg.file.clone(),
            project_name: cfg.project_name.clone(),
        }
    }

    /// `<tool> [-f FILE] [-p NAME] [--profile P]... <args>`
    pub fn command<I, S>(&self, profiles: &[Profile], args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spec = self.tool.base();
        if let Some(file) = &self.file {
            spec.args.push("-f".to_string());
            spec.args.push(file.to_string_lossy().into_owned());
        }
        if let Some(name) = &self.project_name {
            spec.args.push("-p".to_string());
            spec.args.push(name.clone());
        }
        for profile in profiles {
            spec.args.push("--profile".to_string());
            spec.args.push(profile.name().to_string());
        }
        spec.args.extend(args.into_iter().map(Into::into));
        spec
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::process::testing::ScriptedRunner;
    use crate::core::config::Config;

    #[test]
    fn test_plugin_command_layout() {
        let compose = Compose::new(ComposeTool::Plugin, &Config::default().compose);
        let cmd = compose.command(&[Profile::Development], ["up", "--build"]);
        assert_eq!(
            cmd.to_string(),
            "docker compose --profile development up --build"
        );
    }

    #[test]
    fn test_legacy_command_with_file_and_project() {
        let mut cfg = Config::default().compose;
        cfg.file = Some(PathBuf::from("docker/compose.yml"));
        cfg.project_name = Some("advisor".to_string());
        let compose = Compose::new(ComposeTool::LegacyBinary, &cfg);
        let cmd = compose.command(&Profile::ALL, ["down"]);
        assert_eq!(cmd.program, "docker-compose");
        assert_eq!(
            cmd.args,
            vec![
                "-f",
                "docker/compose.yml",
                "-p",
                "advisor",
                "--profile",
                "development",
                "--profile",
                "production",
                "--profile",
                "interactive",
                "down"
            ]
        );
    }

    #[tokio::test]
    async fn test_detect_prefers_plugin() {
        let runner = ScriptedRunner::new();
        assert_eq!(detect_compose(&runner).await, Some(ComposeTool::Plugin));
        assert_eq!(runner.calls(), vec!["docker compose version"]);
    }

    #[tokio::test]
    async fn test_detect_falls_back_to_legacy_binary() {
        let runner = ScriptedRunner::new().exit_code("docker compose", 1);
        assert_eq!(detect_compose(&runner).await, Some(ComposeTool::LegacyBinary));
    }

    #[tokio::test]
    async fn test_detect_none_available() {
        let runner = ScriptedRunner::new()
            .exit_code("docker compose", 1)
            .missing("docker-compose");
        assert_eq!(detect_compose(&runner).await, None);
    }
}
