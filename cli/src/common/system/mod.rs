//! # advisorctl System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Host-level tool checks: is the container runtime installed, and is its
//! daemon reachable? Both are answered by running the `docker` CLI through a
//! `CommandRunner`, so they are exercised in tests without Docker.
//!
//! Compose detection lives next to the compose invocation builder in
//! `common::docker::compose`.
//!
use crate::common::process::{self, CommandRunner, CommandSpec};
use tracing::debug;

/// Runtime CLI binary name.
pub const DOCKER: &str = "docker";

/// Returns the `docker --version` banner if the runtime CLI is installed.
pub async fn docker_version(runner: &dyn CommandRunner) -> Option<String> {
    match runner.capture(&CommandSpec::new(DOCKER, ["--version"])).await {
        Ok(output) if output.success() => Some(output.stdout.trim().to_string()),
        Ok(output) => {
            debug!("docker --version exited with {:?}", output.code);
            None
        }
        Err(e) => {
            debug!("docker --version could not be run: {:#}", e);
            None
        }
    }
}

/// True when `docker info` succeeds, i.e. the daemon answers.
pub async fn daemon_running(runner: &dyn CommandRunner) -> bool {
    process::succeeds(runner, &CommandSpec::new(DOCKER, ["info"])).await
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::process::testing::ScriptedRunner;

    #[tokio::test]
    async fn test_docker_version_reports_banner() {
        let runner = ScriptedRunner::new().stdout("docker --version", "Docker version 27.3.1\n");
        assert_eq!(
            docker_version(&runner).await.as_deref(),
            Some("Docker version 27.3.1")
        );
    }

    #[tokio::test]
    async fn test_docker_missing() {
        let runner = ScriptedRunner::new().missing("docker");
        assert_eq!(docker_version(&runner).await, None);
        assert!(!daemon_running(&runner).await);
    }

    #[tokio::test]
    async fn test_daemon_down() {
        let runner = ScriptedRunner::new().exit_code("docker info", 1);
        assert!(!daemon_running(&runner).await);
    }
}
