//! # advisorctl CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test gets a
//! `Sandbox`: a temporary project directory, an isolated home directory, and
//! a `bin/` directory holding a fake `docker` shell script that records every
//! invocation in `docker.log`. `PATH` is restricted to that directory, so the
//! real Docker is never touched.
//!
//! The fake answers `docker --version`, `docker info` and
//! `docker compose version` successfully. `FAKE_DOCKER_INFO_EXIT` and
//! `FAKE_COMPOSE_EXIT` override the exit codes of `docker info` and of every
//! other `docker compose` call.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Command for the compiled `advisorctl` binary.
pub fn advisorctl_cmd() -> Command {
    Command::cargo_bin("advisorctl").expect("Failed to find advisorctl binary for testing")
}

pub struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    /// Sandbox with the fake `docker` on `PATH`.
    pub fn new() -> Self {
        let sandbox = Self::without_docker();
        sandbox.install_fake_docker();
        sandbox
    }

    /// Sandbox whose `PATH` contains no `docker` at all.
    pub fn without_docker() -> Self {
        let root = tempfile::tempdir().expect("create sandbox");
        for dir in ["bin", "project", "home"] {
            fs::create_dir_all(root.path().join(dir)).expect("create sandbox dir");
        }
        Sandbox { root }
    }

    pub fn project(&self) -> PathBuf {
        self.root.path().join("project")
    }

    fn bin(&self) -> PathBuf {
        self.root.path().join("bin")
    }

    fn log_path(&self) -> PathBuf {
        self.root.path().join("docker.log")
    }

    /// Writes `content` to `name` inside the project directory.
    pub fn write(&self, name: &str, content: &str) {
        fs::write(self.project().join(name), content).expect("write project file");
    }

    pub fn exists(&self, name: &str) -> bool {
        self.project().join(name).exists()
    }

    /// Arguments of every fake `docker` invocation, one per line.
    pub fn docker_calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// `advisorctl` running inside the sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = advisorctl_cmd();
        cmd.current_dir(self.project())
            .env("PATH", self.bin())
            .env("HOME", self.root.path().join("home"))
            .env("XDG_CONFIG_HOME", self.root.path().join("home").join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("ADVISORCTL_ENV_FILE")
            .env_remove("RUST_LOG");
        cmd
    }

    fn install_fake_docker(&self) {
        let script = format!(
            r#"#!/bin/sh
echo "$*" >> "{log}"
case "$1" in
  --version)
    echo "Docker version 27.3.1, build fake"
    exit 0
    ;;
  info)
    exit "${{FAKE_DOCKER_INFO_EXIT:-0}}"
    ;;
  compose)
    if [ "$2" = "version" ]; then
      echo "Docker Compose version v2.29.7"
      exit 0
    fi
    exit "${{FAKE_COMPOSE_EXIT:-0}}"
    ;;
esac
exit 0
"#,
            log = self.log_path().display()
        );
        write_executable(&self.bin().join("docker"), &script);
    }
}

#[cfg(unix)]
fn write_executable(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;
    fs::write(path, content).expect("write fake tool");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).expect("chmod fake tool");
}

#[cfg(not(unix))]
fn write_executable(path: &Path, content: &str) {
    fs::write(path, content).expect("write fake tool");
}
