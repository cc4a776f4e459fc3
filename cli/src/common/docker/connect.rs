//! # advisorctl Docker Connection Helper
//!
//! File: cli/src/common/docker/connect.rs
//!
//! ## Overview
//!
//! Provides `connect_docker`, which establishes a connection to the local
//! Docker daemon through the Engine API using `bollard`'s default settings.
//! Only the `status` command talks to the API directly; everything else goes
//! through the `docker` CLI (see `common::process`).
//!
//! ## Usage
//!
//! ```rust
//! use super::connect::connect_docker;
//!
//! async fn perform_listing() -> Result<()> {
//!     let docker = connect_docker().await?;
//!     // docker.list_containers(None).await?;
//!     Ok(())
//! }
//! ```
//!
use crate::core::error::{AdvisorError, Result};
use anyhow::{anyhow, Context};
use bollard::Docker;
use tracing::instrument;

/// Connects to the local Docker daemon (`/var/run/docker.sock`, `DOCKER_HOST`, ...).
///
/// # Errors
///
/// Returns `AdvisorError::DockerApi` with a hint about the daemon if the
/// connection cannot be established.
#[instrument]
pub async fn connect_docker() -> Result<Docker> {
    Docker::connect_with_local_defaults()
        .map_err(|e| anyhow!(AdvisorError::DockerApi { source: e }))
        .context("Failed to connect to Docker daemon. Is it running and accessible?")
}
