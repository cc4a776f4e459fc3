//! # advisorctl Docker Container State
//!
//! File: cli/src/common/docker/state.rs
//!
//! ## Overview
//!
//! Lists the containers that belong to the advisor's compose project. Compose
//! labels every container it creates with `com.docker.compose.project`, so a
//! label filter on the Engine API returns exactly the stack's containers,
//! whichever profile started them.
//!
use crate::core::error::{AdvisorError, Result};
use anyhow::anyhow;
use bollard::{container::ListContainersOptions, models::ContainerSummary};
use std::collections::HashMap;
use tracing::{error, info, instrument};

use super::connect::connect_docker;

/// Label compose attaches to every container of a project.
pub const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";

/// Lists all containers (running and stopped) of compose project `project`.
///
/// # Errors
///
/// Returns `AdvisorError::DockerApi` wrapped in `anyhow::Error` if the Docker API call fails.
#[instrument]
pub async fn list_project_containers(project: &str) -> Result<Vec<ContainerSummary>> {
    let docker = connect_docker().await?;
    let mut filters = HashMap::new();
    filters.insert(
        "label".to_string(),
        vec![format!("{}={}", COMPOSE_PROJECT_LABEL, project)],
    );
    let options = Some(ListContainersOptions {
        all: true,
        filters,
        ..Default::default()
    });

    info!("Listing containers of compose project '{}'", project);
    docker.list_containers(options).await.map_err(|e| {
        error!("Failed to list containers: {:?}", e);
        anyhow!(AdvisorError::DockerApi { source: e }).context("Failed to list containers")
    })
}
