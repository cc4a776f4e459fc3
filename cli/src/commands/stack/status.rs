//! # advisorctl Status Handler
//!
//! File: cli/src/commands/stack/status.rs
//!
//! ## Overview
//!
//! `advisorctl status` shows the containers and images of the advisor
//! compose project, read straight from the Docker Engine API. Containers are
//! matched by the `com.docker.compose.project` label; images by their tag
//! prefix.
//!
//! ```text
//! CONTAINER ID   SERVICE              STATE     STATUS          PORTS
//! 3f2a9c1d7b44   advisor-dev          running   Up 2 minutes    0.0.0.0:8000->8000/tcp
//!
//! IMAGE ID       TAG                                  SIZE
//! 9b1e2f3a4c5d   advisor-advisor-dev:latest           1.2 GB
//! ```
//!
use super::Stack;
use crate::common::docker::{images, state};
use crate::core::error::Result;
use anyhow::Context;
use bollard::models::{ContainerSummary, ImageSummary, PortTypeEnum};
use tracing::info;

/// Label compose attaches with the service name.
const COMPOSE_SERVICE_LABEL: &str = "com.docker.compose.service";

const SHORT_ID_LEN: usize = 12;

/// Prints the project's containers and images.
pub async fn handle_status(stack: &Stack<'_>) -> Result<i32> {
    let project = stack.cfg.compose.effective_project_name()?;
    info!("Handling status for compose project '{}'", project);

    let containers = state::list_project_containers(&project)
        .await
        .context("Failed to list project containers")?;
    let images = images::list_project_images(&project)
        .await
        .context("Failed to list project images")?;

    stack.console.header(&format!("Compose project: {}", project));
    if containers.is_empty() {
        stack
            .console
            .plain("No containers. Start the stack with 'advisorctl up'.");
    } else {
        for line in container_table(&containers) {
            stack.console.plain(&line);
        }
    }
    stack.console.plain("");
    if images.is_empty() {
        stack
            .console
            .plain("No images. Build them with 'advisorctl build'.");
    } else {
        for line in image_table(&images) {
            stack.console.plain(&line);
        }
    }
    Ok(0)
}

/// First 12 hex digits of a Docker ID, without any `sha256:` prefix.
fn short_id(id: &str) -> String {
    id.trim_start_matches("sha256:")
        .chars()
        .take(SHORT_ID_LEN)
        .collect()
}

fn service_name(container: &ContainerSummary) -> String {
    container
        .labels
        .as_ref()
        .and_then(|labels| labels.get(COMPOSE_SERVICE_LABEL).cloned())
        .or_else(|| {
            container
                .names
                .as_ref()
                .and_then(|names| names.first())
                .map(|name| name.trim_start_matches('/').to_string())
        })
        .unwrap_or_else(|| "N/A".to_string())
}

fn ports(container: &ContainerSummary) -> String {
    let Some(ports) = &container.ports else {
        return String::new();
    };
    ports
        .iter()
        .map(|p| {
            let proto = match &p.typ {
                Some(PortTypeEnum::TCP) => "/tcp",
                Some(PortTypeEnum::UDP) => "/udp",
                Some(PortTypeEnum::SCTP) => "/sctp",
                _ => "",
            };
            match p.public_port {
                Some(public) => format!(
                    "{}:{}->{}{}",
                    p.ip.as_deref().unwrap_or("0.0.0.0"),
                    public,
                    p.private_port,
                    proto
                ),
                None => format!("{}{}", p.private_port, proto),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Header plus one row per container.
pub fn container_table(containers: &[ContainerSummary]) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<14} {:<22} {:<9} {:<22} {}",
        "CONTAINER ID", "SERVICE", "STATE", "STATUS", "PORTS"
    )];
    for c in containers {
        lines.push(
            format!(
                "{:<14} {:<22} {:<9} {:<22} {}",
                short_id(c.id.as_deref().unwrap_or("N/A")),
                service_name(c),
                c.state.as_deref().unwrap_or("N/A"),
                c.status.as_deref().unwrap_or("N/A"),
                ports(c)
            )
            .trim_end()
            .to_string(),
        );
    }
    lines
}

fn human_size(bytes: i64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes.max(0) as f64;
    let mut unit = 0;
    while size >= 1000.0 && unit < UNITS.len() - 1 {
        size /= 1000.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes.max(0), UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Header plus one row per image tag.
pub fn image_table(images: &[ImageSummary]) -> Vec<String> {
    let mut lines = vec![format!("{:<14} {:<44} {}", "IMAGE ID", "TAG", "SIZE")];
    for image in images {
        for tag in &image.repo_tags {
            lines.push(format!(
                "{:<14} {:<44} {}",
                short_id(&image.id),
                tag,
                human_size(image.size)
            ));
        }
    }
    lines
}
