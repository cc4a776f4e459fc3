//! # advisorctl Docker Image Listing
//!
//! File: cli/src/common/docker/images.rs
//!
//! ## Overview
//!
//! Lists the images built for the advisor's compose project. Compose names
//! the images it builds `<project>-<service>` (v2) or `<project>_<service>`
//! (v1), so the listing keeps every image with a repository tag starting
//! with the project name.
//!
use crate::core::error::{AdvisorError, Result};
use anyhow::anyhow;
use bollard::{image::ListImagesOptions, models::ImageSummary};
use tracing::{info, instrument};

use super::connect::connect_docker;

/// Lists local images whose tags belong to compose project `project`.
///
/// # Errors
///
/// Returns `AdvisorError::DockerApi` wrapped in `anyhow::Error` if the Docker API call fails.
#[instrument]
pub async fn list_project_images(project: &str) -> Result<Vec<ImageSummary>> {
    let docker = connect_docker().await?;
    info!("Listing images of compose project '{}'", project);
    let images = docker
        .list_images(Some(ListImagesOptions::<String> {
            all: false,
            ..Default::default()
        }))
        .await
        .map_err(|e| anyhow!(AdvisorError::DockerApi { source: e }).context("Failed to list images"))?;
    Ok(images
        .into_iter()
        .filter(|image| belongs_to_project(image, project))
        .collect())
}

/// True if any repository tag of `image` is named after `project`.
pub fn belongs_to_project(image: &ImageSummary, project: &str) -> bool {
    image.repo_tags.iter().any(|tag| {
        tag.strip_prefix(project)
            .is_some_and(|rest| rest.starts_with('-') || rest.starts_with('_') || rest.starts_with(':'))
    })
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn image(tags: &[&str]) -> ImageSummary {
        ImageSummary {
            repo_tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_belongs_to_project() {
        assert!(belongs_to_project(&image(&["advisor-advisor-dev:latest"]), "advisor"));
        assert!(belongs_to_project(&image(&["advisor_advisor-dev:latest"]), "advisor"));
        assert!(belongs_to_project(&image(&["advisor:latest"]), "advisor"));
        assert!(!belongs_to_project(&image(&["advisorbot:latest"]), "advisor"));
        assert!(!belongs_to_project(&image(&["python:3.12-slim"]), "advisor"));
        assert!(!belongs_to_project(&image(&[]), "advisor"));
    }
}
