//! # Redock Docker Operations
//!
//! File: cli/src/common/docker/operations.rs
//!
//! ## Overview
//!
//! The two operations that produce something new in Docker:
//!
//! - **`create_container`**: a long-running container from an image, with a
//!   hostname and an init command (by default an SSH daemon) so the user can
//!   connect to it later.
//! - **`commit_container`**: a snapshot of a container's filesystem changes,
//!   written back into an image.
//!
use crate::core::error::{RedockError, Result};
use anyhow::{anyhow, Context};
use bollard::{
    container::{Config as ContainerConfig, CreateContainerOptions},
    image::CommitContainerOptions,
    Docker,
};
use tracing::{debug, info, instrument};

/// Settings for a container about to be created.
#[derive(Debug, Clone)]
pub struct CreateSpec<'a> {
    pub name: &'a str,
    pub image: &'a str,
    pub hostname: &'a str,
    pub command: &'a [String],
}

/// Creates (but does not start) a container.
///
/// # Errors
///
/// * `RedockError::Engine` - The image is not available locally (Docker 404)
///   or the name is already taken (Docker 409).
/// * `RedockError::DockerApi` - Any other Docker failure.
#[instrument(skip(docker, spec), fields(container = %spec.name, image = %spec.image))]
pub async fn create_container(docker: &Docker, spec: &CreateSpec<'_>) -> Result<()> {
    let config = ContainerConfig {
        image: Some(spec.image.to_string()),
        hostname: Some(spec.hostname.to_string()),
        cmd: Some(spec.command.to_vec()),
        // Keep a TTY and stdin open so shells started inside behave.
        tty: Some(true),
        open_stdin: Some(true),
        ..Default::default()
    };
    let options = Some(CreateContainerOptions {
        name: spec.name.to_string(),
        platform: None,
    });

    info!(
        "Creating container '{}' from image '{}' (hostname: {})",
        spec.name, spec.image, spec.hostname
    );
    match docker.create_container(options, config).await {
        Ok(response) => {
            debug!("Created container '{}' with ID {}", spec.name, response.id);
            Ok(())
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => Err(anyhow!(RedockError::Engine(format!(
            "Image '{}' is not available locally; pull it with 'docker pull {}'",
            spec.image, spec.image
        )))),
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 409,
            message,
        }) => Err(anyhow!(RedockError::Engine(format!(
            "Container name '{}' is already in use: {}",
            spec.name, message
        )))),
        Err(e) => Err(anyhow!(RedockError::DockerApi { source: e }))
            .with_context(|| format!("Failed to create container '{}'", spec.name)),
    }
}

/// Commits `container` into `repository:tag` with `comment` as the message.
///
/// # Errors
///
/// * `RedockError::Engine` - The container does not exist (Docker 404).
/// * `RedockError::DockerApi` - Any other Docker failure.
#[instrument(skip(docker, comment))]
pub async fn commit_container(
    docker: &Docker,
    container: &str,
    repository: &str,
    tag: &str,
    comment: &str,
) -> Result<()> {
    let options = CommitContainerOptions {
        container: container.to_string(),
        repo: repository.to_string(),
        tag: tag.to_string(),
        comment: comment.to_string(),
        author: "redock".to_string(),
        pause: true,
        changes: None,
    };

    info!(
        "Committing container '{}' to image '{}:{}'",
        container, repository, tag
    );
    match docker
        .commit_container(options, ContainerConfig::<String>::default())
        .await
    {
        Ok(commit) => {
            debug!("Commit result: {:?}", commit);
            Ok(())
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => Err(anyhow!(RedockError::Engine(format!(
            "Cannot save container '{}': it does not exist",
            container
        )))),
        Err(e) => Err(anyhow!(RedockError::DockerApi { source: e }))
            .with_context(|| format!("Failed to commit container '{}'", container)),
    }
}
