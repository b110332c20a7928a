//! # Redock Docker State Queries
//!
//! File: cli/src/common/docker/state.rs
//!
//! ## Overview
//!
//! Read-only questions the engine asks Docker before acting: does a container
//! exist (and is it running), and is an image available locally. A Docker 404
//! is an answer ("no"), not an error.
//!
use crate::core::error::{RedockError, Result};
use anyhow::anyhow;
use bollard::{container::InspectContainerOptions, Docker};
use tracing::{debug, error, instrument};

/// Running state of a container.
///
/// * `Ok(None)` - the container does not exist.
/// * `Ok(Some(running))` - the container exists.
#[instrument(skip(docker))]
pub async fn container_state(docker: &Docker, name: &str) -> Result<Option<bool>> {
    match docker
        .inspect_container(name, None::<InspectContainerOptions>)
        .await
    {
        Ok(details) => {
            let running = details
                .state
                .and_then(|state| state.running)
                .unwrap_or(false);
            debug!("Container '{}' exists (running: {}).", name, running);
            Ok(Some(running))
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => {
            debug!("Container '{}' does not exist (404).", name);
            Ok(None)
        }
        Err(e) => {
            error!("Error inspecting container '{}': {:?}", name, e);
            Err(anyhow!(RedockError::DockerApi { source: e })
                .context(format!("Failed to inspect container '{}'", name)))
        }
    }
}

/// Whether `reference` (e.g. `redock:devbox`) is available locally.
#[instrument(skip(docker))]
pub async fn image_exists(docker: &Docker, reference: &str) -> Result<bool> {
    match docker.inspect_image(reference).await {
        Ok(_) => {
            debug!("Image '{}' found locally.", reference);
            Ok(true)
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => {
            debug!("Image '{}' not found locally.", reference);
            Ok(false)
        }
        Err(e) => {
            error!("Error checking image '{}': {:?}", reference, e);
            Err(anyhow!(RedockError::DockerApi { source: e })
                .context(format!("Failed to check existence for image '{}'", reference)))
        }
    }
}
