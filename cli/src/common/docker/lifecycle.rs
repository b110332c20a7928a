//! # Redock Docker Lifecycle Operations
//!
//! File: cli/src/common/docker/lifecycle.rs
//!
//! ## Overview
//!
//! State-changing calls for a single container: starting and stopping.
//!
//! Unlike a best-effort cleanup tool, `redock stop` reports when there was
//! nothing to stop. Docker's 304 (already stopped) and 404 (no such container)
//! responses therefore become `RedockError::Engine` errors here instead of
//! being swallowed.
//!
use crate::core::error::{RedockError, Result};
use anyhow::anyhow;
use bollard::container::{StartContainerOptions, StopContainerOptions};
use bollard::Docker;
use tracing::{error, info, instrument, warn};

/// Starts an existing container. Already running counts as success.
///
/// # Errors
///
/// * `RedockError::Engine` - The container does not exist (Docker 404).
/// * `RedockError::DockerApi` - Any other Docker failure.
#[instrument(skip(docker))]
pub async fn start_container(docker: &Docker, name: &str) -> Result<()> {
    info!("Starting container '{}'...", name);
    match docker
        .start_container(name, None::<StartContainerOptions<String>>)
        .await
    {
        Ok(_) => {
            info!("Container '{}' started.", name);
            Ok(())
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 304, ..
        }) => {
            info!("Container '{}' was already running.", name);
            Ok(())
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => Err(anyhow!(RedockError::Engine(format!(
            "Cannot start container '{}': it does not exist",
            name
        )))),
        Err(e) => {
            error!("Failed to start container '{}': {:?}", name, e);
            Err(anyhow!(RedockError::DockerApi { source: e })
                .context(format!("Failed to start container '{}'", name)))
        }
    }
}

/// Stops a running container, giving it `timeout_secs` to shut down.
///
/// # Errors
///
/// * `RedockError::Engine` - The container is not running (Docker 304) or
///   does not exist (Docker 404).
/// * `RedockError::DockerApi` - Any other Docker failure.
#[instrument(skip(docker))]
pub async fn stop_container(docker: &Docker, name: &str, timeout_secs: u32) -> Result<()> {
    info!(
        "Stopping container '{}' (timeout: {} seconds)...",
        name, timeout_secs
    );
    let options = Some(StopContainerOptions {
        t: i64::from(timeout_secs),
    });
    match docker.stop_container(name, options).await {
        Ok(_) => {
            info!("Container '{}' stopped.", name);
            Ok(())
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 304, ..
        }) => {
            warn!("Container '{}' is not running.", name);
            Err(anyhow!(RedockError::Engine(format!(
                "Cannot stop container '{}': it is not running",
                name
            ))))
        }
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => {
            warn!("Container '{}' does not exist.", name);
            Err(anyhow!(RedockError::Engine(format!(
                "Cannot stop container '{}': it does not exist",
                name
            ))))
        }
        Err(e) => {
            error!("Failed to stop container '{}': {:?}", name, e);
            Err(anyhow!(RedockError::DockerApi { source: e })
                .context(format!("Failed to stop container '{}'", name)))
        }
    }
}
