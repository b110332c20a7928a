//! # Redock Docker Connection Helper
//!
//! File: cli/src/common/docker/connect.rs
//!
//! ## Overview
//!
//! Provides `connect_docker`, the single place where redock opens a client to
//! the local Docker daemon. `DockerEngine` calls it once per invocation, when
//! the first container is bound, so `--help`, usage errors and malformed
//! image names never need a daemon.
//!
use crate::core::error::{RedockError, Result};
use anyhow::{anyhow, Context};
use bollard::Docker;
use tracing::{debug, instrument};

/// Establishes a connection to the local Docker daemon using default settings
/// (`DOCKER_HOST`, else the platform's default socket or named pipe).
///
/// # Errors
///
/// Returns an `Err` wrapping `RedockError::DockerApi` if the client cannot be
/// configured, with context hinting that the daemon may not be running.
#[instrument]
pub async fn connect_docker() -> Result<Docker> {
    let docker = Docker::connect_with_local_defaults()
        .map_err(|e| anyhow!(RedockError::DockerApi { source: e }))
        .context("Failed to connect to Docker daemon. Is it running and accessible?")?;
    debug!("Docker client configured.");
    Ok(docker)
}
