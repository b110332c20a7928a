//! # Redock Docker Engine
//!
//! File: cli/src/common/docker/engine.rs
//!
//! ## Overview
//!
//! `DockerEngine` and `DockerContainer` implement the `ContainerEngine` and
//! `ContainerHandle` capabilities on top of `bollard`.
//!
//! ## Naming
//!
//! - Container name: `redock-<repository>-<tag>` with characters Docker does
//!   not allow replaced by `-` (see `image::container_name`).
//! - Hostname: `--hostname`, else the image tag, else the last repository
//!   component.
//! - SSH alias: the hostname. Mapping that alias to the container is left to
//!   the user's SSH configuration.
//!
//! ## Connection
//!
//! The daemon client is opened on the first `container()` call, not when the
//! engine is built. `coerce` never needs a daemon, so a malformed target is
//! reported as such even when Docker is not running.
//!
//! ## Behaviour
//!
//! - `initialize`: running → nothing to do; stopped → start; absent → create
//!   from the image when it exists locally, otherwise from the base image,
//!   then start.
//! - `detach`: the engine never holds the container in the foreground, so this
//!   only records that the caller let go of it.
//! - `stop`: stop with the configured timeout; "not running" is an error.
//! - `commit_changes`: commit into the image reference. Without a message the
//!   engine writes its own dated annotation.
//!
use super::{image, lifecycle, operations, state};
use crate::core::config::EngineConfig;
use crate::core::engine::{ContainerEngine, ContainerHandle, ImageRef};
use crate::core::error::Result;
use anyhow::Context;
use async_trait::async_trait;
use bollard::Docker;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

/// Container engine backed by the local Docker daemon.
#[derive(Debug)]
pub struct DockerEngine {
    docker: OnceCell<Docker>,
    settings: EngineConfig,
}

impl DockerEngine {
    /// Engine that connects to the local daemon when first needed.
    pub fn new(settings: EngineConfig) -> Self {
        Self {
            docker: OnceCell::new(),
            settings,
        }
    }

    /// Engine using an already configured client.
    pub fn with_client(docker: Docker, settings: EngineConfig) -> Self {
        Self {
            docker: OnceCell::new_with(Some(docker)),
            settings,
        }
    }

    async fn client(&self) -> Result<&Docker> {
        self.docker
            .get_or_try_init(super::connect::connect_docker)
            .await
    }
}

#[async_trait]
impl ContainerEngine for DockerEngine {
    fn coerce(&self, raw: &str) -> Result<ImageRef> {
        image::parse_image_ref(raw)
    }

    async fn container(
        &self,
        image: ImageRef,
        base: ImageRef,
        hostname: Option<String>,
    ) -> Result<Box<dyn ContainerHandle>> {
        let docker = self.client().await?.clone();
        let name = image::container_name(&image);
        let hostname = image::derive_hostname(&image, hostname.as_deref());
        debug!(
            "Bound container '{}' (image: {}, base: {}, hostname: {})",
            name, image, base, hostname
        );
        Ok(Box::new(DockerContainer {
            docker,
            settings: self.settings.clone(),
            name,
            image,
            base,
            hostname,
            attached: false,
        }))
    }
}

/// One container managed through Docker.
#[derive(Debug)]
pub struct DockerContainer {
    docker: Docker,
    settings: EngineConfig,
    name: String,
    image: ImageRef,
    base: ImageRef,
    hostname: String,
    attached: bool,
}

impl DockerContainer {
    /// Image a new container is created from: the target image when it
    /// already exists, the base image otherwise.
    async fn source_image(&self) -> Result<String> {
        let image = self.image.reference();
        if state::image_exists(&self.docker, &image).await? {
            return Ok(image);
        }
        let base = self.base.reference();
        info!(
            "Image '{}' does not exist yet, creating container from base image '{}'",
            image, base
        );
        Ok(base)
    }
}

#[async_trait]
impl ContainerHandle for DockerContainer {
    #[instrument(skip(self), fields(container = %self.name))]
    async fn initialize(&mut self) -> Result<()> {
        match state::container_state(&self.docker, &self.name).await? {
            Some(true) => info!("Container '{}' is already running.", self.name),
            Some(false) => lifecycle::start_container(&self.docker, &self.name).await?,
            None => {
                let source = self.source_image().await?;
                let spec = operations::CreateSpec {
                    name: &self.name,
                    image: &source,
                    hostname: &self.hostname,
                    command: &self.settings.init_command,
                };
                operations::create_container(&self.docker, &spec).await?;
                lifecycle::start_container(&self.docker, &self.name)
                    .await
                    .with_context(|| format!("Created '{}' but could not start it", self.name))?;
            }
        }
        self.attached = true;
        Ok(())
    }

    #[instrument(skip(self), fields(container = %self.name))]
    async fn detach(&mut self) -> Result<()> {
        if self.attached {
            self.attached = false;
            info!(
                "Container '{}' keeps running in the background (stop it with 'redock stop {}').",
                self.name, self.image
            );
        } else {
            debug!("Container '{}' was not attached.", self.name);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(container = %self.name))]
    async fn stop(&mut self) -> Result<()> {
        lifecycle::stop_container(&self.docker, &self.name, self.settings.stop_timeout).await?;
        self.attached = false;
        Ok(())
    }

    #[instrument(skip(self, message), fields(container = %self.name))]
    async fn commit_changes(&mut self, message: Option<&str>) -> Result<()> {
        let comment = match message {
            Some(message) => message.to_string(),
            None => default_commit_message(&self.image),
        };
        operations::commit_container(
            &self.docker,
            &self.name,
            &self.image.repository,
            self.image.tag_or_default(),
            &comment,
        )
        .await?;
        info!("Saved container '{}' as image '{}'.", self.name, self.image.reference());
        Ok(())
    }

    fn ssh_alias(&self) -> String {
        self.hostname.clone()
    }
}

/// Annotation used when `save` is given no message.
fn default_commit_message(image: &ImageRef) -> String {
    format!(
        "Snapshot of {} saved by redock on {}",
        image.reference(),
        chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
    )
}
