//! # Redock Container Engine Capabilities
//!
//! File: cli/src/core/engine.rs
//!
//! ## Overview
//!
//! The orchestrator never talks to Docker directly. It sees the container engine
//! through the two traits in this module:
//!
//! - **`ContainerEngine`**: turns raw strings into `ImageRef`s and hands out a
//!   `ContainerHandle` for an `(image, base, hostname)` triple.
//! - **`ContainerHandle`**: the per-container capability set used by the
//!   `start`, `stop` and `save` actions.
//!
//! The production implementation lives in `common::docker::engine`; the
//! dispatcher tests drive a recording mock instead.
//!
//! ## Lifecycle
//!
//! Conceptually a container moves through
//! `Absent -> Initialized -> (Attached <-> Detached) -> Stopped`. Saving is a
//! side-transition from `Initialized`/`Detached` that produces a new image and
//! leaves the lifecycle state alone.
//!
use crate::core::error::Result;
use async_trait::async_trait;
use std::fmt;

/// An opaque reference to a container image, as produced by
/// [`ContainerEngine::coerce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Repository part, e.g. `ubuntu` or `registry.local:5000/team/app`.
    pub repository: String,
    /// Tag part, if one was given.
    pub tag: Option<String>,
}

impl ImageRef {
    /// The tag Docker falls back to when none is given.
    pub const DEFAULT_TAG: &'static str = "latest";

    pub fn new(repository: impl Into<String>, tag: Option<String>) -> Self {
        Self {
            repository: repository.into(),
            tag,
        }
    }

    /// The tag, or `latest` when none was given.
    pub fn tag_or_default(&self) -> &str {
        self.tag.as_deref().unwrap_or(Self::DEFAULT_TAG)
    }

    /// Fully qualified `repository:tag` form used in engine calls.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.repository, self.tag_or_default())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}:{}", self.repository, tag),
            None => write!(f, "{}", self.repository),
        }
    }
}

/// Capability set of a single container bound to an image, a base image and an
/// optional hostname.
#[async_trait]
pub trait ContainerHandle: Send + Sync {
    /// Creates and/or starts the underlying container.
    async fn initialize(&mut self) -> Result<()>;

    /// Releases foreground ownership of the container. Idempotent.
    async fn detach(&mut self) -> Result<()>;

    /// Stops the container. Fails if the engine refuses (e.g. already stopped).
    async fn stop(&mut self) -> Result<()>;

    /// Commits the container's filesystem changes back into its image.
    /// `None` leaves the annotation up to the engine.
    async fn commit_changes(&mut self, message: Option<&str>) -> Result<()>;

    /// Alias handed to the SSH client to reach this container.
    fn ssh_alias(&self) -> String;
}

/// Factory for image references and container handles.
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Parses a raw identifier into an image reference.
    ///
    /// # Errors
    ///
    /// `RedockError::ImageResolution` naming `raw` when it is malformed.
    fn coerce(&self, raw: &str) -> Result<ImageRef>;

    /// Binds a handle to `(image, base, hostname)` without starting anything.
    async fn container(
        &self,
        image: ImageRef,
        base: ImageRef,
        hostname: Option<String>,
    ) -> Result<Box<dyn ContainerHandle>>;
}
