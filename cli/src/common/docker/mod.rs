//! # Redock Docker Module Interface
//!
//! File: cli/src/common/docker/mod.rs
//!
//! ## Overview
//!
//! The Docker implementation of redock's container engine capability. The
//! orchestrator only sees `DockerEngine` through the `ContainerEngine` trait;
//! everything else in here is plumbing around `bollard`.
//!
//! ## Architecture
//!
//! - **`connect`**: Opens the client to the local Docker daemon.
//! - **`image`**: Parses image references and derives container/host names.
//! - **`state`**: Read-only queries (container running state, image presence).
//! - **`lifecycle`**: Starting and stopping containers.
//! - **`operations`**: Creating containers and committing them to images.
//! - **`engine`**: `DockerEngine` / `DockerContainer`, tying the above together.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::docker::DockerEngine;
//! use crate::core::engine::ContainerEngine;
//!
//! # async fn run_example(cfg: crate::core::config::Config) -> crate::core::error::Result<()> {
//! let engine = DockerEngine::new(cfg.engine);
//! let image = engine.coerce("redock:devbox")?;
//! let base = engine.coerce("ubuntu:precise")?;
//! let mut container = engine.container(image, base, None).await?;
//! container.initialize().await?;
//! # Ok(())
//! # }
//! ```
//!

/// Opens the client to the local Docker daemon.
pub mod connect;
/// `ContainerEngine` / `ContainerHandle` implementations.
pub mod engine;
/// Image reference parsing and name derivation.
pub mod image;
/// Starting and stopping containers.
pub mod lifecycle;
/// Creating containers and committing them to images.
pub mod operations;
/// Container and image state queries.
pub mod state;

pub use engine::DockerEngine;
