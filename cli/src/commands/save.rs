//! # Redock Save Action
//!
//! File: cli/src/commands/save.rs
//!
//! Implements `redock save`: commit the container's filesystem changes back
//! into its image. The `--message` text is passed through untouched; when it
//! is absent the engine decides how to annotate the commit.
//!
use crate::core::engine::ContainerHandle;
use crate::core::error::Result;

/// Runs the `save` action against one container.
pub async fn handle_save(container: &mut dyn ContainerHandle, message: Option<&str>) -> Result<()> {
    container.commit_changes(message).await
}
