//! # Redock Stop Action
//!
//! File: cli/src/commands/stop.rs
//!
//! Implements `redock stop`. A container that is not running makes the engine
//! refuse, and that refusal is reported rather than ignored.
//!
use crate::core::engine::ContainerHandle;
use crate::core::error::Result;

/// Runs the `stop` action against one container.
pub async fn handle_stop(container: &mut dyn ContainerHandle) -> Result<()> {
    container.stop().await
}
