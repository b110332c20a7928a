//! # Redock Start Action
//!
//! File: cli/src/commands/start.rs
//!
//! ## Overview
//!
//! Implements `redock start`: bring the container up, optionally hand the
//! terminal to an SSH session inside it, then let go of it.
//!
//! ## Architecture
//!
//! 1. `initialize` the container (create and/or start it).
//! 2. If the dispatcher decided the invocation is interactive (single target,
//!    all standard streams on a terminal), run the SSH client against the
//!    container's alias and wait for it, however long that takes.
//! 3. `detach` the container, whatever the SSH client's exit status was.
//!
//! A non-zero SSH exit is an ordinary way for an interactive session to end
//! (the user hit Ctrl-C, the connection dropped) and is logged as a warning.
//! Failing to launch the client at all is an error.
//!
use crate::common::process::{SessionLauncher, SessionOutcome};
use crate::core::engine::ContainerHandle;
use crate::core::error::Result;
use std::time::Instant;
use tracing::{info, warn};

/// Runs the `start` action against one container.
pub async fn handle_start(
    container: &mut dyn ContainerHandle,
    interactive: bool,
    launcher: &dyn SessionLauncher,
) -> Result<()> {
    container.initialize().await?;
    if interactive {
        run_session(&*container, launcher).await?;
    }
    container.detach().await
}

/// Connects the user's terminal to `container` over SSH and waits for the
/// client to exit.
pub async fn run_session(
    container: &dyn ContainerHandle,
    launcher: &dyn SessionLauncher,
) -> Result<SessionOutcome> {
    let timer = Instant::now();
    info!("Detected interactive terminal, connecting to container ..");
    let exit_code = launcher.run(&container.ssh_alias()).await?;
    let outcome = SessionOutcome {
        exit_code,
        elapsed: timer.elapsed(),
    };
    if outcome.succeeded() {
        info!("{}.", outcome);
    } else {
        warn!("{}.", outcome);
    }
    Ok(outcome)
}
