//! # Redock Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! This module owns the one place where redock hands the terminal to another
//! program: the interactive SSH session started by `redock start` on a
//! terminal. It defines:
//!
//! - **`SessionLauncher`**: the "foreground session" capability. Given an SSH
//!   alias it runs a client to completion and yields the client's exit code.
//! - **`SshClient`**: the production launcher, spawning `ssh <alias>` (or the
//!   configured client) with inherited standard streams.
//! - **`SessionOutcome`**: exit code plus how long the session lasted.
//!
//! ## Architecture
//!
//! The child is awaited with no timeout. The session lasts exactly as long as
//! the user keeps it open; adding a deadline would only require a different
//! `SessionLauncher`, not a change in the dispatcher.
//!
//! A child that could not be spawned is an error. A child that ran and exited
//! non-zero is not; classifying that exit is the caller's job.
//!
use crate::core::error::{RedockError, Result};
use anyhow::anyhow;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Runs an interactive client against an SSH alias and reports its exit code.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    /// Blocks until the client exits.
    ///
    /// # Errors
    ///
    /// `RedockError::Engine` if the client could not be started or waited on.
    async fn run(&self, alias: &str) -> Result<i32>;
}

/// Launches an external SSH client as a child process.
#[derive(Debug, Clone)]
pub struct SshClient {
    program: String,
}

impl SshClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl SessionLauncher for SshClient {
    #[instrument(skip(self), fields(client = %self.program))]
    async fn run(&self, alias: &str) -> Result<i32> {
        debug!("Spawning '{} {}'", self.program, alias);
        let mut child = Command::new(&self.program).arg(alias).spawn().map_err(|e| {
            anyhow!(RedockError::Engine(format!(
                "Failed to launch SSH client '{}': {}",
                self.program, e
            )))
        })?;

        let status = child.wait().await.map_err(|e| {
            anyhow!(RedockError::Engine(format!(
                "Failed to wait for SSH client '{}': {}",
                self.program, e
            )))
        })?;
        debug!("SSH client finished with {}", status);
        // No exit code means the client was killed by a signal.
        Ok(status.code().unwrap_or(-1))
    }
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub exit_code: i32,
    pub elapsed: Duration,
}

impl SessionOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Whole milliseconds; humantime would otherwise print down to nanoseconds.
        let elapsed = Duration::from_millis(self.elapsed.as_millis() as u64);
        write!(
            f,
            "SSH client exited with status {} after {}",
            self.exit_code,
            humantime::format_duration(elapsed)
        )
    }
}
