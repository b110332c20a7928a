//! # Redock Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks that talk to the outside world on behalf of the
//! command logic in `commands::`:
//!
//! - **`docker`**: The Docker-backed container engine (via `bollard`).
//! - **`process`**: The interactive SSH session launcher.
//! - **`system`**: Host inspection (is this an interactive terminal?).
//!
//! Each of these is reached through a trait defined next to it (or in
//! `core::engine`), so the dispatcher can be tested without Docker, SSH or a
//! terminal.
//!

/// Docker implementation of the container engine capability.
pub mod docker;
/// Launching and awaiting the interactive SSH client.
pub mod process;
/// Terminal detection.
pub mod system;
