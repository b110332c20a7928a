//! # Redock Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error taxonomy used throughout redock. Every failure
//! the orchestrator can report to the user is one of the `RedockError` variants
//! below, usually wrapped in an `anyhow::Error` with additional context.
//!
//! ## Architecture
//!
//! - `RedockError`: A custom error enum using `thiserror`.
//! - `Result<T>`: A type alias for `anyhow::Result<T>`.
//!
//! The variants map onto the ways an invocation can go wrong:
//! - Command-line input that cannot be understood (`Usage`, `UnsupportedAction`)
//! - Target or base identifiers that are not valid image references (`ImageResolution`)
//! - The container engine or the SSH client refusing to do what was asked
//!   (`Engine`, `DockerApi`)
//! - A broken `config.toml` (`Config`)
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if raw.is_empty() {
//!     return Err(anyhow!(RedockError::ImageResolution {
//!         raw: raw.to_string(),
//!         reason: "image name is empty".to_string(),
//!     }));
//! }
//!
//! // Check for a specific variant further up the stack
//! let is_usage = err
//!     .downcast_ref::<RedockError>()
//!     .map_or(false, |e| matches!(e, RedockError::Usage(_)));
//! ```
//!
use thiserror::Error;

/// Custom error type for redock.
#[derive(Error, Debug)]
pub enum RedockError {
    #[error("Invalid command line: {0}")]
    Usage(String),

    #[error("Action not supported: '{action}' (supported actions are: {})", supported.join(", "))]
    UnsupportedAction {
        action: String,
        supported: Vec<String>,
    },

    #[error("Invalid image reference '{raw}': {reason}")]
    ImageResolution { raw: String, reason: String },

    #[error("Container engine error: {0}")]
    Engine(String),

    #[error("Docker API interaction failed: {source}")]
    DockerApi {
        #[from]
        source: bollard::errors::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
