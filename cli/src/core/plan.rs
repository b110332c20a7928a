//! # Redock Execution Plan
//!
//! File: cli/src/core/plan.rs
//!
//! ## Overview
//!
//! Typed values produced by the command-line resolver and consumed by the
//! action dispatcher:
//!
//! - **`Action`**: the closed set of things redock can do to a container.
//! - **`Verbosity`**: the invocation's logging level, raised one step per `-v`.
//! - **`ExecutionPlan`**: everything the dispatcher needs, validated once at
//!   construction and immutable afterwards.
//!
use crate::core::error::RedockError;
use std::fmt;
use std::str::FromStr;
use tracing::Level;

/// Action requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Save,
}

impl Action {
    /// Every supported keyword, in the order they are advertised.
    pub const SUPPORTED: [&'static str; 3] = ["start", "stop", "save"];

    pub fn keyword(self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Save => "save",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Action {
    type Err = RedockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Action::Start),
            "stop" => Ok(Action::Stop),
            "save" => Ok(Action::Save),
            other => Err(RedockError::UnsupportedAction {
                action: other.to_string(),
                supported: Action::SUPPORTED.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

/// Logging verbosity, ordered from quietest to noisiest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// One step noisier, saturating at `Debug`.
    pub fn raise(self) -> Self {
        match self {
            Verbosity::Normal => Verbosity::Verbose,
            Verbosity::Verbose | Verbosity::Debug => Verbosity::Debug,
        }
    }

    /// Verbosity after `count` occurrences of `-v`.
    pub fn from_occurrences(count: u8) -> Self {
        (0..count).fold(Verbosity::Normal, |level, _| level.raise())
    }

    /// Minimum tracing level that gets printed at this verbosity.
    pub fn level(self) -> Level {
        match self {
            Verbosity::Normal => Level::INFO,
            Verbosity::Verbose => Level::DEBUG,
            Verbosity::Debug => Level::TRACE,
        }
    }
}

/// A validated request: one action applied to an ordered list of targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    action: Action,
    targets: Vec<String>,
    base_image: String,
    hostname: Option<String>,
    commit_message: Option<String>,
    verbosity: Verbosity,
}

impl ExecutionPlan {
    /// Builds a plan, rejecting an empty target list.
    pub fn new(
        action: Action,
        targets: Vec<String>,
        base_image: String,
        hostname: Option<String>,
        commit_message: Option<String>,
        verbosity: Verbosity,
    ) -> Result<Self, RedockError> {
        if targets.is_empty() {
            return Err(RedockError::Usage(format!(
                "the '{}' action needs at least one container",
                action
            )));
        }
        Ok(Self {
            action,
            targets,
            base_image,
            hostname,
            commit_message,
            verbosity,
        })
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn base_image(&self) -> &str {
        &self.base_image
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// Commit message; only meaningful for `Action::Save`.
    pub fn commit_message(&self) -> Option<&str> {
        self.commit_message.as_deref()
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// True when exactly one target was given.
    pub fn is_single_target(&self) -> bool {
        self.targets.len() == 1
    }
}
