//! # Redock System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Host inspection needed by the dispatcher. Right now that is a single
//! question: are stdin, stdout and stderr all attached to a real terminal?
//! The answer decides whether `redock start` hands the terminal over to an
//! interactive SSH session.
//!
//! The check sits behind the `TerminalProbe` trait so dispatcher tests can
//! pretend to be (or not be) interactive.
//!
use std::io::{stderr, stdin, stdout, IsTerminal};

/// Answers whether the process is running on an interactive terminal.
pub trait TerminalProbe {
    /// True only if stdin, stdout and stderr are all terminals.
    fn all_streams_are_terminals(&self) -> bool;
}

/// Probe backed by the process's real standard streams.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdTerminal;

impl TerminalProbe for StdTerminal {
    fn all_streams_are_terminals(&self) -> bool {
        stdin().is_terminal() && stdout().is_terminal() && stderr().is_terminal()
    }
}
