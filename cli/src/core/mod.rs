//! # Redock Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the foundational pieces every part of redock relies on.
//!
//! ## Architecture
//!
//! - `config`: Optional `config.toml` loading and validation
//! - `engine`: The `ContainerEngine` / `ContainerHandle` capability traits and `ImageRef`
//! - `error`: `RedockError` and the crate-wide `Result` alias
//! - `options`: The command-line resolver producing a `ParseOutcome`
//! - `plan`: `Action`, `Verbosity` and the validated `ExecutionPlan`
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{RedockError, Result}; // For error handling
//! use crate::core::options::{self, ParseOutcome}; // For resolving argv
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod options;
pub mod plan;
