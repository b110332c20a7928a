//! # Redock Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! `redock` creates ephemeral development containers from named images
//! (layered on a base image when the named image does not exist yet), drops
//! you into an SSH session inside them, and snapshots their changes back into
//! images when you are done.
//!
//! This file wires the pieces together:
//! - Load the optional configuration file
//! - Resolve the command line into a `ParseOutcome`
//! - Set up logging at the requested verbosity
//! - Hand the plan to the dispatcher with the Docker engine
//! - Turn any failure into exit status 1
//!
//! `--help` always succeeds. An unusable configuration file only produces a
//! warning there, and the usage text falls back to the built-in defaults.
//!
//! ## Examples
//!
//! ```bash
//! # Start (or create) a container for the `devbox` image and SSH into it
//! redock start devbox
//!
//! # Same, but build it on a different base image and with a custom hostname
//! redock -b debian:bookworm -n sandbox start devbox
//!
//! # Snapshot the container's changes back into the image
//! redock save devbox -m "Install toolchain"
//!
//! # Stop several containers, logging every Docker call
//! redock -vv stop devbox scratch
//! ```
//!
use std::io::IsTerminal;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Action dispatcher and per-action handlers
mod common; // Docker engine, SSH launcher, terminal detection
mod core; // Errors, config, command-line resolver, plan types

use crate::common::docker::DockerEngine;
use crate::common::process::SshClient;
use crate::common::system::StdTerminal;
use crate::core::config::{self, Config, DefaultsConfig, LoadedConfig};
use crate::core::error::Result;
use crate::core::options::{self, ParseOutcome};
use crate::core::plan::{ExecutionPlan, Verbosity};
use tracing::{debug, error, info, warn};

/// Installs the global tracing subscriber. `RUST_LOG` wins over `verbosity`.
fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.level().as_str().to_lowercase()));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .init();
}

/// Connects the real collaborators and dispatches `plan`.
async fn run(plan: &ExecutionPlan, cfg: &Config) -> Result<()> {
    let engine = DockerEngine::new(cfg.engine.clone());
    let launcher = SshClient::new(cfg.ssh.client.clone());
    commands::dispatch(plan, &engine, &StdTerminal, &launcher).await
}

/// Logs where the configuration came from, once a subscriber exists.
fn log_config_source(loaded: &LoadedConfig) {
    match &loaded.source {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file found, using defaults."),
    }
    debug!("Final loaded configuration: {:?}", loaded.config);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let loaded = config::load_config();
    let defaults = match &loaded {
        Ok(loaded) => loaded.config.defaults.clone(),
        Err(_) => DefaultsConfig::default(),
    };

    let plan = match options::resolve(std::env::args_os(), &defaults) {
        ParseOutcome::Proceed(plan) => plan,
        ParseOutcome::ShowHelp => {
            if let Err(e) = &loaded {
                init_logging(Verbosity::Normal);
                warn!("Ignoring unusable configuration: {:#}", e);
            }
            println!("{}", options::usage(&defaults.base_image));
            return;
        }
        ParseOutcome::Invalid(e) => {
            init_logging(Verbosity::Normal);
            if let Err(config_err) = &loaded {
                error!("Failed to load configuration: {:#}", config_err);
            }
            error!("Failed to parse command line arguments!");
            error!("{}", e);
            println!("{}", options::usage(&defaults.base_image));
            std::process::exit(1);
        }
    };

    init_logging(plan.verbosity());
    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    log_config_source(&loaded);
    debug!("Resolved execution plan: {:?}", plan);

    if let Err(e) = run(&plan, &loaded.config).await {
        error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
