//! # Redock Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the optional `config.toml` that tunes defaults the
//! command line does not cover: the default base image shown in the usage
//! text, the SSH client executable, and a couple of engine settings.
//!
//! ## Architecture
//!
//! Configuration sources (first match wins):
//! 1. The file named by the `REDOCK_CONFIG` environment variable (must exist)
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/redock/config.toml`)
//! 3. Default values defined in the code
//!
//! After loading, `~` in the SSH client path is expanded and the result is
//! validated before use. Loading happens before the logger exists, so `main`
//! logs the outcome afterwards.
//!
//! ## Examples
//!
//! ```toml
//! [defaults]
//! base_image = "ubuntu:precise"
//!
//! [ssh]
//! client = "~/bin/ssh"
//!
//! [engine]
//! stop_timeout = 5
//! init_command = ["/usr/sbin/sshd", "-D"]
//! ```
//!
use crate::core::error::{RedockError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "REDOCK_CONFIG";

/// Base image used when neither `--base` nor the config file names one.
pub const DEFAULT_BASE_IMAGE: &str = "ubuntu:precise";

/// Represents the main configuration structure, loaded from TOML.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub ssh: SshConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Defaults applied by the command-line resolver.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Base image used when `--base` is not given.
    #[serde(default = "default_base_image")]
    pub base_image: String,
}

/// Settings for the interactive SSH client.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SshConfig {
    /// Executable spawned for interactive sessions (can use ~).
    #[serde(default = "default_ssh_client")]
    pub client: String,
}

/// Settings passed through to the Docker engine backend.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Seconds Docker waits for a graceful stop before killing.
    #[serde(default = "default_stop_timeout")]
    pub stop_timeout: u32,
    /// Command a freshly created container runs (keeps it alive and reachable).
    #[serde(default = "default_init_command")]
    pub init_command: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            base_image: default_base_image(),
        }
    }
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            client: default_ssh_client(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stop_timeout: default_stop_timeout(),
            init_command: default_init_command(),
        }
    }
}

fn default_base_image() -> String {
    DEFAULT_BASE_IMAGE.to_string()
}
fn default_ssh_client() -> String {
    "ssh".to_string()
}
fn default_stop_timeout() -> u32 {
    10
}
fn default_init_command() -> Vec<String> {
    vec!["/usr/sbin/sshd".to_string(), "-D".to_string()]
}

/// A validated configuration and the file it was read from, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

/// Loads, expands and validates the configuration.
///
/// Runs before logging is set up, so it reports what it found through the
/// returned `LoadedConfig` instead of logging.
pub fn load_config() -> Result<LoadedConfig> {
    let source = match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => Some(PathBuf::from(path)),
        None => user_config_path().filter(|path| path.is_file()),
    };
    let mut config = match &source {
        Some(path) => load_config_from_path(path)?,
        None => Config::default(),
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    Ok(LoadedConfig { config, source })
}

/// `config.toml` in the platform config directory (e.g. `~/.config/redock/`).
fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "Redock", "redock")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .map_err(|e| anyhow!(RedockError::Config(e.to_string())))
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn expand_config_paths(config: &mut Config) {
    config.ssh.client = shellexpand::tilde(&config.ssh.client).into_owned();
}

fn validate_config(config: &Config) -> Result<()> {
    if config.defaults.base_image.trim().is_empty() {
        return Err(anyhow!(RedockError::Config(
            "defaults.base_image cannot be empty.".to_string()
        )));
    }
    if config.ssh.client.trim().is_empty() {
        return Err(anyhow!(RedockError::Config(
            "ssh.client cannot be empty.".to_string()
        )));
    }
    if config.engine.init_command.is_empty() {
        return Err(anyhow!(RedockError::Config(
            "engine.init_command needs at least the program to run.".to_string()
        )));
    }
    Ok(())
}
