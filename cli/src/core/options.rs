//! # Redock Command-Line Resolver
//!
//! File: cli/src/core/options.rs
//!
//! ## Overview
//!
//! Turns `argv` into a `ParseOutcome`:
//!
//! - `Proceed(ExecutionPlan)` when an action and at least one target were given,
//! - `ShowHelp` when `-h/--help` was passed,
//! - `Invalid(RedockError)` for anything the resolver cannot accept.
//!
//! Parsing uses `clap`'s derive API with its built-in help and version flags
//! turned off, because redock prints its own usage text (with the resolved
//! default base image filled in) and treats "help" as a normal outcome rather
//! than an error.
//!
//! ## Usage
//!
//! ```text
//! redock [OPTIONS] ACTION CONTAINER..
//!
//! redock start myimage
//! redock -b custombase -n myhost start myimage
//! redock save myimage -m "fix bug"
//! redock -vv stop first second
//! ```
//!
use crate::core::config::DefaultsConfig;
use crate::core::error::RedockError;
use crate::core::plan::{Action, ExecutionPlan, Verbosity};
use clap::{ArgAction, Parser};
use std::ffi::OsString;

/// Raw command-line options as parsed by clap.
#[derive(Parser, Debug)]
#[command(
    name = "redock",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct RawOptions {
    /// Override the base image.
    #[arg(short, long, value_name = "IMAGE")]
    base: Option<String>,

    /// Set the container host name.
    #[arg(short = 'n', long, value_name = "NAME")]
    hostname: Option<String>,

    /// Message for the image created by `save`.
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Make more noise (can be repeated).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Show the usage message and exit.
    #[arg(short, long, action = ArgAction::SetTrue)]
    help: bool,

    /// ACTION followed by one or more containers.
    #[arg(value_name = "ARGS")]
    positionals: Vec<String>,
}

/// Result of resolving the command line.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Dispatch this plan.
    Proceed(ExecutionPlan),
    /// Print the usage text and exit successfully.
    ShowHelp,
    /// Report the error, print the usage text and exit with status 1.
    Invalid(RedockError),
}

/// Resolves `argv` (including the program name) into a `ParseOutcome`.
pub fn resolve<I, T>(argv: I, defaults: &DefaultsConfig) -> ParseOutcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let raw = match RawOptions::try_parse_from(argv) {
        Ok(raw) => raw,
        Err(e) => return ParseOutcome::Invalid(RedockError::Usage(summarize_clap_error(&e))),
    };

    if raw.help {
        return ParseOutcome::ShowHelp;
    }

    let mut positionals = raw.positionals.into_iter();
    let (Some(keyword), targets) = (positionals.next(), positionals.collect::<Vec<_>>()) else {
        return ParseOutcome::Invalid(RedockError::Usage(
            "expected an action followed by at least one container".to_string(),
        ));
    };
    if targets.is_empty() {
        return ParseOutcome::Invalid(RedockError::Usage(format!(
            "expected at least one container after '{}'",
            keyword
        )));
    }

    let action = match keyword.parse::<Action>() {
        Ok(action) => action,
        Err(e) => return ParseOutcome::Invalid(e),
    };

    match ExecutionPlan::new(
        action,
        targets,
        raw.base.unwrap_or_else(|| defaults.base_image.clone()),
        raw.hostname,
        raw.message,
        Verbosity::from_occurrences(raw.verbose),
    ) {
        Ok(plan) => ParseOutcome::Proceed(plan),
        Err(e) => ParseOutcome::Invalid(e),
    }
}

/// First line of a clap error, without clap's `error: ` prefix.
fn summarize_clap_error(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let first_line = rendered.lines().next().unwrap_or_default();
    first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string()
}

/// Usage message, with `default_base` filled in.
pub fn usage(default_base: &str) -> String {
    format!(
        "\
Usage: redock [OPTIONS] ACTION CONTAINER..

Create and manage Docker containers and images. Supported actions are
`start', `stop' and `save'.

Supported options:

  -b, --base=IMAGE     override the base image (defaults to {base})
  -n, --hostname=NAME  set container host name (defaults to image tag)
  -m, --message=TEXT   message for image created with `save' action
  -v, --verbose        make more noise (can be repeated)
  -h, --help           show this message and exit",
        base = default_base
    )
}
