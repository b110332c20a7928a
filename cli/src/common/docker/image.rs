//! # Redock Image Reference Parsing
//!
//! File: cli/src/common/docker/image.rs
//!
//! ## Overview
//!
//! Coerces the strings users type (`myimage`, `ubuntu:precise`,
//! `registry.local:5000/team/app:v2`) into `ImageRef`s, and derives the names
//! redock uses for the container built from an image.
//!
//! Accepted grammar (a pragmatic subset of Docker's reference grammar):
//!
//! - `[REGISTRY[:PORT]/]PATH[:TAG]`
//! - `PATH` components are lowercase `[a-z0-9._-]` and start with a letter or digit
//! - `TAG` is 1 to 128 characters of `[A-Za-z0-9_.-]`, not starting with `.` or `-`
//! - digests (`@sha256:...`) are rejected
//!
use crate::core::engine::ImageRef;
use crate::core::error::{RedockError, Result};
use anyhow::anyhow;

const MAX_TAG_LEN: usize = 128;

/// Parses `raw` into an `ImageRef`.
///
/// # Errors
///
/// `RedockError::ImageResolution` naming `raw` and the first problem found.
pub fn parse_image_ref(raw: &str) -> Result<ImageRef> {
    let fail = |reason: &str| {
        anyhow!(RedockError::ImageResolution {
            raw: raw.to_string(),
            reason: reason.to_string(),
        })
    };

    if raw.is_empty() {
        return Err(fail("image name is empty"));
    }
    if raw.chars().any(char::is_whitespace) {
        return Err(fail("image name contains whitespace"));
    }
    if raw.contains('@') {
        return Err(fail("digest references are not supported"));
    }

    // A ':' after the last '/' separates the tag; earlier ones belong to a registry port.
    let (repository, tag) = match raw.rfind(':') {
        Some(idx) if !raw[idx..].contains('/') => (&raw[..idx], Some(&raw[idx + 1..])),
        _ => (raw, None),
    };

    if let Some(tag) = tag {
        validate_tag(tag).map_err(|reason| fail(&reason))?;
    }
    validate_repository(repository).map_err(|reason| fail(&reason))?;

    Ok(ImageRef::new(repository, tag.map(str::to_string)))
}

fn validate_tag(tag: &str) -> std::result::Result<(), String> {
    if tag.is_empty() {
        return Err("tag is empty".to_string());
    }
    if tag.len() > MAX_TAG_LEN {
        return Err(format!("tag is longer than {} characters", MAX_TAG_LEN));
    }
    if tag.starts_with(['.', '-']) {
        return Err("tag cannot start with '.' or '-'".to_string());
    }
    if let Some(c) = tag
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
    {
        return Err(format!("tag contains invalid character '{}'", c));
    }
    Ok(())
}

fn validate_repository(repository: &str) -> std::result::Result<(), String> {
    if repository.is_empty() {
        return Err("repository name is empty".to_string());
    }
    let mut components: Vec<&str> = repository.split('/').collect();

    // Leading component is a registry host when it looks like one.
    if components.len() > 1 {
        let first = components[0];
        if first.contains(['.', ':']) || first == "localhost" {
            validate_registry(first)?;
            components.remove(0);
        }
    }

    for component in components {
        if component.is_empty() {
            return Err("repository path has an empty component".to_string());
        }
        if !component.starts_with(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit()) {
            return Err(format!(
                "repository component '{}' must start with a lowercase letter or digit",
                component
            ));
        }
        if let Some(c) = component.chars().find(|c| {
            !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
        }) {
            return Err(format!(
                "repository component '{}' contains invalid character '{}'",
                component, c
            ));
        }
    }
    Ok(())
}

fn validate_registry(registry: &str) -> std::result::Result<(), String> {
    let (host, port) = match registry.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (registry, None),
    };
    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
    {
        return Err(format!("invalid registry host '{}'", host));
    }
    if let Some(port) = port {
        if port.parse::<u16>().is_err() {
            return Err(format!("invalid registry port '{}'", port));
        }
    }
    Ok(())
}

/// Hostname for a container: the override, else the image tag, else the last
/// path component of the repository.
pub fn derive_hostname(image: &ImageRef, hostname: Option<&str>) -> String {
    if let Some(hostname) = hostname {
        return hostname.to_string();
    }
    match &image.tag {
        Some(tag) => tag.clone(),
        None => image
            .repository
            .rsplit('/')
            .next()
            .unwrap_or(&image.repository)
            .to_string(),
    }
}

/// Docker container name redock uses for `image`.
pub fn container_name(image: &ImageRef) -> String {
    let raw = format!("redock-{}-{}", image.repository, image.tag_or_default());
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
