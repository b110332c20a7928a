//! Test doubles for the dispatcher: a recording container engine, a scripted
//! SSH launcher and a terminal probe with a fixed answer. All of them append to
//! one shared call log so tests can assert on ordering across collaborators.

use crate::common::process::SessionLauncher;
use crate::common::system::TerminalProbe;
use crate::core::engine::{ContainerEngine, ContainerHandle, ImageRef};
use crate::core::error::{RedockError, Result};
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Records which collaborator methods were called, and with what.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Coerce(String),
    Bind {
        image: String,
        base: String,
        hostname: Option<String>,
    },
    Initialize(String),
    Detach(String),
    Stop(String),
    Commit {
        image: String,
        message: Option<String>,
    },
    Session(String),
}

/// Handle operations that can be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOp {
    Initialize,
    Stop,
    Commit,
}

pub type CallLog = Arc<Mutex<Vec<MockCall>>>;

/// Container engine that records every call and fails where told to.
pub struct MockEngine {
    calls: CallLog,
    fail_on: Option<(String, MockOp)>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    /// Makes `op` fail for the container bound to image `image`.
    pub fn failing_on(mut self, image: &str, op: MockOp) -> Self {
        self.fail_on = Some((image.to_string(), op));
        self
    }

    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    pub fn recorded(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&MockCall) -> bool) -> usize {
        self.recorded().iter().filter(|c| pred(c)).count()
    }
}

#[async_trait]
impl ContainerEngine for MockEngine {
    fn coerce(&self, raw: &str) -> Result<ImageRef> {
        self.calls
            .lock()
            .unwrap()
            .push(MockCall::Coerce(raw.to_string()));
        if raw.is_empty() || raw.contains(char::is_whitespace) {
            return Err(anyhow!(RedockError::ImageResolution {
                raw: raw.to_string(),
                reason: "rejected by mock".to_string(),
            }));
        }
        Ok(match raw.split_once(':') {
            Some((repo, tag)) => ImageRef::new(repo, Some(tag.to_string())),
            None => ImageRef::new(raw, None),
        })
    }

    async fn container(
        &self,
        image: ImageRef,
        base: ImageRef,
        hostname: Option<String>,
    ) -> Result<Box<dyn ContainerHandle>> {
        let name = image.to_string();
        self.calls.lock().unwrap().push(MockCall::Bind {
            image: name.clone(),
            base: base.to_string(),
            hostname: hostname.clone(),
        });
        let fail = match &self.fail_on {
            Some((target, op)) if *target == name => Some(*op),
            _ => None,
        };
        Ok(Box::new(MockContainer {
            alias: hostname.unwrap_or_else(|| name.clone()),
            name,
            calls: self.calls(),
            fail,
        }))
    }
}

struct MockContainer {
    name: String,
    alias: String,
    calls: CallLog,
    fail: Option<MockOp>,
}

impl MockContainer {
    fn record(&self, call: MockCall, op: Option<MockOp>) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match (op, self.fail) {
            (Some(op), Some(fail)) if op == fail => Err(anyhow!(RedockError::Engine(format!(
                "mock {:?} failure for '{}'",
                op, self.name
            )))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ContainerHandle for MockContainer {
    async fn initialize(&mut self) -> Result<()> {
        self.record(MockCall::Initialize(self.name.clone()), Some(MockOp::Initialize))
    }

    async fn detach(&mut self) -> Result<()> {
        self.record(MockCall::Detach(self.name.clone()), None)
    }

    async fn stop(&mut self) -> Result<()> {
        self.record(MockCall::Stop(self.name.clone()), Some(MockOp::Stop))
    }

    async fn commit_changes(&mut self, message: Option<&str>) -> Result<()> {
        self.record(
            MockCall::Commit {
                image: self.name.clone(),
                message: message.map(str::to_string),
            },
            Some(MockOp::Commit),
        )
    }

    fn ssh_alias(&self) -> String {
        self.alias.clone()
    }
}

/// SSH launcher that records the alias and returns a scripted result.
pub struct MockLauncher {
    calls: CallLog,
    exit_code: Option<i32>,
}

impl MockLauncher {
    pub fn exiting_with(calls: CallLog, exit_code: i32) -> Self {
        Self {
            calls,
            exit_code: Some(exit_code),
        }
    }

    /// Launcher whose client cannot be spawned.
    pub fn failing(calls: CallLog) -> Self {
        Self {
            calls,
            exit_code: None,
        }
    }
}

#[async_trait]
impl SessionLauncher for MockLauncher {
    async fn run(&self, alias: &str) -> Result<i32> {
        self.calls
            .lock()
            .unwrap()
            .push(MockCall::Session(alias.to_string()));
        self.exit_code.ok_or_else(|| {
            anyhow!(RedockError::Engine(
                "Failed to launch SSH client 'ssh': No such file or directory".to_string()
            ))
        })
    }
}

/// Terminal probe with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedTerminal(pub bool);

impl TerminalProbe for FixedTerminal {
    fn all_streams_are_terminals(&self) -> bool {
        self.0
    }
}
