//! # Redock Action Dispatcher
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Executes a resolved `ExecutionPlan`: every target, in the order given, goes
//! through the same three steps.
//!
//! 1. Coerce the target and the base image into `ImageRef`s.
//! 2. Bind a `ContainerHandle` to `(image, base, hostname)`.
//! 3. Run exactly one action handler on it (`start`, `stop` or `save`).
//!
//! The first failure aborts the plan; later targets are left untouched and
//! the error goes back to `main`, which turns it into exit status 1.
//!
//! ## Interactive sessions
//!
//! Only `start` with a single target, on a process whose stdin, stdout and
//! stderr are all terminals, hands the terminal to an SSH session (see
//! `start::run_session`). With several targets there is no single container
//! to connect to, so no session is started regardless of the terminal.
//!
//! ## Collaborators
//!
//! The dispatcher works against traits so it can be exercised without Docker:
//! - `ContainerEngine` (`core::engine`) for images and containers
//! - `TerminalProbe` (`common::system`) for terminal detection
//! - `SessionLauncher` (`common::process`) for the SSH client
//!

/// Implements the `save` action.
pub mod save;
/// Implements the `start` action and the interactive SSH handoff.
pub mod start;
/// Implements the `stop` action.
pub mod stop;

#[cfg(test)]
pub mod test_support;

use crate::common::process::SessionLauncher;
use crate::common::system::TerminalProbe;
use crate::core::engine::ContainerEngine;
use crate::core::error::Result;
use crate::core::plan::{Action, ExecutionPlan};
use anyhow::Context;
use tracing::{debug, info, instrument};

/// Runs `plan` against every target in order, stopping at the first failure.
#[instrument(skip_all, fields(action = %plan.action(), targets = plan.targets().len()))]
pub async fn dispatch(
    plan: &ExecutionPlan,
    engine: &dyn ContainerEngine,
    terminal: &dyn TerminalProbe,
    launcher: &dyn SessionLauncher,
) -> Result<()> {
    let interactive = plan.action() == Action::Start
        && plan.is_single_target()
        && terminal.all_streams_are_terminals();
    debug!("Interactive session handoff enabled: {}", interactive);

    for target in plan.targets() {
        info!("Processing '{}' ({})", target, plan.action());
        process_target(plan, target, engine, interactive, launcher)
            .await
            .with_context(|| format!("Failed to {} '{}'", plan.action(), target))?;
    }
    Ok(())
}

async fn process_target(
    plan: &ExecutionPlan,
    target: &str,
    engine: &dyn ContainerEngine,
    interactive: bool,
    launcher: &dyn SessionLauncher,
) -> Result<()> {
    let image = engine.coerce(target)?;
    let base = engine.coerce(plan.base_image())?;
    let mut container = engine
        .container(image, base, plan.hostname().map(str::to_string))
        .await?;

    match plan.action() {
        Action::Start => start::handle_start(container.as_mut(), interactive, launcher).await,
        Action::Stop => stop::handle_stop(container.as_mut()).await,
        Action::Save => save::handle_save(container.as_mut(), plan.commit_message()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{FixedTerminal, MockCall, MockEngine, MockLauncher, MockOp};
    use super::*;
    use crate::core::config::DefaultsConfig;
    use crate::core::error::RedockError;
    use crate::core::options::{self, ParseOutcome};

    fn plan(args: &[&str]) -> ExecutionPlan {
        let argv = std::iter::once("redock").chain(args.iter().copied());
        match options::resolve(argv, &DefaultsConfig::default()) {
            ParseOutcome::Proceed(plan) => plan,
            other => panic!("expected a plan for {args:?}, got {other:?}"),
        }
    }

    async fn run(
        args: &[&str],
        engine: &MockEngine,
        on_terminal: bool,
        exit_code: i32,
    ) -> Result<()> {
        let launcher = MockLauncher::exiting_with(engine.calls(), exit_code);
        dispatch(&plan(args), engine, &FixedTerminal(on_terminal), &launcher).await
    }

    fn is_session(call: &MockCall) -> bool {
        matches!(call, MockCall::Session(_))
    }

    fn is_detach(call: &MockCall) -> bool {
        matches!(call, MockCall::Detach(_))
    }

    #[tokio::test]
    async fn test_start_without_terminal_initializes_then_detaches() {
        let engine = MockEngine::new();
        run(&["start", "myimage"], &engine, false, 0).await.unwrap();

        let lifecycle: Vec<MockCall> = engine
            .recorded()
            .into_iter()
            .filter(|c| !matches!(c, MockCall::Coerce(_) | MockCall::Bind { .. }))
            .collect();
        assert_eq!(
            lifecycle,
            vec![
                MockCall::Initialize("myimage".into()),
                MockCall::Detach("myimage".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_start_on_terminal_runs_one_session_then_detaches() {
        for exit_code in [0, 1, 130] {
            let engine = MockEngine::new();
            run(&["start", "myimage"], &engine, true, exit_code)
                .await
                .unwrap();

            assert_eq!(engine.count(is_session), 1, "exit code {exit_code}");
            assert_eq!(engine.count(is_detach), 1, "exit code {exit_code}");
            let calls = engine.recorded();
            let session = calls.iter().position(is_session).unwrap();
            let detach = calls.iter().position(is_detach).unwrap();
            assert!(session < detach);
        }
    }

    #[tokio::test]
    async fn test_session_uses_hostname_override_as_alias() {
        let engine = MockEngine::new();
        run(&["-n", "myhost", "start", "myimage"], &engine, true, 0)
            .await
            .unwrap();
        assert!(engine.recorded().contains(&MockCall::Session("myhost".into())));
    }

    #[tokio::test]
    async fn test_multiple_targets_never_start_a_session() {
        let engine = MockEngine::new();
        run(&["start", "one", "two"], &engine, true, 0).await.unwrap();

        assert_eq!(engine.count(is_session), 0);
        assert_eq!(engine.count(is_detach), 2);
    }

    #[tokio::test]
    async fn test_stop_and_save_never_start_a_session() {
        for action in ["stop", "save"] {
            let engine = MockEngine::new();
            run(&[action, "myimage"], &engine, true, 0).await.unwrap();
            assert_eq!(engine.count(is_session), 0, "{action}");
        }
    }

    #[tokio::test]
    async fn test_base_and_hostname_reach_the_engine() {
        let engine = MockEngine::new();
        run(
            &["-b", "custombase", "-n", "myhost", "start", "myimage"],
            &engine,
            false,
            0,
        )
        .await
        .unwrap();

        assert!(engine.recorded().contains(&MockCall::Bind {
            image: "myimage".into(),
            base: "custombase".into(),
            hostname: Some("myhost".into()),
        }));
    }

    #[tokio::test]
    async fn test_default_base_reaches_the_engine() {
        let engine = MockEngine::new();
        run(&["stop", "myimage"], &engine, false, 0).await.unwrap();

        assert!(engine.recorded().contains(&MockCall::Bind {
            image: "myimage".into(),
            base: "ubuntu:precise".into(),
            hostname: None,
        }));
    }

    #[tokio::test]
    async fn test_save_with_message_commits_once() {
        let engine = MockEngine::new();
        run(&["save", "myimage", "-m", "fix bug"], &engine, true, 0)
            .await
            .unwrap();

        assert_eq!(
            engine.count(|c| matches!(c, MockCall::Commit { .. })),
            1
        );
        assert!(engine.recorded().contains(&MockCall::Commit {
            image: "myimage".into(),
            message: Some("fix bug".into()),
        }));
        assert_eq!(
            engine.count(|c| matches!(
                c,
                MockCall::Initialize(_) | MockCall::Stop(_) | MockCall::Detach(_)
            )),
            0
        );
    }

    #[tokio::test]
    async fn test_save_without_message_leaves_it_to_the_engine() {
        let engine = MockEngine::new();
        run(&["save", "myimage"], &engine, false, 0).await.unwrap();

        assert!(engine.recorded().contains(&MockCall::Commit {
            image: "myimage".into(),
            message: None,
        }));
    }

    #[tokio::test]
    async fn test_stop_processes_targets_in_order() {
        let engine = MockEngine::new();
        run(&["stop", "c", "a", "b"], &engine, false, 0).await.unwrap();

        let stopped: Vec<MockCall> = engine
            .recorded()
            .into_iter()
            .filter(|c| matches!(c, MockCall::Stop(_)))
            .collect();
        assert_eq!(
            stopped,
            vec![
                MockCall::Stop("c".into()),
                MockCall::Stop("a".into()),
                MockCall::Stop("b".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_targets() {
        let engine = MockEngine::new().failing_on("second", MockOp::Stop);
        let err = run(&["stop", "first", "second", "third"], &engine, false, 0)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to stop 'second'"));
        let calls = engine.recorded();
        assert!(calls.contains(&MockCall::Stop("first".into())));
        assert!(calls.contains(&MockCall::Stop("second".into())));
        assert!(!calls.iter().any(|c| match c {
            MockCall::Coerce(raw) => raw == "third",
            MockCall::Bind { image, .. } => image == "third",
            MockCall::Stop(name) => name == "third",
            _ => false,
        }));
    }

    #[tokio::test]
    async fn test_initialize_failure_skips_session_and_detach() {
        let engine = MockEngine::new().failing_on("myimage", MockOp::Initialize);
        let result = run(&["start", "myimage"], &engine, true, 0).await;

        assert!(result.is_err());
        assert_eq!(engine.count(is_session), 0);
        assert_eq!(engine.count(is_detach), 0);
    }

    #[tokio::test]
    async fn test_commit_failure_is_reported() {
        let engine = MockEngine::new().failing_on("myimage", MockOp::Commit);
        let err = run(&["save", "myimage"], &engine, false, 0)
            .await
            .unwrap_err();
        assert!(err
            .downcast_ref::<RedockError>()
            .map_or(false, |e| matches!(e, RedockError::Engine(_))));
    }

    #[tokio::test]
    async fn test_unresolvable_target_is_not_bound() {
        let engine = MockEngine::new();
        let launcher = MockLauncher::exiting_with(engine.calls(), 0);
        let plan = ExecutionPlan::new(
            Action::Start,
            vec!["bad name".to_string()],
            "ubuntu:precise".to_string(),
            None,
            None,
            Default::default(),
        )
        .unwrap();

        let err = dispatch(&plan, &engine, &FixedTerminal(false), &launcher)
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<RedockError>().map_or(false, |e| matches!(
            e,
            RedockError::ImageResolution { raw, .. } if raw == "bad name"
        )));
        assert_eq!(engine.count(|c| matches!(c, MockCall::Bind { .. })), 0);
    }

    #[tokio::test]
    async fn test_spawn_failure_fails_start() {
        let engine = MockEngine::new();
        let launcher = MockLauncher::failing(engine.calls());
        let result = dispatch(
            &plan(&["start", "myimage"]),
            &engine,
            &FixedTerminal(true),
            &launcher,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(engine.count(is_session), 1);
        assert_eq!(engine.count(is_detach), 0);
    }
}
