//! Watch command handler.
//!
//! Runs one stream session and draws what it observes until Ctrl+C, or until
//! the session gives up when a reconnect cap is configured.

use std::future::Future;
use std::ops::ControlFlow;
use std::slice;
use std::sync::Arc;

use anyhow::Result;
use routewatch_client::{BroadcastEmitter, RouteWatcher};
use routewatch_core::{RouteView, SessionState, WatchEvent};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;
use uuid::Uuid;

use crate::bootstrap::CliContext;
use crate::commands::ViewArgs;
use crate::error::CliError;
use crate::presentation::{TerminalView, ViewMode};

const STARTING_STATUS: &str = "Starting log display...";
const INTERRUPTED_STATUS: &str = "Connection to log stream interrupted - will try to reconnect...";
const CLOSED_STATUS: &str = "Log stream closed.";

/// Watch the route log on stdout until Ctrl+C.
pub async fn execute(ctx: &CliContext, args: &ViewArgs) -> Result<()> {
    let emitter = BroadcastEmitter::with_defaults();
    let watcher = RouteWatcher::from_config(ctx.config(), Arc::new(emitter.clone()))
        .map_err(CliError::from)?;
    let view = TerminalView::stdout(args.mode()).with_selection(args.selection());

    run(&watcher, &emitter, &view, args, shutdown_signal()).await;
    Ok(())
}

/// Drive `view` from the watcher's events until `shutdown` resolves or the
/// session started here closes on its own.
///
/// `emitter` must be the emitter the watcher was built with. A session the
/// watcher was already running is replaced.
pub async fn run<V: RouteView>(
    watcher: &RouteWatcher,
    emitter: &BroadcastEmitter,
    view: &V,
    args: &ViewArgs,
    shutdown: impl Future<Output = ()>,
) {
    let mut events = emitter.subscribe();
    view.status(STARTING_STATUS);
    let session_id = watcher.start().await;
    tokio::pin!(shutdown);

    loop {
        let received = tokio::select! {
            () = &mut shutdown => break,
            received = events.recv() => received,
        };

        match received {
            Ok(event) => {
                if render(watcher, view, args, session_id, event).is_break() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Terminal fell behind the log stream");
                if args.mode() == ViewMode::Table {
                    view.refresh(&watcher.filter(&args.filter));
                }
            }
            Err(RecvError::Closed) => break,
        }
    }

    watcher.stop().await;
    view.status(CLOSED_STATUS);
}

fn render<V: RouteView>(
    watcher: &RouteWatcher,
    view: &V,
    args: &ViewArgs,
    session_id: Uuid,
    event: WatchEvent,
) -> ControlFlow<()> {
    match event {
        WatchEvent::RouteObserved { event } => match args.mode() {
            ViewMode::Log => {
                if event.matches(&args.filter) {
                    view.refresh(slice::from_ref(&event));
                }
            }
            ViewMode::Table => view.refresh(&watcher.filter(&args.filter)),
        },
        WatchEvent::Interrupted {
            retry_in_ms: Some(_),
            ..
        } => view.status(INTERRUPTED_STATUS),
        WatchEvent::Interrupted {
            retry_in_ms: None,
            attempt,
            ..
        } => view.status(&format!("Giving up after {attempt} failed attempts.")),
        WatchEvent::StateChanged {
            session_id: closed,
            state: SessionState::Closed,
        } if closed == session_id => return ControlFlow::Break(()),
        WatchEvent::StateChanged { .. } | WatchEvent::FrameRejected { .. } => {}
    }
    ControlFlow::Continue(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
