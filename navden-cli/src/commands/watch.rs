//! `watch` command: live dashboard over the backend WebSocket stream.
//!
//! The backend starts streaming as soon as the socket opens, so watching
//! also starts a run.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use navden::planner::MissionPlan;
use navden::stream::StreamAdapter;

use super::common::format_session_summary;
use crate::error::CliError;
use crate::runner::CliRunner;
use crate::tui_app::{install_shutdown_handler, run_headless, run_tui, Feed, TuiAppConfig};
use crate::ui::DashboardConfig;

/// Channel capacity between the adapter and the dashboard.
const STREAM_BUFFER: usize = 1024;

pub fn run(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("watch");

    let shutdown = Arc::new(AtomicBool::new(false));
    let cancel = CancellationToken::new();
    install_shutdown_handler(Arc::clone(&shutdown), cancel.clone())?;

    let (events_tx, events_rx) = mpsc::channel(STREAM_BUFFER);
    let adapter =
        StreamAdapter::for_backend(&runner.config().backend.url, events_tx, cancel.clone())?;
    let dashboard = DashboardConfig::new(adapter.url())
        .with_waypoints(MissionPlan::backend_default().targets())
        .with_jamming(runner.config().jamming.window());
    let handle = runner.handle().spawn(adapter.run());

    let app = TuiAppConfig {
        dashboard,
        feed: Feed::Stream(events_rx),
        shutdown,
        cancel,
    };
    let session = if atty::is(atty::Stream::Stdout) {
        run_tui(app)?
    } else {
        run_headless(app)?
    };

    match runner.block_on(handle) {
        Ok(Ok(())) => {}
        Ok(Err(e)) if !session.has_data() => return Err(e.into()),
        Ok(Err(e)) => tracing::warn!(error = %e, "Stream ended with an error"),
        Err(e) => tracing::error!(error = %e, "Stream task failed"),
    }

    println!("{}", format_session_summary(&session));
    Ok(())
}
