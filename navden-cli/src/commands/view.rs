//! `view` command, and `run --dashboard`: the dashboard fed by REST polling.
//!
//! The poller reads `/current-state`, `/trajectory`, `/metrics` and
//! `/jamming-analysis` on a fixed interval. With `run --dashboard` it first
//! starts a full run and shows its results.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use navden::client::{BackendPoller, PollerConfig};
use navden::model::SimulationRequest;
use navden::planner::MissionPlan;

use super::common::format_session_summary;
use crate::error::CliError;
use crate::runner::CliRunner;
use crate::tui_app::{install_shutdown_handler, run_headless, run_tui, Feed, TuiAppConfig};
use crate::ui::DashboardConfig;

const POLL_BUFFER: usize = 16;

/// Build the poller configuration.
///
/// A started run is fetched whole on every poll, so the trajectory limit is
/// raised to cover every step of it.
pub fn poller_config(
    interval_secs: f64,
    trajectory_limit: usize,
    initial_run: Option<SimulationRequest>,
) -> Result<PollerConfig, CliError> {
    let interval = Duration::try_from_secs_f64(interval_secs)
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or_else(|| {
            CliError::InvalidArgument(format!(
                "--interval must be a positive number of seconds (got {})",
                interval_secs
            ))
        })?;
    match initial_run {
        None => Ok(PollerConfig::new(interval, trajectory_limit)),
        Some(request) => {
            request
                .validate()
                .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
            let steps = ((request.duration / request.dt).ceil() as usize).saturating_add(1);
            Ok(PollerConfig::new(interval, trajectory_limit.max(steps)).with_initial_run(request))
        }
    }
}

pub fn run(runner: &CliRunner, config: PollerConfig) -> Result<(), CliError> {
    runner.log_startup(if config.initial_run.is_some() {
        "run --dashboard"
    } else {
        "view"
    });

    let shutdown = Arc::new(AtomicBool::new(false));
    let cancel = CancellationToken::new();
    install_shutdown_handler(Arc::clone(&shutdown), cancel.clone())?;

    let client = runner.create_client()?;
    let dashboard = DashboardConfig::new(format!("{} (REST)", client.config().base_url))
        .with_waypoints(MissionPlan::backend_default().targets())
        .with_jamming(runner.config().jamming.window());

    let (events_tx, events_rx) = mpsc::channel(POLL_BUFFER);
    let poller = BackendPoller::new(client, config, events_tx, cancel.clone());
    let handle = runner.handle().spawn(poller.run());

    let app = TuiAppConfig {
        dashboard,
        feed: Feed::Backend(events_rx),
        shutdown,
        cancel,
    };
    let session = if atty::is(atty::Stream::Stdout) {
        run_tui(app)?
    } else {
        run_headless(app)?
    };

    if let Err(e) = runner.block_on(handle) {
        tracing::error!(error = %e, "Poller task failed");
    }

    println!("{}", format_session_summary(&session));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poller_config_for_view() {
        let config = poller_config(2.0, 100, None).unwrap();
        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.trajectory_limit, 100);
        assert!(config.initial_run.is_none());
    }

    #[test]
    fn test_poller_config_covers_whole_run() {
        let request = SimulationRequest {
            duration: 90.0,
            dt: 0.1,
        };
        let config = poller_config(1.0, 100, Some(request)).unwrap();
        assert_eq!(config.initial_run, Some(request));
        assert!(config.trajectory_limit >= 901);
    }

    #[test]
    fn test_poller_config_rejects_bad_input() {
        assert!(matches!(
            poller_config(0.0, 100, None),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            poller_config(f64::NAN, 100, None),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            poller_config(-1.0, 100, None),
            Err(CliError::InvalidArgument(_))
        ));

        let request = SimulationRequest {
            duration: -5.0,
            dt: 0.1,
        };
        assert!(matches!(
            poller_config(1.0, 100, Some(request)),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
