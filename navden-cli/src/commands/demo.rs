//! `demo` command: the local guidance and blended-correction loop.
//!
//! Flies the saved mission plan (see `navden plan`) with the `[demo]`,
//! `[filter]` and `[jamming]` settings, no backend needed.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Args;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use navden::config::ConfigFile;
use navden::demo::{DemoConfig, DemoEngine, DemoRunner};
use navden::planner::store::{load_plan, plan_file_path};

use super::common::format_session_summary;
use crate::error::CliError;
use crate::runner::CliRunner;
use crate::tui_app::{install_shutdown_handler, run_headless, run_tui, Feed, TuiAppConfig};
use crate::ui::DashboardConfig;

/// Channel capacity between the runner and the dashboard.
const FRAME_BUFFER: usize = 256;

#[derive(Debug, Clone, Default, Args)]
pub struct DemoArgs {
    /// Seed for the noise generator (overrides demo.seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print a text log instead of opening the dashboard
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many simulated seconds
    #[arg(long)]
    pub duration: Option<f64>,
}

/// Demo parameters from the config file with command-line overrides.
fn demo_config(config: &ConfigFile, args: &DemoArgs) -> Result<DemoConfig, CliError> {
    let mut demo = DemoConfig::from_config(config);
    if let Some(seed) = args.seed {
        demo = demo.with_seed(seed);
    }
    if let Some(duration) = args.duration {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(CliError::Config(format!(
                "--duration must be a positive number of seconds, got {}",
                duration
            )));
        }
        demo = demo.with_max_duration(duration);
    }
    Ok(demo)
}

pub fn run(runner: &CliRunner, args: DemoArgs) -> Result<(), CliError> {
    runner.log_startup("demo");

    let plan = load_plan(&plan_file_path())?;
    if plan.is_empty() {
        return Err(CliError::Config(
            "No waypoints planned. Add some with 'navden plan add X Y' \
             or restore the default route with 'navden plan default'."
                .to_string(),
        ));
    }

    let config = demo_config(runner.config(), &args)?;
    let waypoints = plan.targets();
    tracing::info!(
        waypoints = waypoints.len(),
        seed = ?config.seed,
        dt = config.dt,
        "Starting guidance demo"
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    let cancel = CancellationToken::new();
    install_shutdown_handler(Arc::clone(&shutdown), cancel.clone())?;

    let dashboard = DashboardConfig::new("local demo")
        .with_waypoints(waypoints.clone())
        .with_jamming(config.jamming);

    let (frames_tx, frames_rx) = mpsc::channel(FRAME_BUFFER);
    let engine = DemoEngine::new(config, waypoints);
    let handle = runner
        .handle()
        .spawn(DemoRunner::new(engine, frames_tx, cancel.clone()).run());

    let app = TuiAppConfig {
        dashboard,
        feed: Feed::Demo(frames_rx),
        shutdown,
        cancel,
    };
    let session = if args.headless || !atty::is(atty::Stream::Stdout) {
        run_headless(app)?
    } else {
        run_tui(app)?
    };

    match runner.block_on(handle) {
        Ok(frames) => tracing::info!(frames, "Demo finished"),
        Err(e) => tracing::error!(error = %e, "Demo task failed"),
    }

    println!("{}", format_session_summary(&session));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let args = DemoArgs {
            seed: Some(7),
            duration: Some(30.0),
            ..Default::default()
        };
        let demo = demo_config(&ConfigFile::default(), &args).unwrap();
        assert_eq!(demo.seed, Some(7));
        assert_eq!(demo.max_duration, 30.0);
    }

    #[test]
    fn test_defaults_come_from_config() {
        let mut config = ConfigFile::default();
        config.demo.seed = Some(3);
        config.jamming.enabled = false;
        let demo = demo_config(&config, &DemoArgs::default()).unwrap();
        assert_eq!(demo.seed, Some(3));
        assert!(demo.jamming.is_none());
    }

    #[test]
    fn test_rejects_bad_duration() {
        let args = DemoArgs {
            duration: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            demo_config(&ConfigFile::default(), &args),
            Err(CliError::Config(_))
        ));
    }
}
