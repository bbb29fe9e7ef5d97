//! Backend poller: feeds the dashboard from REST snapshots.
//!
//! Same daemon shape as the stream adapter and the demo runner:
//! `new()` + `start()` spawns the task, `run()` ticks an interval and sends
//! [`PollEvent`]s over an mpsc channel until the receiver is dropped or the
//! token is cancelled.
//!
//! When configured with a [`SimulationRequest`], the poller first starts a
//! full run and forwards its results before polling.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::api::BackendClient;
use super::error::ClientError;
use crate::model::{
    CurrentState, JammingAnalysis, MissionMetrics, SimulationRequest, SimulationResults,
    TrajectoryPoint,
};

/// Default time between snapshots.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One round of REST reads.
///
/// Fields the backend cannot serve yet (no simulator) are `None` or empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackendSnapshot {
    pub state: Option<CurrentState>,
    pub trajectory: Vec<TrajectoryPoint>,
    pub metrics: Option<MissionMetrics>,
    pub analysis: Option<JammingAnalysis>,
}

impl BackendSnapshot {
    /// True when no simulation has run on the backend yet.
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.trajectory.is_empty() && self.metrics.is_none()
    }
}

/// Events emitted by the poller.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// Results of the run the poller started.
    Results(Box<SimulationResults>),
    Snapshot(Box<BackendSnapshot>),
    /// A request failed. Polling continues.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollerConfig {
    pub interval: Duration,
    pub trajectory_limit: usize,
    /// Run to start before the first snapshot.
    pub initial_run: Option<SimulationRequest>,
}

impl PollerConfig {
    pub fn new(interval: Duration, trajectory_limit: usize) -> Self {
        Self {
            interval: interval.max(MIN_POLL_INTERVAL),
            trajectory_limit,
            initial_run: None,
        }
    }

    pub fn with_initial_run(mut self, request: SimulationRequest) -> Self {
        self.initial_run = Some(request);
        self
    }
}

/// REST polling daemon.
pub struct BackendPoller<C: BackendClient> {
    client: C,
    config: PollerConfig,
    events_tx: mpsc::Sender<PollEvent>,
    cancel: CancellationToken,
}

impl<C: BackendClient + 'static> BackendPoller<C> {
    pub fn new(
        client: C,
        config: PollerConfig,
        events_tx: mpsc::Sender<PollEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            config,
            events_tx,
            cancel,
        }
    }

    /// Start the poller as an async task.
    ///
    /// The task resolves to the number of snapshots sent.
    pub fn start(self) -> tokio::task::JoinHandle<u64> {
        tokio::spawn(async move { self.run().await })
    }

    pub async fn run(self) -> u64 {
        tracing::info!(
            interval_ms = self.config.interval.as_millis() as u64,
            initial_run = self.config.initial_run.is_some(),
            "Backend poller started"
        );

        if let Some(request) = self.config.initial_run {
            let result = tokio::select! {
                _ = self.cancel.cancelled() => return 0,
                result = self.client.run_simulation(request) => result,
            };
            let event = match result {
                Ok(results) => {
                    tracing::info!(
                        samples = results.trajectory_data.len(),
                        status = %results.status,
                        "Simulation run finished"
                    );
                    PollEvent::Results(Box::new(results))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Simulation run failed");
                    PollEvent::Failed(e.to_string())
                }
            };
            if self.events_tx.send(event).await.is_err() {
                return 0;
            }
        }

        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut sent: u64 = 0;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Backend poller cancelled");
                    break;
                }
                _ = interval.tick() => {}
            }

            let event = match fetch_snapshot(&self.client, self.config.trajectory_limit).await {
                Ok(snapshot) => PollEvent::Snapshot(Box::new(snapshot)),
                Err(e) => {
                    tracing::warn!(error = %e, "Backend poll failed");
                    PollEvent::Failed(e.to_string())
                }
            };
            if self.events_tx.send(event).await.is_err() {
                tracing::debug!("Poll channel closed, stopping");
                break;
            }
            sent += 1;
        }

        tracing::info!(snapshots = sent, "Backend poller stopped");
        sent
    }
}

/// Read state, trajectory, metrics and jamming analysis in one round.
///
/// A backend without a simulator yields an empty snapshot rather than an
/// error. Any other failure aborts the round.
pub async fn fetch_snapshot<C: BackendClient>(
    client: &C,
    trajectory_limit: usize,
) -> Result<BackendSnapshot, ClientError> {
    let state = not_ready_as_none(client.current_state().await)?;
    if state.is_none() {
        return Ok(BackendSnapshot::default());
    }

    let trajectory = not_ready_as_none(client.trajectory(trajectory_limit).await)?
        .map(|page| page.trajectory)
        .unwrap_or_default();
    let metrics = not_ready_as_none(client.metrics().await)?;
    let analysis = not_ready_as_none(client.jamming_analysis().await)?;

    Ok(BackendSnapshot {
        state,
        trajectory,
        metrics,
        analysis,
    })
}

fn not_ready_as_none<T>(result: Result<T, ClientError>) -> Result<Option<T>, ClientError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ClientError::NotInitialized(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
