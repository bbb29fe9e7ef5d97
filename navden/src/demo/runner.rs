//! Demo runner - timer-driven daemon around a [`DemoEngine`].
//!
//! Same daemon shape as the stream adapter: `new()` + `start()` spawns the
//! task, `run()` ticks a `tokio::time::interval` and sends each frame over an
//! mpsc channel. Missed timer ticks are skipped rather than bunched, so two
//! engine steps never run back to back to catch up.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::engine::{DemoEngine, DemoFrame};
use super::noise::NoiseSource;

const MIN_TICK: Duration = Duration::from_millis(1);

/// Drives a demo engine at wall-clock pace.
pub struct DemoRunner<N: NoiseSource> {
    engine: DemoEngine<N>,
    frames_tx: mpsc::Sender<DemoFrame>,
    cancel: CancellationToken,
}

impl<N: NoiseSource + 'static> DemoRunner<N> {
    pub fn new(
        engine: DemoEngine<N>,
        frames_tx: mpsc::Sender<DemoFrame>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            engine,
            frames_tx,
            cancel,
        }
    }

    /// Start the runner as an async task.
    ///
    /// The task resolves to the number of frames sent.
    pub fn start(self) -> tokio::task::JoinHandle<u64> {
        tokio::spawn(async move { self.run().await })
    }

    /// Tick until the engine finishes, the receiver is dropped, or the
    /// token is cancelled.
    pub async fn run(mut self) -> u64 {
        // A zero period would panic inside `interval`.
        let period = self.engine.config().tick.max(MIN_TICK);
        tracing::info!(
            tick_ms = period.as_millis() as u64,
            waypoints = self.engine.waypoints().len(),
            "Demo runner started"
        );

        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut sent: u64 = 0;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Demo runner cancelled");
                    break;
                }
                _ = interval.tick() => {}
            }

            let Some(frame) = self.engine.tick() else {
                break;
            };
            let finished = frame.finished;

            if self.frames_tx.send(frame).await.is_err() {
                tracing::debug!("Demo frame channel closed, stopping");
                break;
            }
            sent += 1;

            if finished {
                break;
            }
        }

        tracing::info!(
            frames = sent,
            sim_time = self.engine.time(),
            finished = self.engine.is_finished(),
            "Demo runner stopped"
        );
        sent
    }
}
