//! TUI application loop for live feeds.
//!
//! # Architecture
//!
//! - `run_tui()` - interactive dashboard with its event loop
//! - `run_headless()` - plain text log for non-TTY environments
//! - `Feed` - the channel a background task fills (stream, demo or REST poller)
//!
//! Both loops run on the main thread and are the only owner of the
//! [`DashboardSession`]; background tasks only ever send into the feed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio_util::sync::CancellationToken;

use navden::client::PollEvent;
use navden::demo::DemoFrame;
use navden::session::{DashboardSession, SessionSource};
use navden::stream::StreamEvent;

use crate::commands::common::{format_demo_frame, format_poll_event, format_stream_event};
use crate::error::CliError;
use crate::ui::{Dashboard, DashboardConfig, DashboardEvent};

/// Dashboard redraw interval.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Headless demo logging prints every Nth frame, plus GPS transitions.
const HEADLESS_FRAME_STRIDE: u64 = 20;

/// Where session updates come from.
pub enum Feed {
    Stream(mpsc::Receiver<StreamEvent>),
    Demo(mpsc::Receiver<DemoFrame>),
    Backend(mpsc::Receiver<PollEvent>),
}

impl Feed {
    fn source(&self) -> SessionSource {
        match self {
            Feed::Stream(_) => SessionSource::Stream,
            Feed::Demo(_) => SessionSource::Demo,
            Feed::Backend(_) => SessionSource::Backend,
        }
    }

    /// Fold every queued item into the session without blocking.
    ///
    /// Returns false once the sender side is gone and the queue is empty.
    fn drain_into(&mut self, session: &mut DashboardSession) -> bool {
        loop {
            let result = match self {
                Feed::Stream(rx) => rx.try_recv().map(|event| session.apply_event(event)),
                Feed::Demo(rx) => rx.try_recv().map(|frame| session.apply_demo_frame(&frame)),
                Feed::Backend(rx) => rx.try_recv().map(|event| session.apply_poll_event(event)),
            };
            match result {
                Ok(()) => continue,
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }
}

/// Configuration for a TUI or headless session.
pub struct TuiAppConfig {
    pub dashboard: DashboardConfig,
    pub feed: Feed,
    /// Set by the Ctrl+C handler.
    pub shutdown: Arc<AtomicBool>,
    /// Stops the task feeding the channel.
    pub cancel: CancellationToken,
}

/// Install a Ctrl+C handler that raises `shutdown` and cancels `cancel`.
pub fn install_shutdown_handler(
    shutdown: Arc<AtomicBool>,
    cancel: CancellationToken,
) -> Result<(), CliError> {
    ctrlc::set_handler(move || {
        shutdown.store(true, Ordering::SeqCst);
        cancel.cancel();
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))
}

/// Run the interactive dashboard until the user quits.
///
/// The dashboard stays open after the feed ends so the final state can be
/// inspected. Returns the session for the closing summary.
pub fn run_tui(config: TuiAppConfig) -> Result<DashboardSession, CliError> {
    let TuiAppConfig {
        dashboard: dashboard_config,
        mut feed,
        shutdown,
        cancel,
    } = config;

    let mut session = DashboardSession::new(feed.source());
    let mut dashboard =
        Dashboard::new(dashboard_config, shutdown).map_err(CliError::Dashboard)?;
    let mut feed_open = true;
    let mut last_draw: Option<Instant> = None;

    loop {
        match dashboard.poll_event().map_err(CliError::Dashboard)? {
            Some(DashboardEvent::Quit) => {
                tracing::info!("Dashboard quit requested");
                break;
            }
            Some(DashboardEvent::Cancel) if !cancel.is_cancelled() => {
                tracing::info!("Feed stopped from dashboard");
                cancel.cancel();
                session.record_error("Stopped by user");
            }
            _ => {}
        }

        if feed_open && !feed.drain_into(&mut session) {
            tracing::debug!(samples = session.trajectory().len(), "Feed ended");
            feed_open = false;
        }

        if last_draw.map_or(true, |t| t.elapsed() >= TICK_RATE) {
            dashboard.draw(&session).map_err(CliError::Dashboard)?;
            last_draw = Some(Instant::now());
        }

        std::thread::sleep(Duration::from_millis(10));
    }

    cancel.cancel();
    Ok(session)
}

/// Print the feed as text until it ends or Ctrl+C is pressed.
pub fn run_headless(config: TuiAppConfig) -> Result<DashboardSession, CliError> {
    let TuiAppConfig {
        feed,
        shutdown,
        cancel,
        ..
    } = config;

    println!("Press Ctrl+C to stop.");
    println!();

    let mut session = DashboardSession::new(feed.source());
    match feed {
        Feed::Stream(mut rx) => {
            while let Some(event) = rx.blocking_recv() {
                println!("{}", format_stream_event(&event));
                session.apply_event(event);
                if shutdown.load(Ordering::SeqCst) {
                    break;
                }
            }
        }
        Feed::Demo(mut rx) => {
            let mut was_jammed = false;
            while let Some(frame) = rx.blocking_recv() {
                let transition = frame.is_jammed() != was_jammed;
                was_jammed = frame.is_jammed();
                if transition
                    || frame.finished
                    || frame.step == 1
                    || frame.step % HEADLESS_FRAME_STRIDE == 0
                {
                    println!("{}", format_demo_frame(&frame));
                }
                session.apply_demo_frame(&frame);
                if shutdown.load(Ordering::SeqCst) {
                    break;
                }
            }
        }
        Feed::Backend(mut rx) => {
            while let Some(event) = rx.blocking_recv() {
                println!("{}", format_poll_event(&event));
                session.apply_poll_event(event);
                if shutdown.load(Ordering::SeqCst) {
                    break;
                }
            }
        }
    }

    cancel.cancel();
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use navden::demo::{DemoConfig, DemoEngine, ZeroNoise};
    use navden::model::Vec2;

    #[test]
    fn test_drain_demo_feed() {
        let (tx, rx) = mpsc::channel(16);
        let mut engine = DemoEngine::with_noise(
            DemoConfig::default(),
            vec![DemoConfig::default().start + Vec2::new(50.0, 0.0)],
            ZeroNoise,
        );
        for frame in engine.run_to_completion(3) {
            tx.try_send(frame).unwrap();
        }

        let mut feed = Feed::Demo(rx);
        let mut session = DashboardSession::new(feed.source());
        assert!(feed.drain_into(&mut session));
        assert_eq!(session.trajectory().len(), 3);

        drop(tx);
        assert!(!feed.drain_into(&mut session));
    }

    #[test]
    fn test_drain_stream_feed() {
        let (tx, rx) = mpsc::channel(4);
        tx.try_send(StreamEvent::Connected {
            url: "ws://localhost:8000/ws".to_string(),
        })
        .unwrap();
        tx.try_send(StreamEvent::Closed(Some("done".to_string())))
            .unwrap();
        drop(tx);

        let mut feed = Feed::Stream(rx);
        let mut session = DashboardSession::new(feed.source());
        assert!(!feed.drain_into(&mut session));
        assert_eq!(session.source(), SessionSource::Stream);
        assert_eq!(session.last_error(), Some("done"));
    }

    #[test]
    fn test_drain_backend_feed() {
        let (tx, rx) = mpsc::channel(4);
        tx.try_send(PollEvent::Failed("connection refused".to_string()))
            .unwrap();
        tx.try_send(PollEvent::Snapshot(Box::default())).unwrap();

        let mut feed = Feed::Backend(rx);
        let mut session = DashboardSession::new(feed.source());
        assert!(feed.drain_into(&mut session));
        assert_eq!(session.source(), SessionSource::Backend);
        assert!(session.last_error().is_none());

        drop(tx);
        assert!(!feed.drain_into(&mut session));
    }

    #[test]
    fn test_headless_demo_consumes_feed() {
        let (tx, rx) = mpsc::channel(64);
        let mut engine = DemoEngine::with_noise(
            DemoConfig::default(),
            vec![DemoConfig::default().start + Vec2::new(20.0, 0.0)],
            ZeroNoise,
        );
        let frames = engine.run_to_completion(2000);
        let count = frames.len();
        std::thread::spawn(move || {
            for frame in frames {
                if tx.blocking_send(frame).is_err() {
                    break;
                }
            }
        });

        let session = run_headless(TuiAppConfig {
            dashboard: DashboardConfig::new("test"),
            feed: Feed::Demo(rx),
            shutdown: Arc::new(AtomicBool::new(false)),
            cancel: CancellationToken::new(),
        })
        .unwrap();
        assert_eq!(session.trajectory().len(), count);
        assert!(!session.is_running());
    }
}
