//! Terminal dashboard for live navigation telemetry.
//!
//! # Module Structure
//!
//! - `state` - events, configuration and the status line (no rendering)
//! - `render` - layout orchestration, header and quit overlay
//! - `render_sections` - panel chrome and placeholders

mod render;
mod render_sections;
pub mod state;

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use navden::session::DashboardSession;

use crate::ui::widgets::TelemetryHistory;
use render::RenderContext;

pub use state::{DashboardConfig, DashboardEvent};
use state::{QUIT_CONFIRM_TIMEOUT, SPINNER_FRAMES};

/// Samples kept for the telemetry sparklines.
const HISTORY_SAMPLES: usize = 120;

/// The main dashboard UI.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    config: DashboardConfig,
    history: TelemetryHistory,
    shutdown: Arc<AtomicBool>,
    start_time: Instant,
    /// Spinner frame index, advanced while the feed is running.
    spinner_frame: usize,
    /// Some(timestamp) while awaiting quit confirmation.
    quit_confirmation: Option<Instant>,
}

impl Dashboard {
    /// Enter raw mode and the alternate screen.
    pub fn new(config: DashboardConfig, shutdown: Arc<AtomicBool>) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            config,
            history: TelemetryHistory::new(HISTORY_SAMPLES),
            shutdown,
            start_time: Instant::now(),
            spinner_frame: 0,
            quit_confirmation: None,
        })
    }

    /// Restore terminal to normal state.
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Draw one frame of the session.
    pub fn draw(&mut self, session: &DashboardSession) -> io::Result<()> {
        self.history.update(session);

        let spinner = if session.is_running() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
            Some(SPINNER_FRAMES[self.spinner_frame])
        } else {
            None
        };

        let ctx = RenderContext {
            config: &self.config,
            history: &self.history,
            uptime: self.start_time.elapsed(),
            spinner,
            confirmation_remaining: self.confirmation_remaining(),
        };

        self.terminal.draw(|frame| {
            render::render_ui(frame, session, &ctx);
        })?;
        Ok(())
    }

    /// Check for events (non-blocking).
    ///
    /// Quit needs confirmation:
    /// - First 'q' or Esc: enters confirmation mode (5 second timeout)
    /// - Second 'q' or 'y'/'Y': confirms quit
    /// - 'n'/'N' or Esc: cancels confirmation
    ///
    /// 'c' stops the feed but keeps the dashboard open.
    pub fn poll_event(&mut self) -> io::Result<Option<DashboardEvent>> {
        if self.shutdown.load(Ordering::SeqCst) {
            tracing::info!("Shutdown flag set, leaving dashboard");
            return Ok(Some(DashboardEvent::Quit));
        }

        if let Some(confirm_time) = self.quit_confirmation {
            if confirm_time.elapsed() > QUIT_CONFIRM_TIMEOUT {
                self.quit_confirmation = None;
            }
        }

        if !event::poll(Duration::from_millis(10))? {
            return Ok(None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }

        if self.quit_confirmation.is_some() {
            match key.code {
                KeyCode::Char('q' | 'Q' | 'y' | 'Y') => return Ok(Some(DashboardEvent::Quit)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => self.quit_confirmation = None,
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                    self.quit_confirmation = Some(Instant::now());
                }
                KeyCode::Char('c' | 'C') => return Ok(Some(DashboardEvent::Cancel)),
                _ => {}
            }
        }

        Ok(None)
    }

    fn confirmation_remaining(&self) -> Option<Duration> {
        self.quit_confirmation
            .map(|t| QUIT_CONFIRM_TIMEOUT.saturating_sub(t.elapsed()))
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
