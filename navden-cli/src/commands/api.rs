//! One-shot backend commands: `health`, `info`, `run`, `state`, `trajectory`,
//! `metrics`, `jamming`, `step`, `reset`.
//!
//! Handlers are generic over [`BackendClient`] and return the text to print,
//! so they run unchanged against a mock client in tests.

use std::fmt::Write;

use serde::Serialize;

use navden::charts::summarize;
use navden::client::BackendClient;
use navden::model::SimulationRequest;

use super::common::{
    format_analysis, format_health, format_info, format_metrics, format_position, format_state,
    format_summary, format_trajectory_table,
};
use crate::error::CliError;

/// A one-shot backend request.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCommand {
    Health,
    Info,
    Run { duration: f64, dt: f64 },
    State,
    Trajectory { limit: usize },
    Metrics,
    Jamming,
    Step { count: u32 },
    Reset,
}

impl ApiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ApiCommand::Health => "health",
            ApiCommand::Info => "info",
            ApiCommand::Run { .. } => "run",
            ApiCommand::State => "state",
            ApiCommand::Trajectory { .. } => "trajectory",
            ApiCommand::Metrics => "metrics",
            ApiCommand::Jamming => "jamming",
            ApiCommand::Step { .. } => "step",
            ApiCommand::Reset => "reset",
        }
    }
}

/// Output rendering for one-shot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Execute a command and return its printable output.
pub async fn execute<C: BackendClient>(
    client: &C,
    command: ApiCommand,
    format: OutputFormat,
) -> Result<String, CliError> {
    match command {
        ApiCommand::Health => {
            let health = client.health().await?;
            render(format, &health, |h| format_health(h))
        }
        ApiCommand::Info => {
            let info = client.info().await?;
            render(format, &info, |i| format_info(i))
        }
        ApiCommand::Run { duration, dt } => {
            let results = client
                .run_simulation(SimulationRequest::new(duration, dt))
                .await?;
            render(format, &results, |r| {
                let mut out = format!(
                    "Simulation {} ({} samples)\n\n",
                    if r.is_complete() {
                        "completed"
                    } else {
                        "stopped before the mission finished"
                    },
                    r.trajectory_data.len()
                );
                let _ = writeln!(out, "Metrics\n-------\n{}\n", format_metrics(&r.metrics));
                let _ = writeln!(
                    out,
                    "Jamming analysis\n----------------\n{}",
                    format_analysis(&r.jamming_analysis)
                );
                if let Some(summary) = summarize(&r.trajectory_data) {
                    let _ = write!(out, "\nTrajectory: {}", format_summary(&summary));
                }
                out
            })
        }
        ApiCommand::State => {
            let current = client.current_state().await?;
            render(format, &current, |c| format_state(c.time, &c.state))
        }
        ApiCommand::Trajectory { limit } => {
            let page = client.trajectory(limit).await?;
            render(format, &page, |p| {
                format!(
                    "{}\n\nShowing {} of {} points",
                    format_trajectory_table(&p.trajectory),
                    p.returned_points,
                    p.total_points
                )
            })
        }
        ApiCommand::Metrics => {
            let metrics = client.metrics().await?;
            render(format, &metrics, |m| format_metrics(m))
        }
        ApiCommand::Jamming => {
            let analysis = client.jamming_analysis().await?;
            render(format, &analysis, |a| format_analysis(a))
        }
        ApiCommand::Step { count } => {
            let mut steps = Vec::with_capacity(count as usize);
            for _ in 0..count {
                steps.push(client.step_simulation().await?);
            }
            render(format, &steps, |steps| {
                steps
                    .iter()
                    .map(|s| {
                        format!(
                            "t={:.2}s est={} err={:.2} progress={:.1}%{}",
                            s.time,
                            format_position(s.state.estimated_position),
                            s.state.error,
                            s.metrics.mission_progress,
                            if s.metrics.gps_jammed { " [JAMMED]" } else { "" }
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        ApiCommand::Reset => {
            let reset = client.reset().await?;
            render(format, &reset, |r| r.message.clone())
        }
    }
}

fn render<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(text(value)),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| CliError::Config(format!("Failed to encode output: {}", e))),
    }
}
