//! Text formatting shared across CLI commands.
//!
//! Every formatter returns a `String` so handlers can be tested without
//! capturing stdout.

use std::fmt::Write;

use navden::charts::TrajectorySummary;
use navden::client::PollEvent;
use navden::demo::DemoFrame;
use navden::model::{
    BackendInfo, HealthStatus, JammingAnalysis, MissionMetrics, NavigationState, TrajectoryPoint,
    Vec2,
};
use navden::planner::MissionPlan;
use navden::session::DashboardSession;
use navden::stream::{StreamEvent, StreamMessage};

pub fn format_position(v: Vec2) -> String {
    format!("({:.2}, {:.2})", v.x, v.y)
}

pub fn format_health(health: &HealthStatus) -> String {
    let marker = if health.is_healthy() { "✓" } else { "✗" };
    format!(
        "{} {} v{}: {}",
        marker, health.service, health.version, health.status
    )
}

pub fn format_info(info: &BackendInfo) -> String {
    let mut out = format!("{} v{}\n", info.service, info.version);
    for (title, items) in [
        ("Capabilities", &info.capabilities),
        ("Algorithms", &info.algorithms),
        ("Sensors", &info.sensors_simulated),
    ] {
        let _ = writeln!(out, "\n{}:", title);
        if items.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for item in items {
            let _ = writeln!(out, "  - {}", item);
        }
    }
    out
}

pub fn format_state(time: f64, state: &NavigationState) -> String {
    let gps = if state.gps_available {
        "ACTIVE"
    } else {
        "JAMMED"
    };
    let mut out = String::new();
    let _ = writeln!(out, "Time:        {:.2} s", time);
    let _ = writeln!(out, "True:        {}", format_position(state.true_position));
    let _ = writeln!(
        out,
        "Estimated:   {}",
        format_position(state.estimated_position)
    );
    let _ = writeln!(out, "Error:       {:.2} m", state.error);
    let _ = writeln!(out, "Confidence:  {:.1}%", state.confidence);
    let _ = writeln!(
        out,
        "Speed:       {:.2} m/s  heading {:.1}°",
        state.speed(),
        state.heading.to_degrees()
    );
    let _ = writeln!(out, "GPS:         {}", gps);
    let _ = writeln!(out, "Mode:        {}", state.navigation_mode);
    let _ = writeln!(
        out,
        "Waypoint:    {}",
        format_position(state.current_waypoint)
    );
    let _ = write!(out, "Progress:    {:.1}%", state.mission_progress);
    out
}

pub fn format_metrics(metrics: &MissionMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Waypoints:       {}/{}",
        metrics.waypoints_reached, metrics.total_waypoints
    );
    let _ = writeln!(out, "Progress:        {:.1}%", metrics.mission_progress);
    let _ = writeln!(out, "Success rate:    {:.1}%", metrics.mission_success_rate);
    let _ = writeln!(out, "Max error:       {:.2} m", metrics.max_position_error);
    let _ = writeln!(out, "Confidence:      {:.1}%", metrics.final_confidence);
    let _ = writeln!(out, "Distance:        {:.1} m", metrics.total_distance);
    let _ = writeln!(out, "Time:            {:.2} s", metrics.current_time);
    let _ = write!(
        out,
        "Navigation:      {}{}",
        metrics.navigation_mode,
        if metrics.gps_jammed {
            " (GPS jammed)"
        } else {
            ""
        }
    );
    out
}

pub fn format_analysis(analysis: &JammingAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Jamming window:  {:.1}s - {:.1}s ({:.1}s)",
        analysis.jam_start_time, analysis.jam_end_time, analysis.jam_duration
    );
    let _ = writeln!(out, "Error before:    {:.2} m", analysis.error_before_jam);
    let _ = writeln!(
        out,
        "Peak during:     {:.2} m",
        analysis.peak_error_during_jam
    );
    let _ = writeln!(
        out,
        "Error after:     {:.2} m",
        analysis.error_after_recovery
    );
    let _ = writeln!(out, "Recovery time:   {:.1} s", analysis.recovery_time);
    let _ = write!(
        out,
        "Increase factor: {:.2}x",
        analysis.error_increase_factor
    );
    out
}

pub fn format_summary(summary: &TrajectorySummary) -> String {
    format!(
        "{} samples over {:.1}s, mean error {:.2} m (max {:.2}), \
         confidence {:.1}% at end (min {:.1}%), {} jammed",
        summary.samples,
        summary.duration,
        summary.mean_error,
        summary.max_error,
        summary.final_confidence,
        summary.min_confidence,
        summary.jammed_samples
    )
}

/// Fixed-width trajectory table.
pub fn format_trajectory_table(points: &[TrajectoryPoint]) -> String {
    if points.is_empty() {
        return "No data available".to_string();
    }

    let mut out = format!(
        "{:>8}  {:>18}  {:>18}  {:>7}  {:>6}  {:<6}  {:<6}\n",
        "TIME", "TRUE", "ESTIMATED", "ERROR", "CONF", "GPS", "MODE"
    );
    for p in points {
        let _ = writeln!(
            out,
            "{:>8.2}  {:>18}  {:>18}  {:>7.2}  {:>6.1}  {:<6}  {:<6}",
            p.time,
            format_position(p.true_position()),
            format_position(p.estimated_position()),
            p.error,
            p.confidence,
            p.gps_status,
            p.nav_mode
        );
    }
    out.pop();
    out
}

pub fn format_plan(plan: &MissionPlan, start: Vec2) -> String {
    if plan.is_empty() {
        return "No waypoints planned".to_string();
    }

    let mut out = format!("{:>4}  {:>4}  {:>8}  {:>8}\n", "#", "ID", "X", "Y");
    for (index, waypoint) in plan.waypoints().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:>4}  {:>8.1}  {:>8.1}",
            index + 1,
            waypoint.id,
            waypoint.x,
            waypoint.y
        );
    }
    let _ = write!(
        out,
        "\n{} waypoints, route length {:.1} m from {}",
        plan.len(),
        plan.total_length(start),
        format_position(start)
    );
    out
}

/// One log line per demo tick (headless mode).
pub fn format_demo_frame(frame: &DemoFrame) -> String {
    format!(
        "t={:>6.2}s true={} est={} drift={:.2} conf={:.0}% gps={} wp={}/{}{}",
        frame.time,
        format_position(frame.true_position),
        format_position(frame.estimated_position),
        frame.drift,
        frame.confidence,
        if frame.is_jammed() { "JAMMED" } else { "ACTIVE" },
        frame.waypoints_reached,
        frame.total_waypoints,
        if frame.finished { " [finished]" } else { "" }
    )
}

/// One log line per stream event (headless mode).
pub fn format_stream_event(event: &StreamEvent) -> String {
    match event {
        StreamEvent::Connected { url } => format!("Connected to {}", url),
        StreamEvent::Message(StreamMessage::Start(start)) => format!(
            "{}: {} steps over {:.1}s",
            start.message, start.total_steps, start.total_duration
        ),
        StreamEvent::Message(StreamMessage::Update(update)) => format!(
            "t={:>6.2}s [{:>5.1}%] true={} est={} err={:.2} conf={:.1}% gps={}",
            update.time,
            update.progress,
            format_position(update.data.true_position),
            format_position(update.data.estimated_position),
            update.data.error,
            update.data.confidence,
            update.data.gps_status
        ),
        StreamEvent::Message(StreamMessage::Complete(complete)) => format!(
            "{}\n{}",
            complete.message,
            format_metrics(&complete.final_metrics)
        ),
        StreamEvent::Message(StreamMessage::Error(error)) => {
            format!("Backend error: {}", error.message)
        }
        StreamEvent::Malformed(reason) => format!("Skipped malformed frame: {}", reason),
        StreamEvent::Closed(Some(reason)) => format!("Stream closed: {}", reason),
        StreamEvent::Closed(None) => "Stream closed".to_string(),
    }
}

/// One log line per REST poll (headless mode).
pub fn format_poll_event(event: &PollEvent) -> String {
    match event {
        PollEvent::Results(results) => format!(
            "Simulation {}: {} samples\n{}",
            results.status,
            results.trajectory_data.len(),
            format_metrics(&results.metrics)
        ),
        PollEvent::Snapshot(snapshot) => match &snapshot.state {
            None => "Backend has no simulation yet".to_string(),
            Some(current) => format!(
                "t={:>6.2}s [{:>5.1}%] true={} est={} err={:.2} conf={:.1}% gps={} samples={}",
                current.time,
                current.state.mission_progress,
                format_position(current.state.true_position),
                format_position(current.state.estimated_position),
                current.state.error,
                current.state.confidence,
                if current.state.gps_available {
                    "ACTIVE"
                } else {
                    "JAMMED"
                },
                snapshot.trajectory.len()
            ),
        },
        PollEvent::Failed(reason) => format!("Poll failed: {}", reason),
    }
}

/// Closing summary printed after `watch`, `view` or `demo`.
pub fn format_session_summary(session: &DashboardSession) -> String {
    let mut out = String::from("Session summary\n---------------\n");
    match navden::charts::summarize(session.trajectory()) {
        Some(summary) => {
            let _ = writeln!(out, "{}", format_summary(&summary));
        }
        None => {
            let _ = writeln!(out, "No data available");
        }
    }
    if let Some(metrics) = session.metrics() {
        let _ = writeln!(out, "\n{}", format_metrics(metrics));
    }
    if let Some(analysis) = session.analysis() {
        let _ = writeln!(out, "\n{}", format_analysis(analysis));
    }
    if session.malformed_frames() > 0 {
        let _ = writeln!(
            out,
            "Skipped {} malformed frames",
            session.malformed_frames()
        );
    }
    if let Some(error) = session.last_error() {
        let _ = writeln!(out, "Last error: {}", error);
    }
    out.pop();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use navden::model::{GpsStatus, NavigationMode};

    fn point(time: f64) -> TrajectoryPoint {
        TrajectoryPoint {
            time,
            true_x: 1.0,
            true_y: 2.0,
            est_x: 1.5,
            est_y: 2.25,
            error: 0.56,
            confidence: 91.0,
            gps_status: GpsStatus::Jammed,
            nav_mode: NavigationMode::Sensor,
        }
    }

    #[test]
    fn test_format_position() {
        assert_eq!(format_position(Vec2::new(1.0, -2.345)), "(1.00, -2.35)");
    }

    #[test]
    fn test_trajectory_table() {
        let table = format_trajectory_table(&[point(0.1), point(0.2)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("ESTIMATED"));
        assert!(lines[1].contains("(1.50, 2.25)"));
        assert!(lines[1].contains("JAMMED"));
        assert!(lines[2].trim_start().starts_with("0.20"));
    }

    #[test]
    fn test_empty_table_placeholder() {
        assert_eq!(format_trajectory_table(&[]), "No data available");
    }

    #[test]
    fn test_format_metrics() {
        let metrics = MissionMetrics {
            waypoints_reached: 3,
            total_waypoints: 5,
            gps_jammed: true,
            navigation_mode: NavigationMode::Sensor,
            ..Default::default()
        };
        let text = format_metrics(&metrics);
        assert!(text.contains("Waypoints:       3/5"));
        assert!(text.ends_with("SENSOR (GPS jammed)"));
    }

    #[test]
    fn test_format_analysis() {
        let analysis = JammingAnalysis {
            jam_start_time: 3.0,
            jam_end_time: 6.0,
            jam_duration: 3.0,
            error_increase_factor: 2.5,
            ..Default::default()
        };
        let text = format_analysis(&analysis);
        assert!(text.starts_with("Jamming window:  3.0s - 6.0s (3.0s)"));
        assert!(text.ends_with("2.50x"));
    }

    #[test]
    fn test_format_plan() {
        let plan = MissionPlan::from_positions([Vec2::new(3.0, 4.0)]);
        let text = format_plan(&plan, Vec2::ZERO);
        assert!(text.contains("1 waypoints, route length 5.0 m"));
        assert_eq!(
            format_plan(&MissionPlan::new(), Vec2::ZERO),
            "No waypoints planned"
        );
    }

    #[test]
    fn test_format_stream_event() {
        assert_eq!(
            format_stream_event(&StreamEvent::Closed(None)),
            "Stream closed"
        );
        assert_eq!(
            format_stream_event(&StreamEvent::Malformed("oops".to_string())),
            "Skipped malformed frame: oops"
        );
    }

    #[test]
    fn test_format_poll_event() {
        use navden::client::BackendSnapshot;
        use navden::model::CurrentState;

        assert_eq!(
            format_poll_event(&PollEvent::Snapshot(Box::default())),
            "Backend has no simulation yet"
        );
        assert_eq!(
            format_poll_event(&PollEvent::Failed("timeout".to_string())),
            "Poll failed: timeout"
        );

        let state: NavigationState = serde_json::from_str(
            r#"{"true_position": [1.0, 2.0], "estimated_position": [1.5, 2.0],
                "error": 0.5, "confidence": 88.0, "gps_available": false,
                "mission_progress": 40.0}"#,
        )
        .unwrap();
        let line = format_poll_event(&PollEvent::Snapshot(Box::new(BackendSnapshot {
            state: Some(CurrentState { time: 4.2, state }),
            trajectory: vec![point(4.1), point(4.2)],
            ..Default::default()
        })));
        assert!(line.starts_with("t=  4.20s [ 40.0%]"));
        assert!(line.contains("gps=JAMMED"));
        assert!(line.ends_with("samples=2"));
    }

    #[test]
    fn test_session_summary() {
        use navden::session::SessionSource;

        let mut session = DashboardSession::new(SessionSource::Stream);
        assert!(format_session_summary(&session).ends_with("No data available"));

        session.replace_trajectory(vec![point(0.1), point(0.2)]);
        session.record_error("Stopped by user");
        let text = format_session_summary(&session);
        assert!(text.contains("2 samples"));
        assert!(text.ends_with("Last error: Stopped by user"));
    }

    #[test]
    fn test_format_health() {
        let health = HealthStatus {
            status: "healthy".to_string(),
            service: "NAVDEN".to_string(),
            version: "1.0.0".to_string(),
        };
        assert_eq!(format_health(&health), "✓ NAVDEN v1.0.0: healthy");
    }
}
