//! Integration tests for the REST client against a canned HTTP backend.
//!
//! A minimal HTTP/1.1 server on a loopback port answers each route with the
//! JSON envelopes the NAVDEN backend produces, so the full
//! request → envelope → model path is exercised.
//!
//! Run with: `cargo test --test client_integration`

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use navden::client::{BackendClient, ClientConfig, ClientError, HttpBackendClient};
use navden::model::{GpsStatus, NavigationMode, SimulationRequest, Vec2};

// ============================================================================
// Test Helpers
// ============================================================================

/// Request line and body of every request the server received.
type RequestLog = Arc<Mutex<Vec<(String, String)>>>;

const STATE: &str = r#"{
    "true_position": [120.0, 45.0], "estimated_position": [121.5, 44.0],
    "velocity": [3.0, 4.0], "heading": 0.93, "altitude": 5.0,
    "gps_available": false, "navigation_mode": "SENSOR", "error": 1.8,
    "confidence": 84.0, "current_waypoint": [20.0, 10.0], "mission_progress": 20.0
}"#;

fn route(method: &str, target: &str) -> (u16, String) {
    let path = target.split('?').next().unwrap_or(target);
    match (method, path) {
        ("GET", "/health") => (
            200,
            r#"{"status": "healthy", "service": "NAVDEN Navigation Engine", "version": "1.0.0"}"#
                .to_string(),
        ),
        ("GET", "/info") => (
            200,
            r#"{"service": "NAVDEN", "version": "1.0.0",
                "capabilities": ["GPS-denied navigation"],
                "algorithms": ["Extended Kalman Filter"],
                "sensors_simulated": ["IMU", "GPS"]}"#
                .to_string(),
        ),
        ("POST", "/run-simulation") => (
            200,
            format!(
                r#"{{"status": "success",
                    "trajectory_data": [
                        {{"time": 0.1, "true_x": 0.0, "true_y": 0.0, "est_x": 0.2, "est_y": 0.0,
                          "error": 0.2, "confidence": 98.0, "gps_status": "ACTIVE", "nav_mode": "GPS"}},
                        {{"time": 3.5, "true_x": 9.0, "true_y": 4.0, "est_x": 10.0, "est_y": 4.0,
                          "error": 1.0, "confidence": 90.0, "gps_status": "JAMMED", "nav_mode": "SENSOR"}}
                    ],
                    "metrics": {{"waypoints_reached": 5, "total_waypoints": 5, "mission_progress": 100.0}},
                    "jamming_analysis": {{"jam_start_time": 3.0, "jam_end_time": 6.0, "jam_duration": 3.0}},
                    "current_state": {state}}}"#,
                state = STATE
            ),
        ),
        ("GET", "/current-state") => (
            200,
            format!(r#"{{"success": true, "time": 12.3, "state": {}}}"#, STATE),
        ),
        ("GET", "/trajectory") => (
            200,
            r#"{"success": true, "total_points": 300, "returned_points": 1,
                "trajectory": [{"time": 30.0, "true_x": 1.0, "true_y": 2.0, "est_x": 1.5,
                                "est_y": 2.5, "error": 0.7, "confidence": 91.0,
                                "gps_status": "ACTIVE", "nav_mode": "GPS"}]}"#
                .to_string(),
        ),
        ("GET", "/metrics") => (
            200,
            r#"{"error": "Simulator not initialized", "metrics": null}"#.to_string(),
        ),
        ("GET", "/jamming-analysis") => (
            200,
            r#"{"success": true, "analysis": {"jam_start_time": 3.0, "jam_end_time": 6.0,
                "peak_error_during_jam": 4.2, "error_increase_factor": 3.5}}"#
                .to_string(),
        ),
        ("POST", "/step-simulation") => (
            200,
            format!(
                r#"{{"success": true, "time": 0.1, "state": {},
                    "metrics": {{"mission_progress": 0.1, "waypoints_reached": 0, "gps_jammed": false}}}}"#,
                STATE
            ),
        ),
        ("POST", "/reset") => (
            200,
            r#"{"success": true, "message": "Simulator reset", "state": {}}"#.to_string(),
        ),
        _ => (500, r#"{"detail": "Internal failure"}"#.to_string()),
    }
}

/// Read one request: header block plus `Content-Length` bytes of body.
async fn read_request(stream: &mut TcpStream) -> Option<(String, String)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let request_line = head.lines().next().unwrap_or_default().to_string();
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
    Some((request_line, body))
}

/// Start the canned backend and return its base URL and request log.
async fn start_backend() -> (String, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));

    let server_log = Arc::clone(&log);
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let log = Arc::clone(&server_log);
            tokio::spawn(async move {
                let Some((request_line, body)) = read_request(&mut stream).await else {
                    return;
                };
                let mut parts = request_line.split_whitespace();
                let method = parts.next().unwrap_or_default().to_string();
                let target = parts.next().unwrap_or_default().to_string();
                log.lock().unwrap().push((request_line.clone(), body));

                let (status, payload) = route(&method, &target);
                let reason = if status == 200 { "OK" } else { "Internal Server Error" };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    payload.len(),
                    payload
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    (format!("http://{}", addr), log)
}

async fn create_client() -> (HttpBackendClient, RequestLog) {
    let (url, log) = start_backend().await;
    (HttpBackendClient::new(ClientConfig::new(url)).unwrap(), log)
}

// ============================================================================
// Service endpoints
// ============================================================================

#[tokio::test]
async fn test_health_and_info() {
    let (client, _) = create_client().await;

    let health = client.health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.version, "1.0.0");

    let info = client.info().await.unwrap();
    assert_eq!(info.algorithms, vec!["Extended Kalman Filter".to_string()]);
    assert_eq!(info.sensors_simulated.len(), 2);
}

// ============================================================================
// Simulation endpoints
// ============================================================================

#[tokio::test]
async fn test_run_simulation_posts_request_body() {
    let (client, log) = create_client().await;

    let results = client
        .run_simulation(SimulationRequest::new(90.0, 0.1))
        .await
        .unwrap();

    assert!(results.is_complete());
    assert_eq!(results.trajectory_data.len(), 2);
    assert_eq!(results.trajectory_data[1].gps_status, GpsStatus::Jammed);
    assert_eq!(results.metrics.waypoints_reached, 5);
    assert_eq!(results.jamming_analysis.jam_duration, 3.0);
    assert!(results.current_state.is_some());

    let requests = log.lock().unwrap();
    let (line, body) = &requests[0];
    assert!(line.starts_with("POST /run-simulation"));
    let sent: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(sent["duration"], 90.0);
    assert_eq!(sent["dt"], 0.1);
}

#[tokio::test]
async fn test_current_state() {
    let (client, _) = create_client().await;

    let current = client.current_state().await.unwrap();
    assert_eq!(current.time, 12.3);
    assert_eq!(current.state.navigation_mode, NavigationMode::Sensor);
    assert_eq!(current.state.velocity, Vec2::new(3.0, 4.0));
    assert_eq!(current.state.speed(), 5.0);
}

#[tokio::test]
async fn test_trajectory_sends_limit() {
    let (client, log) = create_client().await;

    let page = client.trajectory(25).await.unwrap();
    assert_eq!(page.total_points, 300);
    assert_eq!(page.returned_points, 1);
    assert_eq!(page.trajectory[0].time, 30.0);

    let requests = log.lock().unwrap();
    assert!(requests[0].0.starts_with("GET /trajectory?limit=25 "));
}

#[tokio::test]
async fn test_metrics_before_run_is_not_initialized() {
    let (client, _) = create_client().await;

    match client.metrics().await {
        Err(ClientError::NotInitialized(msg)) => assert_eq!(msg, "Simulator not initialized"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_jamming_analysis_unwraps_field() {
    let (client, _) = create_client().await;

    let analysis = client.jamming_analysis().await.unwrap();
    assert_eq!(analysis.peak_error_during_jam, 4.2);
    assert_eq!(analysis.error_increase_factor, 3.5);
}

#[tokio::test]
async fn test_step_and_reset() {
    let (client, _) = create_client().await;

    let step = client.step_simulation().await.unwrap();
    assert_eq!(step.time, 0.1);
    assert!(!step.state.gps_available);

    let reset = client.reset().await.unwrap();
    assert_eq!(reset.message, "Simulator reset");
    assert!(reset.state.is_none());
}

// ============================================================================
// Failure paths
// ============================================================================

#[tokio::test]
async fn test_unreachable_backend() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpBackendClient::new(ClientConfig::new(format!("http://{}", addr))).unwrap();
    let err = client.health().await.unwrap_err();
    assert!(err.is_unreachable());
}

#[tokio::test]
async fn test_invalid_request_never_reaches_backend() {
    let (client, log) = create_client().await;

    let result = client
        .run_simulation(SimulationRequest::new(500.0, 0.1))
        .await;
    assert!(matches!(result, Err(ClientError::InvalidRequest(_))));
    assert!(log.lock().unwrap().is_empty());
}
