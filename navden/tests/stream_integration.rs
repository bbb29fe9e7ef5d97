//! Integration tests for the `/ws` stream adapter.
//!
//! A tokio-tungstenite server on a loopback port plays a scripted run
//! (start → updates → complete) and the adapter's events are checked for
//! order, skip-on-malformed and close handling. The events are then folded
//! into a [`DashboardSession`] the way the dashboard does it.
//!
//! Run with: `cargo test --test stream_integration`

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use navden::session::{ConnectionStatus, DashboardSession, SessionSource};
use navden::stream::{StreamAdapter, StreamError, StreamEvent, StreamMessage};

// ============================================================================
// Test Helpers
// ============================================================================

const START: &str = r#"{"type": "start", "message": "Simulation started",
    "total_duration": 0.3, "dt": 0.1, "total_steps": 3}"#;

const COMPLETE: &str = r#"{"type": "complete", "message": "Simulation completed",
    "final_metrics": {"waypoints_reached": 1, "max_position_error": 0.9,
                      "final_confidence": 88.0, "total_distance": 3.0},
    "trajectory_data": [{"time": 0.1}]}"#;

fn update(step: u64, jammed: bool) -> String {
    let time = step as f64 / 10.0;
    format!(
        r#"{{"type": "update", "time": {time}, "progress": {progress}, "step": {step},
            "total_steps": 3,
            "data": {{"true_position": {{"x": {step}, "y": 0.0, "z": 5.0}},
                     "estimated_position": {{"x": {step}, "y": 0.5, "z": 5.0}},
                     "confidence": 90.0, "error": 0.5,
                     "gps_status": "{status}"}},
            "metrics": {{"waypoints_reached": 0, "max_error": 0.5, "total_distance": {step}}}}}"#,
        time = time,
        progress = step as f64 * 100.0 / 3.0,
        step = step,
        status = if jammed { "JAMMED" } else { "ACTIVE" },
    )
}

/// How the scripted server ends the connection.
#[derive(Clone, Copy)]
enum Ending {
    /// Close handshake with a reason.
    Close,
    /// Keep the socket open until the client closes it.
    Hold,
    /// Drop the TCP connection without a close frame.
    Drop,
}

/// Serve `frames` to the first client, then end the connection as requested.
async fn start_server(frames: Vec<String>, ending: Ending) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        for frame in frames {
            ws.send(Message::Text(frame)).await.unwrap();
        }

        match ending {
            Ending::Close => {
                let _ = ws
                    .close(Some(CloseFrame {
                        code: CloseCode::Normal,
                        reason: "Simulation complete".into(),
                    }))
                    .await;
                while ws.next().await.is_some() {}
            }
            Ending::Hold => while ws.next().await.is_some() {},
            Ending::Drop => drop(ws),
        }
    });

    format!("ws://{}/ws", addr)
}

/// Collect events until `Closed` (inclusive).
async fn collect_events(rx: &mut mpsc::Receiver<StreamEvent>) -> Vec<StreamEvent> {
    let mut events = Vec::new();
    while let Some(event) = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("stream adapter stalled")
    {
        let closed = matches!(event, StreamEvent::Closed(_));
        events.push(event);
        if closed {
            break;
        }
    }
    events
}

fn kinds(events: &[StreamEvent]) -> Vec<String> {
    events
        .iter()
        .map(|event| match event {
            StreamEvent::Connected { .. } => "connected".to_string(),
            StreamEvent::Message(message) => message.kind().to_string(),
            StreamEvent::Malformed(_) => "malformed".to_string(),
            StreamEvent::Closed(_) => "closed".to_string(),
        })
        .collect()
}

// ============================================================================
// Scripted runs
// ============================================================================

#[tokio::test]
async fn test_full_run_in_order() {
    let url = start_server(
        vec![
            START.to_string(),
            update(1, false),
            update(2, true),
            update(3, true),
            COMPLETE.to_string(),
        ],
        Ending::Close,
    )
    .await;

    let (tx, mut rx) = mpsc::channel(64);
    let handle = StreamAdapter::new(url, tx, CancellationToken::new()).start();

    let events = collect_events(&mut rx).await;
    assert_eq!(
        kinds(&events),
        vec!["connected", "start", "update", "update", "update", "complete", "closed"]
    );
    assert_eq!(
        events.last(),
        Some(&StreamEvent::Closed(Some("Simulation complete".to_string())))
    );
    assert!(handle.await.unwrap().is_ok());

    let times: Vec<f64> = events
        .iter()
        .filter_map(|event| match event {
            StreamEvent::Message(StreamMessage::Update(update)) => Some(update.time),
            _ => None,
        })
        .collect();
    assert_eq!(times, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn test_malformed_frames_are_skipped() {
    let url = start_server(
        vec![
            START.to_string(),
            "not json at all".to_string(),
            update(1, false),
            r#"{"type": "telemetry", "time": 1.0}"#.to_string(),
            update(2, false),
            COMPLETE.to_string(),
        ],
        Ending::Close,
    )
    .await;

    let (tx, mut rx) = mpsc::channel(64);
    let _handle = StreamAdapter::new(url, tx, CancellationToken::new()).start();

    let events = collect_events(&mut rx).await;
    assert_eq!(
        kinds(&events),
        vec![
            "connected",
            "start",
            "malformed",
            "update",
            "malformed",
            "update",
            "complete",
            "closed"
        ]
    );

    let mut session = DashboardSession::new(SessionSource::Stream);
    for event in events {
        session.apply_event(event);
    }
    assert_eq!(session.trajectory().len(), 2);
    assert_eq!(session.malformed_frames(), 2);
    assert!(!session.is_running());
    assert_eq!(session.metrics().unwrap().waypoints_reached, 1);
    assert_eq!(
        session.connection(),
        &ConnectionStatus::Closed(Some("Simulation complete".to_string()))
    );
}

#[tokio::test]
async fn test_session_tracks_jamming_from_stream() {
    let url = start_server(
        vec![START.to_string(), update(1, false), update(2, true)],
        Ending::Hold,
    )
    .await;

    let (tx, mut rx) = mpsc::channel(64);
    let cancel = CancellationToken::new();
    let handle = StreamAdapter::new(url, tx, cancel.clone()).start();

    let mut session = DashboardSession::new(SessionSource::Stream);
    while session.trajectory().len() < 2 {
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        session.apply_event(event);
    }

    assert!(session.is_running());
    assert!(session.is_jammed());
    assert_eq!(session.step(), 2);
    assert_eq!(session.connection(), &ConnectionStatus::Connected);

    cancel.cancel();
    let rest = collect_events(&mut rx).await;
    assert_eq!(rest.last(), Some(&StreamEvent::Closed(None)));
    assert!(handle.await.unwrap().is_ok());
}

// ============================================================================
// Failure paths
// ============================================================================

#[tokio::test]
async fn test_abrupt_disconnect_reports_error() {
    let url = start_server(vec![START.to_string()], Ending::Drop).await;

    let (tx, mut rx) = mpsc::channel(64);
    let handle = StreamAdapter::new(url, tx, CancellationToken::new()).start();

    let events = collect_events(&mut rx).await;
    assert_eq!(kinds(&events)[..2], ["connected", "start"]);
    assert!(matches!(events.last(), Some(StreamEvent::Closed(Some(_)))));
    assert!(matches!(
        handle.await.unwrap(),
        Err(StreamError::ProtocolError(_))
    ));
}

#[tokio::test]
async fn test_for_backend_derives_ws_url() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (tx, _rx) = mpsc::channel(4);
    let adapter =
        StreamAdapter::for_backend(&format!("http://{}", addr), tx, CancellationToken::new())
            .unwrap();
    assert_eq!(adapter.url(), format!("ws://{}/ws", addr));
}
