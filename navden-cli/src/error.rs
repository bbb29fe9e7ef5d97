//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use navden::client::ClientError;
use navden::config::ConfigFileError;
use navden::planner::store::PlanStoreError;
use navden::planner::PlannerError;
use navden::stream::StreamError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Command-line argument out of range
    InvalidArgument(String),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// REST call to the backend failed
    Backend(ClientError),
    /// WebSocket stream failed
    Stream(StreamError),
    /// Waypoint edit rejected
    Planner(PlannerError),
    /// Waypoint file could not be read or written
    PlanStore(PlanStoreError),
    /// Terminal UI failure
    Dashboard(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Backend(e) if e.is_unreachable() => {
                eprintln!();
                eprintln!("Could not reach the NAVDEN backend. Make sure:");
                eprintln!("  1. The backend is running (default http://localhost:8000)");
                eprintln!("  2. The URL is right: navden config get backend.url");
                eprintln!("  3. Or run the local demo instead: navden demo");
            }
            CliError::Backend(ClientError::NotInitialized(_)) => {
                eprintln!();
                eprintln!("No simulation has run yet. Start one with: navden run");
            }
            CliError::Stream(StreamError::ConnectError { .. }) => {
                eprintln!();
                eprintln!("The telemetry stream is served at <backend>/ws.");
                eprintln!("Check the backend is running, or try: navden demo");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Backend(e) => write!(f, "Backend request failed: {}", e),
            CliError::Stream(e) => write!(f, "Telemetry stream failed: {}", e),
            CliError::Planner(e) => write!(f, "Waypoint edit failed: {}", e),
            CliError::PlanStore(e) => write!(f, "{}", e),
            CliError::Dashboard(e) => write!(f, "Dashboard error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Runtime(e) => Some(e),
            CliError::Backend(e) => Some(e),
            CliError::Stream(e) => Some(e),
            CliError::Planner(e) => Some(e),
            CliError::PlanStore(e) => Some(e),
            CliError::Dashboard(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        CliError::Backend(e)
    }
}

impl From<StreamError> for CliError {
    fn from(e: StreamError) -> Self {
        CliError::Stream(e)
    }
}

impl From<PlannerError> for CliError {
    fn from(e: PlannerError) -> Self {
        CliError::Planner(e)
    }
}

impl From<PlanStoreError> for CliError {
    fn from(e: PlanStoreError) -> Self {
        CliError::PlanStore(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_wraps_library_errors() {
        let err = CliError::from(ClientError::NotInitialized(
            "Simulator not initialized".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Backend request failed: Backend not ready: Simulator not initialized"
        );

        let err = CliError::from(PlannerError::UnknownWaypoint(7));
        assert!(err.to_string().starts_with("Waypoint edit failed"));
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = CliError::from(StreamError::InvalidUrl("ftp://x".to_string()));
        assert!(err.source().is_some());
        assert!(CliError::Config("bad".to_string()).source().is_none());
    }
}
