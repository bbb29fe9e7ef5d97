//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, the tokio runtime and
//! backend client creation to reduce duplication across command handlers.

use std::future::Future;

use tracing::info;

use navden::client::{ClientConfig, HttpBackendClient};
use navden::config::ConfigFile;
use navden::logging::{init_logging_full, LoggingGuard};

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file, with command-line overrides applied
    config: ConfigFile,
    runtime: tokio::runtime::Runtime,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// When stdout is a TTY, stdout logging is disabled to prevent
    /// interference with the TUI dashboard.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    /// * `backend_override` - Base URL from `--backend`, replacing `backend.url`
    pub fn new(debug_mode: bool, backend_override: Option<String>) -> Result<Self, CliError> {
        let mut config = ConfigFile::load()?;
        if let Some(url) = backend_override {
            config.backend.url = url;
        }

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| navden::logging::default_log_file().to_string());

        // The TUI owns the terminal when stdout is a TTY
        let stdout_enabled = !atty::is(atty::Stream::Stdout);

        let logging_guard = init_logging_full(&log_dir, &log_file, stdout_enabled, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("navden-worker")
            .build()
            .map_err(CliError::Runtime)?;

        Ok(Self {
            logging_guard,
            config,
            runtime,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("NAVDEN v{}", navden::VERSION);
        info!(backend = %self.config.backend.url, "NAVDEN CLI: {} command", command);
    }

    /// Create the REST client for the configured backend.
    pub fn create_client(&self) -> Result<HttpBackendClient, CliError> {
        let client = HttpBackendClient::new(ClientConfig::from_settings(&self.config.backend))?;
        info!(url = %client.config().base_url, "Backend client created");
        Ok(client)
    }

    /// Run a future to completion on the runner's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Handle for spawning background tasks from synchronous code.
    pub fn handle(&self) -> &tokio::runtime::Handle {
        self.runtime.handle()
    }
}
